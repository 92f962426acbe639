//! Flat trash snapshot of an abbreviation.
//!
//! The snapshot is a point-in-time copy keyed by stable names (`subtitle`,
//! `summary`, `text`, `slug`, ...) that do not follow the entity's field
//! names, so stored trash items stay readable when the entity changes.

use chrono::{FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::abbreviation::Abbreviation;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// `date` layout inside a serialized `publishedAt` value.
const SNAPSHOT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// `timezone_type` for a named zone such as `UTC`.
const TIMEZONE_TYPE_NAMED: u8 = 3;

/// A nested date value: `{"date": "...", "timezone_type": 3, "timezone": "UTC"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDate {
    pub date: String,
    #[serde(default = "default_timezone_type")]
    pub timezone_type: u8,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone_type() -> u8 {
    TIMEZONE_TYPE_NAMED
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl SnapshotDate {
    pub fn from_timestamp(timestamp: Timestamp) -> Self {
        Self {
            date: timestamp.format(SNAPSHOT_DATE_FORMAT).to_string(),
            timezone_type: TIMEZONE_TYPE_NAMED,
            timezone: default_timezone(),
        }
    }

    /// Parse the nested `date` string back into a UTC timestamp.
    ///
    /// Accepts RFC 3339 strings as well as the `YYYY-MM-DD HH:MM:SS[.ffffff]`
    /// layout, interpreted in `timezone` when that is `UTC` or a fixed
    /// `+HH:MM` offset. Other zone names are read as UTC.
    pub fn to_timestamp(&self) -> Result<Timestamp, CoreError> {
        if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(&self.date) {
            return Ok(parsed.with_timezone(&Utc));
        }

        let naive = NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%d %H:%M:%S%.f").map_err(
            |e| CoreError::MalformedSnapshot(format!("invalid publishedAt date '{}': {e}", self.date)),
        )?;

        match parse_offset(&self.timezone)? {
            Some(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| {
                    CoreError::MalformedSnapshot(format!(
                        "ambiguous publishedAt date '{}'",
                        self.date
                    ))
                }),
            None => {
                tracing::warn!(
                    timezone = %self.timezone,
                    "Unsupported snapshot timezone, reading publishedAt as UTC"
                );
                Ok(Utc.from_utc_datetime(&naive))
            }
        }
    }
}

/// `UTC`, `Z` or a `+HH:MM` / `-HH:MM` offset. Zone names yield `None`;
/// a signed value that is not a valid offset is malformed.
fn parse_offset(timezone: &str) -> Result<Option<FixedOffset>, CoreError> {
    let tz = timezone.trim();
    if tz.eq_ignore_ascii_case("utc") || tz == "Z" {
        return Ok(FixedOffset::east_opt(0));
    }

    let (sign, rest) = match tz.as_bytes().first() {
        Some(b'+') => (1, &tz[1..]),
        Some(b'-') => (-1, &tz[1..]),
        _ => return Ok(None),
    };

    let malformed = || CoreError::MalformedSnapshot(format!("invalid publishedAt timezone '{tz}'"));
    let (hours, minutes) = rest.split_once(':').ok_or_else(malformed)?;
    let hours: u8 = hours.parse().map_err(|_| malformed())?;
    let minutes: u8 = minutes.parse().map_err(|_| malformed())?;
    if hours > 23 || minutes > 59 {
        return Err(malformed());
    }

    let seconds = sign * (i32::from(hours) * 3600 + i32::from(minutes) * 60);
    FixedOffset::east_opt(seconds).map(Some).ok_or_else(malformed)
}
