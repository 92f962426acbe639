//! Filter and sort options accepted by the smart-content listing.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// How multiple category filters combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryOperator {
    /// Match abbreviations assigned to any of the categories.
    #[default]
    Or,
    /// Match abbreviations assigned to all of the categories.
    And,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMethod {
    #[default]
    Asc,
    Desc,
}

impl SortMethod {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortMethod::Asc => "ASC",
            SortMethod::Desc => "DESC",
        }
    }
}

/// Columns the listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Name,
    Explanation,
    PublishedAt,
}

impl SortColumn {
    pub const ALL: [SortColumn; 3] = [
        SortColumn::Name,
        SortColumn::Explanation,
        SortColumn::PublishedAt,
    ];

    /// Column name in the `abbreviations` table.
    pub fn column(self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Explanation => "explanation",
            SortColumn::PublishedAt => "published_at",
        }
    }

    /// Translation key shown in the sort selector.
    pub fn title(self) -> &'static str {
        match self {
            SortColumn::Name => "abbreviations.name",
            SortColumn::Explanation => "abbreviations.explanation",
            SortColumn::PublishedAt => "abbreviations.published_at",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.column() == value)
    }
}

/// Filters passed down to the repository.
///
/// Keys the module does not interpret are kept in `extra` and forwarded
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingFilters {
    #[serde(default)]
    pub categories: Vec<DbId>,
    #[serde(default)]
    pub category_operator: CategoryOperator,
    #[serde(default)]
    pub sort_by: Option<SortColumn>,
    #[serde(default)]
    pub sort_method: SortMethod,
    #[serde(default, flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Per-request listing options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOptions {
    pub locale: String,
}

impl ListingOptions {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_column_round_trips_through_column_name() {
        for column in SortColumn::ALL {
            assert_eq!(SortColumn::parse(column.column()), Some(column));
        }
        assert_eq!(SortColumn::parse("title"), None);
    }

    #[test]
    fn unknown_filter_keys_are_kept() {
        let filters: ListingFilters = serde_json::from_value(serde_json::json!({
            "categories": [1, 2],
            "category_operator": "and",
            "data_source": "7",
        }))
        .unwrap();

        assert_eq!(filters.categories, vec![1, 2]);
        assert_eq!(filters.category_operator, CategoryOperator::And);
        assert_eq!(filters.sort_method, SortMethod::Asc);
        assert_eq!(filters.extra["data_source"], "7");
    }
}
