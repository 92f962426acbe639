//! Query parameter types for the abbreviation endpoints.

use abbreviations_core::filters::{CategoryOperator, ListingFilters, SortColumn, SortMethod};
use abbreviations_core::pagination::PagingOptions;
use abbreviations_core::types::DbId;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// `GET /abbreviations` parameters.
///
/// `categories` is a comma-separated id list, e.g. `?categories=1,4`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListingParams {
    #[validate(length(min = 2, max = 16))]
    pub locale: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub limit: Option<u64>,
    pub categories: Option<String>,
    pub category_operator: Option<CategoryOperator>,
    pub sort_by: Option<String>,
    pub sort_method: Option<SortMethod>,
}

impl ListingParams {
    /// Validate the parameters and split them into filters and paging.
    pub fn into_parts(self) -> AppResult<(Option<String>, ListingFilters, PagingOptions)> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let categories = match self.categories.as_deref() {
            Some(raw) => parse_categories(raw)?,
            None => Vec::new(),
        };

        let sort_by = match self.sort_by.as_deref() {
            Some(raw) => Some(SortColumn::parse(raw).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown sort column: {raw}"))
            })?),
            None => None,
        };

        let filters = ListingFilters {
            categories,
            category_operator: self.category_operator.unwrap_or_default(),
            sort_by,
            sort_method: self.sort_method.unwrap_or_default(),
            extra: Default::default(),
        };

        let paging = PagingOptions {
            limit: self.limit,
            page: self.page.unwrap_or(1),
            page_size: self.page_size,
        };

        Ok((self.locale, filters, paging))
    }
}

fn parse_categories(raw: &str) -> AppResult<Vec<DbId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DbId>()
                .map_err(|_| AppError::BadRequest(format!("Invalid category id: {s}")))
        })
        .collect()
}
