//! Smart-content data provider for abbreviations.
//!
//! Resolves filtered, paginated abbreviation lists for the generic content
//! selection layer. Fetching and the "has next page" decision are
//! delegated to the injected [`AbbreviationRepository`].

use std::sync::Arc;

use serde::Serialize;

use crate::abbreviation::{Abbreviation, Image};
use crate::error::CoreError;
use crate::filters::{ListingFilters, ListingOptions, SortColumn};
use crate::pagination::PagingOptions;
use crate::ports::{AbbreviationRepository, ArraySerializer};
use crate::types::{DbId, Timestamp};

/// A column the selection UI may sort by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortingOption {
    pub column: &'static str,
    pub title: &'static str,
}

/// Features the provider supports, read by the selection UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderConfiguration {
    pub limit: bool,
    pub pagination: bool,
    pub present_as: bool,
    pub categories: bool,
    pub sorting: Vec<SortingOption>,
}

impl Default for ProviderConfiguration {
    fn default() -> Self {
        Self {
            limit: true,
            pagination: true,
            present_as: true,
            categories: true,
            sorting: SortColumn::ALL
                .into_iter()
                .map(|column| SortingOption {
                    column: column.column(),
                    title: column.title(),
                })
                .collect(),
        }
    }
}

/// Display shape of one abbreviation in a content selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbbreviationDataItem {
    pub id: Option<DbId>,
    pub title: String,
    pub image: Option<Image>,
    pub published_at: Option<Timestamp>,
    #[serde(skip)]
    resource: Abbreviation,
}

impl AbbreviationDataItem {
    pub fn new(resource: Abbreviation) -> Self {
        Self {
            id: resource.id,
            title: resource.title.clone(),
            image: resource.image.clone(),
            published_at: resource.published_at,
            resource,
        }
    }

    pub fn resource(&self) -> &Abbreviation {
        &self.resource
    }
}

/// An abbreviation plus its serialized field map, for template rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceItem {
    pub id: Option<DbId>,
    pub data: serde_json::Value,
    #[serde(skip)]
    resource: Abbreviation,
}

impl ResourceItem {
    pub fn resource(&self) -> &Abbreviation {
        &self.resource
    }
}

/// Items of one page and whether another page follows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataProviderResult<T> {
    pub items: Vec<T>,
    pub has_next_page: bool,
}

pub struct AbbreviationsDataProvider {
    repository: Arc<dyn AbbreviationRepository>,
    serializer: Arc<dyn ArraySerializer>,
    configuration: ProviderConfiguration,
}

impl AbbreviationsDataProvider {
    pub fn new(
        repository: Arc<dyn AbbreviationRepository>,
        serializer: Arc<dyn ArraySerializer>,
    ) -> Self {
        Self {
            repository,
            serializer,
            configuration: ProviderConfiguration::default(),
        }
    }

    pub fn configuration(&self) -> &ProviderConfiguration {
        &self.configuration
    }

    /// Resolve a page of display items.
    pub async fn resolve_data_items(
        &self,
        filters: &ListingFilters,
        options: &ListingOptions,
        paging: PagingOptions,
    ) -> Result<DataProviderResult<AbbreviationDataItem>, CoreError> {
        let result = self.resolve(filters, options, paging).await?;
        Ok(DataProviderResult {
            items: decorate_data_items(result.items),
            has_next_page: result.has_next_page,
        })
    }

    /// Resolve a page of resource items carrying the serialized entity.
    pub async fn resolve_resource_items(
        &self,
        filters: &ListingFilters,
        options: &ListingOptions,
        paging: PagingOptions,
    ) -> Result<DataProviderResult<ResourceItem>, CoreError> {
        let result = self.resolve(filters, options, paging).await?;
        let items = result
            .items
            .into_iter()
            .map(|resource| ResourceItem {
                id: resource.id,
                data: self.serializer.serialize(&resource),
                resource,
            })
            .collect();

        Ok(DataProviderResult {
            items,
            has_next_page: result.has_next_page,
        })
    }

    async fn resolve(
        &self,
        filters: &ListingFilters,
        options: &ListingOptions,
        paging: PagingOptions,
    ) -> Result<DataProviderResult<Abbreviation>, CoreError> {
        let PagingOptions {
            limit,
            page,
            page_size,
        } = paging;

        let items = self
            .repository
            .find_by_filters(filters, page, page_size, limit, &options.locale)
            .await?;
        let has_next_page = self
            .repository
            .has_next_page(filters, page, page_size, limit, &options.locale)
            .await?;

        tracing::debug!(
            locale = %options.locale,
            page,
            item_count = items.len(),
            has_next_page,
            "Resolved abbreviation listing"
        );

        Ok(DataProviderResult {
            items,
            has_next_page,
        })
    }
}

fn decorate_data_items(items: Vec<Abbreviation>) -> Vec<AbbreviationDataItem> {
    items.into_iter().map(AbbreviationDataItem::new).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
