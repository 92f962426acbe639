//! Handlers for the `/abbreviations` resource.
//!
//! Listing goes through the smart-content data provider so the HTTP layer
//! and the content selection share one pagination rule. Deleting moves the
//! abbreviation into the trash before removing it.

use abbreviations_core::abbreviation::Abbreviation;
use abbreviations_core::data_provider::{
    AbbreviationDataItem, DataProviderResult, ProviderConfiguration, ResourceItem,
};
use abbreviations_core::error::CoreError;
use abbreviations_core::filters::ListingOptions;
use abbreviations_core::trash::TrashItem;
use abbreviations_core::types::DbId;
use axum::extract::{Path, Query, State};
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::query::ListingParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/abbreviations
///
/// One page of display items plus the `has_next_page` flag.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<DataResponse<DataProviderResult<AbbreviationDataItem>>>> {
    let (locale, filters, paging) = params.into_parts()?;
    let options = listing_options(&state, locale);

    let result = state
        .data_provider
        .resolve_data_items(&filters, &options, paging)
        .await?;
    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/abbreviations/resource-items
///
/// Same query as [`list`], with every item carrying its serialized fields.
pub async fn list_resource_items(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<Json<DataResponse<DataProviderResult<ResourceItem>>>> {
    let (locale, filters, paging) = params.into_parts()?;
    let options = listing_options(&state, locale);

    let result = state
        .data_provider
        .resolve_resource_items(&filters, &options, paging)
        .await?;
    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/abbreviations/data-provider-configuration
pub async fn data_provider_configuration(
    State(state): State<AppState>,
) -> Json<DataResponse<ProviderConfiguration>> {
    Json(DataResponse {
        data: state.data_provider.configuration().clone(),
    })
}

/// GET /api/v1/abbreviations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Abbreviation>>> {
    let abbreviation = find_or_404(&state, id).await?;
    Ok(Json(DataResponse { data: abbreviation }))
}

/// DELETE /api/v1/abbreviations/{id}
///
/// Stores a snapshot in the trash, then removes the abbreviation and its
/// routes. Returns the created trash item.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TrashItem>>> {
    let abbreviation = find_or_404(&state, id).await?;

    let options = serde_json::json!({ "locale": abbreviation.locale });
    let trash_item = state.trash_handler().store(&abbreviation, options).await?;

    if !state.abbreviations.remove(id).await? {
        // Deleted concurrently after the lookup; the trash item still
        // describes the last known state.
        tracing::warn!(abbreviation_id = id, "Abbreviation vanished before removal");
    }

    Ok(Json(DataResponse { data: trash_item }))
}

// ── Private helpers ──────────────────────────────────────────────────────

fn listing_options(state: &AppState, locale: Option<String>) -> ListingOptions {
    ListingOptions::new(locale.unwrap_or_else(|| state.config.default_locale.clone()))
}

async fn find_or_404(state: &AppState, id: DbId) -> AppResult<Abbreviation> {
    state
        .abbreviations
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Abbreviation",
            id,
        }))
}
