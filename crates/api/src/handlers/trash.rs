//! Handlers for the `/trash-items` resource.
//!
//! Only trash items stored by this module (resource key `abbreviations`)
//! are accepted; anything else is rejected before the handler runs.

use abbreviations_core::abbreviation::Abbreviation;
use abbreviations_core::error::CoreError;
use abbreviations_core::trash::{RestoreConfiguration, TrashItem};
use abbreviations_core::trash_handler::AbbreviationsTrashItemHandler;
use abbreviations_core::types::DbId;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/trash-items/{id}/restore
///
/// Restores the abbreviation under its original id, then drops the trash
/// item. The optional JSON body is the restore form data.
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<Json<DataResponse<Abbreviation>>> {
    let form_data = parse_form_data(&body)?;

    let trash_item = state
        .trash_items
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrashItem",
            id,
        }))?;
    ensure_resource_key(&trash_item)?;

    let restored = state.trash_handler().restore(&trash_item, &form_data).await?;

    if !state.trash_items.remove(trash_item.id).await? {
        tracing::warn!(trash_item_id = trash_item.id, "Trash item vanished after restore");
    }

    Ok(Json(DataResponse { data: restored }))
}

/// GET /api/v1/trash-items/restore-configuration/{resource_key}
pub async fn restore_configuration(
    State(state): State<AppState>,
    Path(resource_key): Path<String>,
) -> AppResult<Json<DataResponse<RestoreConfiguration>>> {
    if resource_key != AbbreviationsTrashItemHandler::resource_key() {
        return Err(unknown_resource_key(&resource_key));
    }
    Ok(Json(DataResponse {
        data: state.trash_handler().configuration(),
    }))
}

// ── Private helpers ──────────────────────────────────────────────────────

/// An empty body means "no form data".
fn parse_form_data(body: &[u8]) -> AppResult<serde_json::Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid restore form data: {e}")))
}

fn ensure_resource_key(item: &TrashItem) -> AppResult<()> {
    if item.resource_key == AbbreviationsTrashItemHandler::resource_key() {
        Ok(())
    } else {
        Err(unknown_resource_key(&item.resource_key))
    }
}

fn unknown_resource_key(key: &str) -> AppError {
    AppError::BadRequest(format!("No trash handler for resource key '{key}'"))
}
