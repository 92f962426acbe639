use axum::routing::{get, post};
use axum::Router;

use crate::handlers::trash;
use crate::state::AppState;

/// Routes mounted at `/trash-items`.
///
/// ```text
/// POST /{id}/restore                          restore
/// GET  /restore-configuration/{resource_key}  restore UI configuration
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/restore", post(trash::restore))
        .route(
            "/restore-configuration/{resource_key}",
            get(trash::restore_configuration),
        )
}
