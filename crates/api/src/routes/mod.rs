pub mod abbreviations;
pub mod health;
pub mod trash;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /abbreviations                 listing, get, delete-to-trash
/// /trash-items                   restore, restore configuration
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/abbreviations", abbreviations::router())
        .nest("/trash-items", trash::router())
}
