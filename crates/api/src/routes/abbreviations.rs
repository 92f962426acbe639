use axum::routing::get;
use axum::Router;

use crate::handlers::abbreviations;
use crate::state::AppState;

/// Routes mounted at `/abbreviations`.
///
/// ```text
/// GET    /                                  list (data items)
/// GET    /resource-items                    list (resource items)
/// GET    /data-provider-configuration       provider capabilities
/// GET    /{id}                              get
/// DELETE /{id}                              move to trash
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(abbreviations::list))
        .route("/resource-items", get(abbreviations::list_resource_items))
        .route(
            "/data-provider-configuration",
            get(abbreviations::data_provider_configuration),
        )
        .route(
            "/{id}",
            get(abbreviations::get_by_id).delete(abbreviations::delete),
        )
}
