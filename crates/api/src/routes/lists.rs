//! Route definitions for ranked lists.

use axum::routing::get;
use axum::Router;

use crate::handlers::lists;
use crate::state::AppState;

/// Routes mounted at `/lists`.
///
/// ```text
/// GET    /        -> list_public
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// DELETE /{id}    -> delete
/// GET    /{id}/items -> items
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lists::list_public).post(lists::create))
        .route("/{id}", get(lists::get_by_id).delete(lists::delete))
        .route("/{id}/items", get(lists::items))
}

/// Routes mounted at `/me/lists`.
///
/// ```text
/// GET    /        -> mine
/// ```
pub fn me_router() -> Router<AppState> {
    Router::new().route("/", get(lists::mine))
}
