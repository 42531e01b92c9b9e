pub mod health;
pub mod lists;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /lists                 latest public lists (GET), publish (POST, auth)
/// /lists/{id}            get (GET), delete (DELETE, owner only)
/// /lists/{id}/items      ranked items (GET)
/// /me/lists              caller's own lists (GET, auth), ?visibility=
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/lists", lists::router())
        .nest("/me/lists", lists::me_router())
}
