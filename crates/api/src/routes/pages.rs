//! Route definitions for the server-rendered pages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Page routes, mounted at the root.
///
/// ```text
/// GET  /                  -> browse
/// GET  /list/{id}         -> detail
/// POST /list/{id}/delete  -> delete_submit
/// GET  /create-list       -> create_form
/// POST /create-list       -> create_submit
/// GET  /profile           -> profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::browse))
        .route("/list/{id}", get(pages::detail))
        .route("/list/{id}/delete", post(pages::delete_submit))
        .route(
            "/create-list",
            get(pages::create_form).post(pages::create_submit),
        )
        .route("/profile", get(pages::profile))
}
