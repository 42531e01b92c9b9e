//! Session extractors for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use rankly_core::error::CoreError;

use crate::auth::session::{get_session, Session};
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in user for JSON API handlers.
///
/// ```ignore
/// async fn my_handler(AuthUser(session): AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %session.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Session);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        get_session(&parts.headers, &state.config.session)
            .map(AuthUser)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Sign in required".into())))
    }
}

/// Session if there is one. Used by pages that render for everyone.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Session>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(get_session(&parts.headers, &state.config.session)))
    }
}

/// Signed-in user for page handlers. Without a session the visitor is
/// redirected to the configured login URL.
#[derive(Debug, Clone)]
pub struct PageUser(pub Session);

impl FromRequestParts<AppState> for PageUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        get_session(&parts.headers, &state.config.session)
            .map(PageUser)
            .ok_or_else(|| Redirect::to(&state.config.session.login_url))
    }
}
