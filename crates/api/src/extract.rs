//! Request extractors whose failures use the `{error, code}` envelope.
//!
//! Axum's stock `Path` and `Json` rejections answer in plain text. These
//! wrappers turn them into [`AppError`]s instead.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use rankly_core::error::CoreError;
use rankly_core::types::DbId;
use uuid::Uuid;

use crate::error::AppError;

/// Parse a list id from a URL segment. Anything that is not a UUID cannot
/// name a list, so it is NotFound rather than a bad request.
pub fn parse_list_id(raw: &str) -> Result<DbId, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound("List not found".to_string()))
}

/// `{id}` path segment holding a list id.
#[derive(Debug, Clone, Copy)]
pub struct ListId(pub DbId);

impl<S> FromRequestParts<S> for ListId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        parse_list_id(&raw).map(ListId)
    }
}

/// JSON body. A body that parses but has the wrong shape is a validation
/// error; a missing content type or broken syntax is a bad request.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(JsonRejection::JsonDataError(err)) => {
                tracing::debug!(error = %err.body_text(), "Rejected request body");
                Err(AppError::Core(CoreError::Validation(
                    "Invalid request data".to_string(),
                )))
            }
            Err(other) => Err(AppError::BadRequest(other.body_text())),
        }
    }
}
