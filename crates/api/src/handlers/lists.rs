//! JSON handlers for ranked lists.
//!
//! Every list operation the page surface offers is also reachable here:
//! publish, public browsing, single-list lookup, owner delete, and the
//! caller's own lists.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rankly_core::error::CoreError;
use rankly_core::lists::{ListSubmission, SubmittedItem};
use rankly_core::types::{DbId, UserId};
use rankly_db::models::list::{CreateList, List};
use rankly_db::repositories::{DeleteOutcome, ListRepo, UserRepo};
use serde::Deserialize;
use ts_rs::TS;

use crate::error::AppResult;
use crate::extract::{ApiJson, ListId};
use crate::middleware::auth::AuthUser;
use crate::query::{LimitParams, VisibilityParams};
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;
use crate::views::filter_lists;

/// Request body for `POST /api/v1/lists`.
///
/// Missing fields take their defaults so validation, not deserialization,
/// reports what is wrong.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CreateListRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_public: bool,
    pub items: Vec<CreateListItemRequest>,
}

/// One item of a [`CreateListRequest`], in ranked order.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CreateListItemRequest {
    pub name: String,
    /// Also accepted as `description`.
    #[serde(alias = "description")]
    pub note: Option<String>,
    pub image_url: Option<String>,
    /// Optional client-side position; only relative order matters.
    pub rank: Option<i32>,
}

impl From<CreateListRequest> for ListSubmission {
    fn from(req: CreateListRequest) -> Self {
        ListSubmission {
            title: req.title,
            description: req.description,
            category: req.category,
            is_public: req.is_public,
            items: req
                .items
                .into_iter()
                .map(|item| SubmittedItem {
                    name: item.name,
                    note: item.note,
                    image_url: item.image_url,
                    rank: item.rank,
                })
                .collect(),
        }
    }
}

/// POST /api/v1/lists
///
/// Publish a list with all its items. Returns 201 with the list row.
pub async fn create(
    AuthUser(session): AuthUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateListRequest>,
) -> AppResult<impl IntoResponse> {
    let list = publish(&state, session.user.id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: list })))
}

/// GET /api/v1/lists?limit=
///
/// Latest public lists with owners and items.
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let lists = ListRepo::list_public(&state.pool, params.limit).await?;
    Ok(Json(DataResponse { data: lists }))
}

/// GET /api/v1/lists/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ListId(id): ListId,
) -> AppResult<impl IntoResponse> {
    let detail = ListRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "List", id })?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/lists/{id}/items
///
/// Items of one list, ascending by rank. An existing list without items
/// yields an empty array; an unknown id is 404.
pub async fn items(
    State(state): State<AppState>,
    ListId(id): ListId,
) -> AppResult<impl IntoResponse> {
    ListRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "List", id })?;
    let items = ListRepo::list_items(&state.pool, id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// DELETE /api/v1/lists/{id}
///
/// Only the owner may delete. Items go with the list.
pub async fn delete(
    AuthUser(session): AuthUser,
    State(state): State<AppState>,
    ListId(id): ListId,
) -> AppResult<impl IntoResponse> {
    delete_as_owner(&state, id, &session.user.id).await?;
    Ok(Json(DataResponse {
        data: SuccessResponse { success: true },
    }))
}

/// GET /api/v1/me/lists?visibility=all|public|private
pub async fn mine(
    AuthUser(session): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<VisibilityParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.filter()?;
    let owned = ListRepo::list_owned(&state.pool, &session.user.id).await?;
    Ok(Json(DataResponse {
        data: filter_lists(owned, filter),
    }))
}

/// Validate, rank, and persist a submission for `owner_id`.
///
/// Shared by the RPC and page publish paths. A session whose user row the
/// auth service has not written yet cannot own a list, so it is refused
/// before the insert.
pub(crate) async fn publish(
    state: &AppState,
    owner_id: UserId,
    submission: ListSubmission,
) -> AppResult<List> {
    let input = CreateList::from_submission(owner_id, submission)?;

    if UserRepo::find_summary(&state.pool, &input.owner_id)
        .await?
        .is_none()
    {
        tracing::warn!(user_id = %input.owner_id, "Publish refused: no user record for session");
        return Err(CoreError::Unauthorized("No account found for this session".into()).into());
    }

    let list = ListRepo::create(&state.pool, &input).await?;
    tracing::info!(
        list_id = %list.id,
        owner_id = %list.owner_id,
        item_count = input.items.len(),
        is_public = list.is_public,
        "List published",
    );
    Ok(list)
}

/// Shared by the RPC and page delete paths.
pub(crate) async fn delete_as_owner(
    state: &AppState,
    id: DbId,
    user_id: &str,
) -> AppResult<()> {
    let outcome = ListRepo::delete_owned(&state.pool, id, user_id).await?;

    match outcome {
        DeleteOutcome::Deleted => {
            tracing::info!(list_id = %id, user_id = %user_id, "List deleted");
            Ok(())
        }
        DeleteOutcome::Unauthorized => {
            tracing::warn!(list_id = %id, user_id = %user_id, "Delete refused for non-owner");
            Err(CoreError::Forbidden("You do not own this list".into()).into())
        }
        DeleteOutcome::NotFound => Err(CoreError::NotFound { entity: "List", id }.into()),
    }
}
