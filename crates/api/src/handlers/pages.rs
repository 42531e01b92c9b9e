//! Server-rendered page handlers.
//!
//! Same operations as the JSON handlers, with HTML responses. Failures
//! render an error page with the status the JSON API would use.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use rankly_core::error::CoreError;
use rankly_core::lists::{parse_items_json, ListSubmission};
use rankly_db::repositories::ListRepo;
use serde::Deserialize;

use crate::error::{AppError, PageResult};
use crate::extract::parse_list_id;
use crate::handlers::lists::{delete_as_owner, publish};
use crate::html::{self, CreateFormValues, Nav};
use crate::middleware::auth::{MaybeUser, PageUser};
use crate::query::VisibilityParams;
use crate::state::AppState;
use crate::views::{browse_cards, ListDetailView, ProfileView};

/// Fields posted by the create form.
///
/// `items` carries the draft's items as a JSON array in ranked order.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateListForm {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "isPublic")]
    pub is_public: Option<String>,
    pub category: Option<String>,
    pub items: Option<String>,
}

impl CreateListForm {
    /// A checked checkbox posts `on`; anything else counts as unchecked.
    pub fn is_public(&self) -> bool {
        matches!(
            self.is_public.as_deref().map(str::trim),
            Some("on") | Some("true") | Some("1")
        )
    }

    pub fn to_submission(&self) -> Result<ListSubmission, CoreError> {
        Ok(ListSubmission {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            is_public: self.is_public(),
            items: parse_items_json(self.items.as_deref())?,
        })
    }

    fn values(&self) -> CreateFormValues {
        CreateFormValues {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            is_public: self.is_public(),
            items: self.items.clone().unwrap_or_default(),
        }
    }
}

/// GET /
pub async fn browse(
    MaybeUser(session): MaybeUser,
    State(state): State<AppState>,
) -> PageResult<Html<String>> {
    let lists = ListRepo::list_public(&state.pool, Some(state.config.browse_limit)).await?;
    let cards = browse_cards(&lists);
    let nav = Nav::for_viewer(
        session.as_ref().map(|s| &s.user),
        &state.config.session.login_url,
    );
    Ok(Html(html::browse_page(&cards, nav)))
}

/// GET /list/{id}
///
/// Resolves for any visitor holding the link, private lists included.
pub async fn detail(
    MaybeUser(session): MaybeUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> PageResult<Html<String>> {
    let id = parse_list_id(&raw_id)?;
    let detail = ListRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "List", id })?;

    let user = session.as_ref().map(|s| &s.user);
    let view = ListDetailView::new(detail, user);
    let nav = Nav::for_viewer(user, &state.config.session.login_url);
    Ok(Html(html::detail_page(&view, nav)))
}

/// GET /create-list
pub async fn create_form(PageUser(session): PageUser) -> Html<String> {
    Html(html::create_page(
        &session.user,
        None,
        &CreateFormValues::default(),
    ))
}

/// POST /create-list
///
/// On success redirects to the new list. A rejected submission re-renders
/// the form with the message and the submitted values, status 400.
pub async fn create_submit(
    PageUser(session): PageUser,
    State(state): State<AppState>,
    Form(form): Form<CreateListForm>,
) -> PageResult<Response> {
    let published = match form.to_submission() {
        Ok(submission) => publish(&state, session.user.id.clone(), submission).await,
        Err(err) => Err(err.into()),
    };

    let list = match published {
        Ok(list) => list,
        Err(AppError::Core(CoreError::Validation(message))) => {
            tracing::debug!(user_id = %session.user.id, %message, "List submission rejected");
            let page = html::create_page(&session.user, Some(&message), &form.values());
            return Ok((StatusCode::BAD_REQUEST, Html(page)).into_response());
        }
        Err(other) => return Err(other.into()),
    };

    Ok(Redirect::to(&format!("/list/{}", list.id)).into_response())
}

/// GET /profile?visibility=
pub async fn profile(
    PageUser(session): PageUser,
    State(state): State<AppState>,
    Query(params): Query<VisibilityParams>,
) -> PageResult<Html<String>> {
    let filter = params.filter()?;
    let owned = ListRepo::list_owned(&state.pool, &session.user.id).await?;
    let view = ProfileView::new(session.user, owned, filter);
    Ok(Html(html::profile_page(&view)))
}

/// POST /list/{id}/delete
pub async fn delete_submit(
    PageUser(session): PageUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> PageResult<Redirect> {
    let id = parse_list_id(&raw_id)?;
    delete_as_owner(&state, id, &session.user.id).await?;
    Ok(Redirect::to("/profile"))
}
