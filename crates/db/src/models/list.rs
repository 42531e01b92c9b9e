//! Ranked list and list item models.

use rankly_core::error::CoreError;
use rankly_core::lists::{normalize_text, rank_items, ListSubmission};
use rankly_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

use crate::models::user::UserSummary;

/// A row from the `lists` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct List {
    pub id: DbId,
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `list_items` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListItem {
    pub id: DbId,
    pub list_id: DbId,
    pub name: String,
    pub note: Option<String>,
    pub image_url: Option<String>,
    pub rank: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A list with its items, ascending by rank.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListWithItems {
    #[serde(flatten)]
    pub list: List,
    pub items: Vec<ListItem>,
}

/// A list with its owner and items, ascending by rank. Used for both the
/// detail view and public browsing.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListDetail {
    #[serde(flatten)]
    pub list: List,
    pub owner: UserSummary,
    pub items: Vec<ListItem>,
}

/// DTO for publishing a list together with its initial items.
#[derive(Debug, Clone)]
pub struct CreateList {
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_public: bool,
    pub items: Vec<CreateListItem>,
}

/// One item of a [`CreateList`]; `rank` is already final.
#[derive(Debug, Clone)]
pub struct CreateListItem {
    pub rank: i32,
    pub name: String,
    pub note: Option<String>,
    pub image_url: Option<String>,
}

impl CreateList {
    /// Validate a submission and assign ranks (`position + 1`).
    ///
    /// Fails with [`CoreError::Validation`] before anything touches the
    /// database, so a rejected submission persists nothing.
    pub fn from_submission(
        owner_id: UserId,
        submission: ListSubmission,
    ) -> Result<Self, CoreError> {
        submission.validate()?;

        let items = rank_items(submission.items)
            .into_iter()
            .map(|item| CreateListItem {
                rank: item.rank,
                name: item.name,
                note: item.note,
                image_url: item.image_url,
            })
            .collect();

        Ok(Self {
            owner_id,
            title: submission.title.trim().to_string(),
            description: normalize_text(submission.description),
            category: normalize_text(submission.category),
            is_public: submission.is_public,
            items,
        })
    }
}
