//! Read-only view of users owned by the auth service.

use rankly_core::types::UserId;
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// Public facts about a list owner. Email is deliberately absent: owners
/// are shown on public pages.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub image: Option<String>,
}
