//! Ranked list submission rules.
//!
//! A [`ListSubmission`] is what a client hands over at publish time, either
//! from the page form or from the RPC surface. This module validates it and
//! turns its items into [`RankedItem`]s whose ranks are `1..=N`.

use serde::Deserialize;
use validator::ValidateUrl;

use crate::error::CoreError;

/// One item as submitted by a client, before ranks are assigned.
///
/// `note` also accepts the older `description` key. Unknown keys (such as a
/// draft's temporary id) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedItem {
    pub name: String,
    #[serde(default, alias = "description")]
    pub note: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Client-suggested position. Only its relative order is used.
    #[serde(default)]
    pub rank: Option<i32>,
}

impl SubmittedItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Everything needed to publish a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSubmission {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_public: bool,
    pub items: Vec<SubmittedItem>,
}

/// An item with its final rank, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedItem {
    pub rank: i32,
    pub name: String,
    pub note: Option<String>,
    pub image_url: Option<String>,
}

impl ListSubmission {
    /// Check the title and every item. The first failure wins.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        for (index, item) in self.items.iter().enumerate() {
            validate_item(index + 1, item)?;
        }
        Ok(())
    }
}

/// A title must contain at least one non-whitespace character.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title is required".to_string()));
    }
    Ok(())
}

/// Validate a single submitted item. `position` is 1-based and only used in
/// error messages. Image URLs must be absolute `http`/`https` URLs.
pub fn validate_item(position: usize, item: &SubmittedItem) -> Result<(), CoreError> {
    if item.name.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "Item {position} is missing a name"
        )));
    }
    if let Some(url) = normalize_text(item.image_url.clone()) {
        let lower = url.to_ascii_lowercase();
        let is_http = lower.starts_with("http://") || lower.starts_with("https://");
        if !is_http || !url.validate_url() {
            return Err(CoreError::Validation(format!(
                "Item {position} has an invalid image URL"
            )));
        }
    }
    Ok(())
}

/// Trim optional free text; blank strings become `None`.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Assign final ranks to submitted items.
///
/// Without client ranks, rank is `position + 1` in submission order. When
/// any item carries a rank, items are stably sorted by it first (unranked
/// items keep their relative order after the ranked ones), then renumbered
/// so the result is always `1..=N`.
pub fn rank_items(mut items: Vec<SubmittedItem>) -> Vec<RankedItem> {
    if items.iter().any(|item| item.rank.is_some()) {
        items.sort_by_key(|item| (item.rank.is_none(), item.rank));
    }

    items
        .into_iter()
        .zip(1..)
        .map(|(item, rank)| RankedItem {
            rank,
            name: item.name.trim().to_string(),
            note: normalize_text(item.note),
            image_url: normalize_text(item.image_url),
        })
        .collect()
}

/// Parse the page form's `items` field, a JSON array of
/// `{name, note?, imageUrl?}`. A missing or blank field means no items.
pub fn parse_items_json(raw: Option<&str>) -> Result<Vec<SubmittedItem>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json)
            .map_err(|_| CoreError::Validation("Invalid items data".to_string())),
    }
}
