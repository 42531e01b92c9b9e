//! Authoring workflow for a list that has not been published yet.
//!
//! A [`ListDraft`] is a plain value. Every operation consumes the draft and
//! returns the updated one, so callers hold exactly one version at a time
//! and nothing is shared or global. Nothing here performs I/O; publishing
//! happens by handing [`ListDraft::to_submission`] to the publish path.

use uuid::Uuid;

use crate::lists::{normalize_text, ListSubmission, SubmittedItem};

/// Candidate item inside a draft, identified by a temporary id that is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftItem {
    pub temp_id: Uuid,
    pub name: String,
    pub note: Option<String>,
    pub image_url: Option<String>,
}

/// In-progress list: title, description, visibility, and ordered items.
///
/// New drafts are private until the author opts in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDraft {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub is_public: bool,
    items: Vec<DraftItem>,
}

impl ListDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = normalize_text(category);
        self
    }

    pub fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Append an item. A blank name leaves the draft unchanged.
    pub fn add_item(
        mut self,
        name: &str,
        note: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return self;
        }
        self.items.push(DraftItem {
            temp_id: Uuid::new_v4(),
            name: name.to_string(),
            note: normalize_text(note),
            image_url: normalize_text(image_url),
        });
        self
    }

    /// Remove the item with `temp_id`. Remaining items keep their order;
    /// ranks are only derived at submission.
    pub fn remove_item(mut self, temp_id: Uuid) -> Self {
        self.items.retain(|item| item.temp_id != temp_id);
        self
    }

    /// Move an item to `new_index` (0-based, clamped to the last slot).
    pub fn move_item(mut self, temp_id: Uuid, new_index: usize) -> Self {
        if let Some(from) = self.items.iter().position(|item| item.temp_id == temp_id) {
            let item = self.items.remove(from);
            let to = new_index.min(self.items.len());
            self.items.insert(to, item);
        }
        self
    }

    pub fn items(&self) -> &[DraftItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based rank the item would get if published now.
    pub fn position_of(&self, temp_id: Uuid) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.temp_id == temp_id)
            .map(|index| index + 1)
    }

    /// Snapshot the draft for publishing. Item order is the current order;
    /// no client ranks are attached, so ranks become `position + 1`.
    pub fn to_submission(&self) -> ListSubmission {
        ListSubmission {
            title: self.title.clone(),
            description: normalize_text(Some(self.description.clone())),
            category: self.category.clone(),
            is_public: self.is_public,
            items: self
                .items
                .iter()
                .map(|item| SubmittedItem {
                    name: item.name.clone(),
                    note: item.note.clone(),
                    image_url: item.image_url.clone(),
                    rank: None,
                })
                .collect(),
        }
    }
}
