//! Read-only view composition for the page surface.
//!
//! Repositories return rows; these functions shape them into what a page
//! shows. Nothing here touches the database.

use rankly_core::types::{DbId, Timestamp};
use rankly_core::visibility::{visibility_label, VisibilityFilter};
use rankly_db::models::list::{List, ListDetail, ListItem, ListWithItems};
use rankly_db::models::user::UserSummary;

use crate::auth::session::SessionUser;

/// Card on the browse page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCard {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub owner_name: String,
    pub owner_image: Option<String>,
    pub item_count: usize,
    /// Image of the best-ranked item that has one.
    pub cover_image_url: Option<String>,
    pub created_at: Timestamp,
}

impl ListCard {
    pub fn from_detail(detail: &ListDetail) -> Self {
        Self {
            id: detail.list.id,
            title: detail.list.title.clone(),
            description: detail.list.description.clone(),
            category: detail.list.category.clone(),
            owner_name: detail.owner.name.clone(),
            owner_image: detail.owner.image.clone(),
            item_count: detail.items.len(),
            cover_image_url: cover_image(&detail.items),
            created_at: detail.list.created_at,
        }
    }
}

/// Browse cards in the order the repository returned them.
pub fn browse_cards(lists: &[ListDetail]) -> Vec<ListCard> {
    lists.iter().map(ListCard::from_detail).collect()
}

/// The detail page of one list.
#[derive(Debug, Clone)]
pub struct ListDetailView {
    pub list: List,
    pub owner: UserSummary,
    pub items: Vec<ListItem>,
    pub visibility_label: &'static str,
    /// Whether the viewer may delete this list.
    pub viewer_is_owner: bool,
}

impl ListDetailView {
    pub fn new(detail: ListDetail, viewer: Option<&SessionUser>) -> Self {
        let viewer_is_owner = viewer.is_some_and(|user| user.id == detail.list.owner_id);
        Self {
            visibility_label: visibility_label(detail.list.is_public),
            viewer_is_owner,
            list: detail.list,
            owner: detail.owner,
            items: detail.items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The signed-in user's own lists, narrowed by a visibility filter.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub user: SessionUser,
    pub filter: VisibilityFilter,
    pub lists: Vec<ListWithItems>,
    pub total_count: usize,
    pub public_count: usize,
    pub private_count: usize,
}

impl ProfileView {
    /// Counts cover every owned list; `lists` holds only the filtered ones.
    pub fn new(user: SessionUser, owned: Vec<ListWithItems>, filter: VisibilityFilter) -> Self {
        let total_count = owned.len();
        let public_count = owned.iter().filter(|l| l.list.is_public).count();
        let lists = filter_lists(owned, filter);

        Self {
            user,
            filter,
            lists,
            total_count,
            public_count,
            private_count: total_count - public_count,
        }
    }
}

/// Keep only the lists that pass `filter`, preserving order.
pub fn filter_lists(lists: Vec<ListWithItems>, filter: VisibilityFilter) -> Vec<ListWithItems> {
    lists
        .into_iter()
        .filter(|l| filter.matches(l.list.is_public))
        .collect()
}

fn cover_image(items: &[ListItem]) -> Option<String> {
    items
        .iter()
        .filter(|item| item.image_url.is_some())
        .min_by_key(|item| item.rank)
        .and_then(|item| item.image_url.clone())
}
