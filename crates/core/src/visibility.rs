//! Public/private visibility of lists.
//!
//! Visibility only decides whether a list appears on the public browse
//! page. A private list is unlisted: its detail page still resolves for
//! anyone holding the link. The owner profile fetches every list the user
//! owns and narrows the result with a [`VisibilityFilter`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Label shown for lists that appear on the browse page.
pub const LABEL_PUBLIC: &str = "Public";
/// Label shown for unlisted lists.
pub const LABEL_PRIVATE: &str = "Private";

/// Human-readable visibility label for a list.
pub fn visibility_label(is_public: bool) -> &'static str {
    if is_public {
        LABEL_PUBLIC
    } else {
        LABEL_PRIVATE
    }
}

/// Profile filter over a user's own lists (`?visibility=all|public|private`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityFilter {
    #[default]
    All,
    Public,
    Private,
}

impl VisibilityFilter {
    /// Whether a list with the given visibility passes this filter.
    pub fn matches(self, is_public: bool) -> bool {
        match self {
            VisibilityFilter::All => true,
            VisibilityFilter::Public => is_public,
            VisibilityFilter::Private => !is_public,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VisibilityFilter::All => "all",
            VisibilityFilter::Public => "public",
            VisibilityFilter::Private => "private",
        }
    }
}

impl fmt::Display for VisibilityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisibilityFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(VisibilityFilter::All),
            "public" => Ok(VisibilityFilter::Public),
            "private" => Ok(VisibilityFilter::Private),
            other => Err(CoreError::Validation(format!(
                "Unknown visibility filter '{other}'. Expected one of: all, public, private"
            ))),
        }
    }
}
