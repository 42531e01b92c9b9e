//! Shared query parameter types for API and page handlers.

use rankly_core::error::CoreError;
use rankly_core::visibility::VisibilityFilter;
use serde::Deserialize;

/// `?limit=` for listing endpoints. Clamped in the repository layer.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// `?visibility=all|public|private` for the owner's own lists.
#[derive(Debug, Default, Deserialize)]
pub struct VisibilityParams {
    pub visibility: Option<String>,
}

impl VisibilityParams {
    /// Parse the filter; absent means [`VisibilityFilter::All`].
    pub fn filter(&self) -> Result<VisibilityFilter, CoreError> {
        match self.visibility.as_deref() {
            Some(raw) => raw.parse(),
            None => Ok(VisibilityFilter::All),
        }
    }
}
