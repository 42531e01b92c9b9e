//! Limit clamping for listing endpoints.

/// Default number of lists shown on the browse page.
pub const DEFAULT_BROWSE_LIMIT: i64 = 10;

/// Upper bound for any caller-supplied limit.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}
