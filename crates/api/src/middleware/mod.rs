//! Session extractors.
//!
//! - [`auth::AuthUser`] -- Requires a session; rejects with 401 JSON.
//! - [`auth::MaybeUser`] -- Optional session, never rejects.
//! - [`auth::PageUser`] -- Requires a session; redirects pages to the login URL.

pub mod auth;
