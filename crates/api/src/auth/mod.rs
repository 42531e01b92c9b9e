//! Session resolution.
//!
//! Sessions are issued by the external auth service. Rankly only verifies
//! them: see [`session::get_session`].

pub mod session;
