//! Authentication session plumbing.
//!
//! Identity is owned by the backend's auth service; this module only resolves
//! session tokens to users and exposes the extractors handlers use to require
//! a signed-in user or an administrator.

pub mod routes;
pub mod session;

pub use session::{AdminUser, CurrentUser, MaybeUser};
