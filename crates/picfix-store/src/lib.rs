//! PicFix Store - user accounts and edit history on SQLite
//!
//! This crate backs the login screen and the edit log of the PicFix editor.
//!
//! # Module Structure
//!
//! - `users` - [`UserStore`]: credentials, security questions and saved-image records
//! - `auth` - [`AuthForm`]: input validation for login, registration and password reset
//! - `hash` - SHA-256 digests for passwords and security answers
//! - `error` - [`StoreError`]
//!
//! Secrets are never stored in clear text; only their hex digests are.

mod auth;
mod error;
mod hash;
mod users;

pub use auth::{AuthError, AuthForm};
pub use error::StoreError;
pub use hash::hash_secret;
pub use users::{default_db_path, UserStore, SECURITY_QUESTIONS};
