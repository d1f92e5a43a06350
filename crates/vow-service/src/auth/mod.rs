//! Admin authentication.
//!
//! ## Module Organization
//!
//! - `depot`: Helpers for reading the caller's session from Salvo requests
//! - `login`: Credential check against the configured admin account
//! - `password`: Password hashing and verification with Argon2
//! - `session`: Server-side session registry

pub mod depot;
pub mod login;
pub mod password;
pub mod session;

pub use depot::{get_session_from_depot, get_session_token_from_depot};
pub use login::login;
pub use session::{IssuedSession, SessionStore};
