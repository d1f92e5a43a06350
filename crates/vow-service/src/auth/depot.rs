//! Depot helpers for reading the caller's session from Salvo requests.
//!
//! The session middleware stores the resolved [`Session`] (and the raw token
//! when a session cookie was presented) under the keys below.

use vow_core::guest::Session;

use crate::error::{ServiceError, ServiceResult};

pub mod depot_keys {
    pub const SESSION: &str = "__session";
    pub const SESSION_TOKEN: &str = "__session_token";
}

/// Get the caller's session; requests the middleware did not see are anonymous.
#[must_use]
pub fn get_session_from_depot(depot: &salvo::Depot) -> Session {
    depot
        .get::<Session>(depot_keys::SESSION)
        .cloned()
        .unwrap_or_default()
}

/// Get the session token presented by the caller, if any.
#[must_use]
pub fn get_session_token_from_depot(depot: &salvo::Depot) -> Option<uuid::Uuid> {
    depot.get::<uuid::Uuid>(depot_keys::SESSION_TOKEN).ok().copied()
}

/// Get the caller's session, requiring it to be authenticated.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if no authenticated session is present.
pub fn require_admin_session(depot: &salvo::Depot) -> ServiceResult<(uuid::Uuid, Session)> {
    let session = get_session_from_depot(depot);
    match get_session_token_from_depot(depot) {
        Some(token) if session.is_authenticated() => Ok((token, session)),
        _ => Err(ServiceError::NotAuthenticated),
    }
}
