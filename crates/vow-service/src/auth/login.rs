use vow_core::config::AuthConfig;

use super::password::verify_password;
use super::session::{IssuedSession, SessionStore};
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Checks admin credentials against the configured account and opens a session.
///
/// There is no lockout or backoff between attempts.
///
/// ## Errors
/// - `NotAuthenticated` for an unknown username, a wrong password, or when no
///   admin password hash is configured.
/// - `InvalidConfiguration` if the configured hash is malformed.
#[tracing::instrument(skip(auth, sessions, password))]
pub async fn login(
    auth: &AuthConfig,
    sessions: &SessionStore,
    username: &str,
    password: &str,
) -> ServiceResult<IssuedSession> {
    let Some(password_hash) = auth.admin_password_hash.as_deref() else {
        tracing::warn!("Admin login attempted but no admin password hash is configured");
        return Err(ServiceError::NotAuthenticated);
    };

    if username != auth.admin_username {
        tracing::info!("Admin login rejected: unknown username");
        return Err(ServiceError::NotAuthenticated);
    }

    verify_password(password, password_hash).inspect_err(|e| {
        if matches!(e, ServiceError::NotAuthenticated) {
            tracing::info!("Admin login rejected: wrong password");
        }
    })?;

    Ok(sessions.issue(username).await)
}
