//! Server-side admin sessions.
//!
//! A session is a random token mapped to the admin it was issued to and an
//! expiry. Nothing is persisted: restarting the server signs everyone out.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;
use vow_core::guest::Session;

#[derive(Debug, Clone)]
struct SessionEntry {
    username: String,
    expires_at: DateTime<Utc>,
}

/// A session just handed out by [`SessionStore::issue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub token: Uuid,
    pub session: Session,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionStore {
    ttl: chrono::Duration,
    entries: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn with_ttl_minutes(minutes: u32) -> Self {
        Self::new(chrono::Duration::minutes(i64::from(minutes)))
    }

    /// ## Summary
    /// Starts an authenticated session for `username`.
    ///
    /// ## Side Effects
    /// Drops sessions that have already expired.
    #[tracing::instrument(skip(self))]
    pub async fn issue(&self, username: &str) -> IssuedSession {
        let token = Uuid::new_v4();
        let expires_at = Utc::now() + self.ttl;

        let mut entries = self.entries.write().await;
        let now = Utc::now();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            token,
            SessionEntry {
                username: username.to_string(),
                expires_at,
            },
        );

        tracing::info!(%expires_at, "Admin session issued");

        IssuedSession {
            token,
            session: Session::admin(username, expires_at),
            expires_at,
        }
    }

    /// The session for `token`; unknown or expired tokens are anonymous.
    pub async fn resolve(&self, token: Uuid) -> Session {
        self.entries
            .read()
            .await
            .get(&token)
            .filter(|entry| entry.expires_at > Utc::now())
            .map_or_else(Session::anonymous, |entry| {
                Session::admin(entry.username.clone(), entry.expires_at)
            })
    }

    /// Tokens of every session that has not expired.
    pub async fn live_tokens(&self) -> HashSet<Uuid> {
        let now = Utc::now();
        self.entries
            .read()
            .await
            .iter()
            .filter(|(_, entry)| entry.expires_at > now)
            .map(|(token, _)| *token)
            .collect()
    }

    /// Ends the session. Returns whether it existed.
    pub async fn revoke(&self, token: Uuid) -> bool {
        self.entries.write().await.remove(&token).is_some()
    }
}
