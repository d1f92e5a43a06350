//! Live guest list for the dashboard.
//!
//! A watcher task subscribes to store changes and refetches the whole list on
//! any change. Every refetch takes a token from a monotonic counter when it is
//! issued; its response is applied only if that token is newer than the one
//! already applied. After the list is dropped, late responses are ignored.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use vow_db::model::Guest;
use vow_db::store::GuestChange;

use super::registry::GuestRegistry;
use super::stats::{GuestStats, compute_stats};
use crate::error::ServiceResult;

/// Where the list gets its rows and change notifications from.
#[async_trait]
pub trait GuestSource: Send + Sync {
    async fn fetch(&self) -> ServiceResult<Vec<Guest>>;

    fn subscribe(&self) -> broadcast::Receiver<GuestChange>;
}

#[async_trait]
impl GuestSource for GuestRegistry {
    async fn fetch(&self) -> ServiceResult<Vec<Guest>> {
        self.list(None).await
    }

    fn subscribe(&self) -> broadcast::Receiver<GuestChange> {
        self.store().subscribe()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveSnapshot {
    pub state: LoadState,
    pub guests: Vec<Guest>,
    pub stats: GuestStats,
    /// Token of the refetch this snapshot came from; 0 before the first one.
    pub token: u64,
}

impl Default for LiveSnapshot {
    fn default() -> Self {
        Self {
            state: LoadState::Loading,
            guests: Vec::new(),
            stats: GuestStats::default(),
            token: 0,
        }
    }
}

struct Shared {
    source: Arc<dyn GuestSource>,
    snapshots: watch::Sender<LiveSnapshot>,
    next_token: AtomicU64,
    closed: AtomicBool,
}

impl Shared {
    fn take_token(&self) -> u64 {
        self.next_token.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn refetch(&self, token: u64) {
        let result = self.source.fetch().await;

        if self.closed.load(Ordering::Acquire) {
            tracing::debug!(token, "Guest list closed, dropping response");
            return;
        }

        self.snapshots.send_if_modified(|current| {
            if token <= current.token {
                tracing::debug!(token, applied = current.token, "Dropping stale guest list response");
                return false;
            }

            current.token = token;
            match result {
                Ok(guests) => {
                    current.stats = compute_stats(&guests);
                    current.guests = guests;
                    current.state = LoadState::Ready;
                }
                Err(error) => {
                    tracing::warn!(%error, token, "Guest list refetch failed");
                    current.state = LoadState::Failed(error.to_string());
                }
            }
            true
        });
    }
}

pub struct LiveGuestList {
    shared: Arc<Shared>,
    watcher: JoinHandle<()>,
}

impl LiveGuestList {
    /// ## Summary
    /// Starts watching `source`. The first snapshot is `Loading` until the
    /// initial fetch lands.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn(source: Arc<dyn GuestSource>) -> Self {
        let changes = source.subscribe();
        let (snapshots, _) = watch::channel(LiveSnapshot::default());
        let shared = Arc::new(Shared {
            source,
            snapshots,
            next_token: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        });

        let watcher = tokio::spawn(watch_changes(Arc::clone(&shared), changes));

        Self { shared, watcher }
    }

    /// ## Summary
    /// Issues a refetch. The token is taken now, so of two calls the later one
    /// always wins regardless of which response arrives first.
    pub fn refresh(&self) -> impl Future<Output = ()> + Send + 'static {
        let shared = Arc::clone(&self.shared);
        let token = shared.take_token();
        async move { shared.refetch(token).await }
    }

    #[must_use]
    pub fn snapshot(&self) -> LiveSnapshot {
        self.shared.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LiveSnapshot> {
        self.shared.snapshots.subscribe()
    }
}

impl Drop for LiveGuestList {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::Release);
        self.watcher.abort();
    }
}

async fn watch_changes(shared: Arc<Shared>, mut changes: broadcast::Receiver<GuestChange>) {
    shared.refetch(shared.take_token()).await;

    loop {
        match changes.recv().await {
            Ok(change) => {
                tracing::debug!(kind = ?change.kind, guest_id = %change.guest_id, "Guest changed");
                // Coalesce a burst into one refetch.
                while changes.try_recv().is_ok() {}
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Change feed lagged");
            }
            Err(RecvError::Closed) => {
                tracing::debug!("Change feed closed, watcher stopping");
                break;
            }
        }

        shared.refetch(shared.take_token()).await;
    }
}
