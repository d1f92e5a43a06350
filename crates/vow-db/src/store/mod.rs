//! Storage traits over the `weddings` and `guests` collections.
//!
//! Services only see these traits. [`pg::PgStore`] backs them with `PostgreSQL`,
//! [`memory::MemoryStore`] keeps everything in process for demos and tests.

pub mod memory;
pub mod pg;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::db::query::guest::GuestQuery;
use crate::error::DbResult;
use crate::model::{Guest, GuestChangeset, GuestResponse, NewGuest, NewWedding, Wedding, WeddingContent};

/// Buffered change events per subscriber before it starts lagging.
pub const CHANGE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Notification that one guest row changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestChange {
    pub kind: ChangeKind,
    pub guest_id: uuid::Uuid,
    pub wedding_id: Option<uuid::Uuid>,
}

impl GuestChange {
    #[must_use]
    pub fn of(kind: ChangeKind, guest: &Guest) -> Self {
        Self {
            kind,
            guest_id: guest.id,
            wedding_id: guest.wedding_id,
        }
    }
}

/// Wedding content persistence operations
#[async_trait]
pub trait WeddingStore: Send + Sync {
    /// Find the wedding with this slug
    async fn find_by_slug(&self, slug: &str) -> DbResult<Option<Wedding>>;

    /// Create a wedding row; the slug must be unused
    async fn create(&self, wedding: NewWedding) -> DbResult<Wedding>;

    /// Overwrite every content column of a wedding in one write.
    /// Returns `None` if the wedding does not exist.
    async fn update_content(
        &self,
        id: uuid::Uuid,
        content: &WeddingContent,
    ) -> DbResult<Option<Wedding>>;
}

/// Guest persistence operations
#[async_trait]
pub trait GuestStore: Send + Sync {
    /// List guests matching `query`, newest first
    async fn list(&self, query: &GuestQuery) -> DbResult<Vec<Guest>>;

    /// Get a guest by its ID
    async fn get(&self, id: uuid::Uuid) -> DbResult<Option<Guest>>;

    /// Create a guest row
    async fn insert(&self, guest: NewGuest) -> DbResult<Guest>;

    /// Update the given columns. Returns `None` if the guest does not exist.
    async fn update(&self, id: uuid::Uuid, changes: &GuestChangeset) -> DbResult<Option<Guest>>;

    /// Permanently delete a guest. Returns whether a row was removed.
    async fn delete(&self, id: uuid::Uuid) -> DbResult<bool>;

    /// Newest guests of a wedding that left a wish
    async fn latest_wishes(&self, wedding_id: uuid::Uuid, limit: usize) -> DbResult<Vec<Guest>>;

    /// Record `response` on the newest unanswered invitation named `guest_name`
    /// (case-insensitive) in one atomic step. Returns `None` if there is none.
    async fn answer_invitation(
        &self,
        wedding_id: uuid::Uuid,
        guest_name: &str,
        response: &GuestResponse,
    ) -> DbResult<Option<Guest>>;

    /// Subscribe to insert/update/delete notifications for the collection
    fn subscribe(&self) -> broadcast::Receiver<GuestChange>;
}

/// The stores a running instance works against.
#[derive(Clone)]
pub struct Stores {
    pub weddings: Arc<dyn WeddingStore>,
    pub guests: Arc<dyn GuestStore>,
}

impl Stores {
    /// Uses one backend for both collections.
    #[must_use]
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: WeddingStore + GuestStore + 'static,
    {
        Self {
            weddings: store.clone(),
            guests: store,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

pub(crate) fn publish(changes: &broadcast::Sender<GuestChange>, change: GuestChange) {
    if changes.send(change).is_err() {
        tracing::trace!(guest_id = %change.guest_id, "No change subscribers");
    }
}
