//! In-process backend. Rows live for the lifetime of the store.

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use super::{CHANGE_CHANNEL_CAPACITY, ChangeKind, GuestChange, GuestStore, WeddingStore, publish};
use crate::db::query::guest::GuestQuery;
use crate::error::{DbError, DbResult};
use crate::model::{
    Guest, GuestChangeset, GuestResponse, NewGuest, NewWedding, Wedding, WeddingContent,
};

pub struct MemoryStore {
    weddings: RwLock<Vec<Wedding>>,
    /// Insertion order; listing walks it backwards for newest first.
    guests: RwLock<Vec<Guest>>,
    changes: broadcast::Sender<GuestChange>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            weddings: RwLock::new(Vec::new()),
            guests: RwLock::new(Vec::new()),
            changes,
        }
    }
}

#[async_trait]
impl WeddingStore for MemoryStore {
    async fn find_by_slug(&self, slug: &str) -> DbResult<Option<Wedding>> {
        Ok(self
            .weddings
            .read()
            .await
            .iter()
            .find(|w| w.slug == slug)
            .cloned())
    }

    #[tracing::instrument(skip(self, wedding), fields(slug = %wedding.slug))]
    async fn create(&self, wedding: NewWedding) -> DbResult<Wedding> {
        let mut weddings = self.weddings.write().await;
        if weddings.iter().any(|w| w.slug == wedding.slug) {
            return Err(DbError::DuplicateSlug(wedding.slug));
        }

        let mut row = Wedding {
            id: wedding.id,
            slug: wedding.slug,
            music_url: None,
            hero_image: None,
            album_urls: None,
            qr_groom: None,
            qr_bride: None,
            details: None,
            created_at: chrono::Utc::now(),
        };
        wedding.content.apply_to(&mut row);
        weddings.push(row.clone());

        Ok(row)
    }

    #[tracing::instrument(skip(self, content), fields(wedding_id = %id))]
    async fn update_content(
        &self,
        id: uuid::Uuid,
        content: &WeddingContent,
    ) -> DbResult<Option<Wedding>> {
        let mut weddings = self.weddings.write().await;
        Ok(weddings.iter_mut().find(|w| w.id == id).map(|wedding| {
            content.apply_to(wedding);
            wedding.clone()
        }))
    }
}

#[async_trait]
impl GuestStore for MemoryStore {
    async fn list(&self, query: &GuestQuery) -> DbResult<Vec<Guest>> {
        Ok(self
            .guests
            .read()
            .await
            .iter()
            .rev()
            .filter(|guest| query.matches(guest))
            .cloned()
            .collect())
    }

    async fn get(&self, id: uuid::Uuid) -> DbResult<Option<Guest>> {
        Ok(self
            .guests
            .read()
            .await
            .iter()
            .find(|g| g.id == id)
            .cloned())
    }

    #[tracing::instrument(skip(self, guest), fields(guest_id = %guest.id))]
    async fn insert(&self, guest: NewGuest) -> DbResult<Guest> {
        let guest = guest.into_guest(chrono::Utc::now());
        self.guests.write().await.push(guest.clone());

        publish(&self.changes, GuestChange::of(ChangeKind::Insert, &guest));

        Ok(guest)
    }

    #[tracing::instrument(skip(self, changes), fields(guest_id = %id))]
    async fn update(&self, id: uuid::Uuid, changes: &GuestChangeset) -> DbResult<Option<Guest>> {
        let updated = {
            let mut guests = self.guests.write().await;
            guests.iter_mut().find(|g| g.id == id).map(|guest| {
                changes.apply_to(guest);
                guest.clone()
            })
        };

        if let Some(guest) = &updated {
            publish(&self.changes, GuestChange::of(ChangeKind::Update, guest));
        }

        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(guest_id = %id))]
    async fn delete(&self, id: uuid::Uuid) -> DbResult<bool> {
        let removed = {
            let mut guests = self.guests.write().await;
            guests
                .iter()
                .position(|g| g.id == id)
                .map(|index| guests.remove(index))
        };

        if let Some(guest) = &removed {
            publish(&self.changes, GuestChange::of(ChangeKind::Delete, guest));
        }

        Ok(removed.is_some())
    }

    async fn latest_wishes(&self, wedding_id: uuid::Uuid, limit: usize) -> DbResult<Vec<Guest>> {
        Ok(self
            .guests
            .read()
            .await
            .iter()
            .rev()
            .filter(|g| g.wedding_id == Some(wedding_id) && g.wish().is_some())
            .take(limit)
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self, response), fields(wedding_id = %wedding_id))]
    async fn answer_invitation(
        &self,
        wedding_id: uuid::Uuid,
        guest_name: &str,
        response: &GuestResponse,
    ) -> DbResult<Option<Guest>> {
        let wanted = guest_name.to_lowercase();
        let answered = {
            let mut guests = self.guests.write().await;
            guests
                .iter_mut()
                .rev()
                .find(|g| {
                    g.wedding_id == Some(wedding_id)
                        && !g.has_responded()
                        && g.guest_name.to_lowercase() == wanted
                })
                .map(|guest| {
                    GuestChangeset::from_response(response).apply_to(guest);
                    guest.clone()
                })
        };

        if let Some(guest) = &answered {
            publish(&self.changes, GuestChange::of(ChangeKind::Update, guest));
        }

        Ok(answered)
    }

    fn subscribe(&self) -> broadcast::Receiver<GuestChange> {
        self.changes.subscribe()
    }
}
