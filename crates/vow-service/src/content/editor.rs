//! Editor drafts with explicit save.
//!
//! Each admin session edits its own draft of the page content. Edits only
//! touch the draft; `save` writes every content column in one update and only
//! then marks the draft clean. Drafts of ended sessions are dropped whenever a
//! new draft is opened.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;
use vow_core::content::{ContentEdit, ContentRecord, apply_edits};
use vow_db::model::WeddingContent;
use vow_db::store::WeddingStore;

use super::loader::ContentLoader;
use crate::auth::SessionStore;
use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub content: ContentRecord,
    /// Unsaved edits exist.
    pub dirty: bool,
    /// Bumped on every applied batch.
    pub revision: u64,
}

pub struct ContentEditor {
    loader: ContentLoader,
    weddings: Arc<dyn WeddingStore>,
    sessions: Arc<SessionStore>,
    slug: String,
    drafts: Mutex<HashMap<Uuid, Draft>>,
}

impl ContentEditor {
    #[must_use]
    pub fn new(
        loader: ContentLoader,
        weddings: Arc<dyn WeddingStore>,
        sessions: Arc<SessionStore>,
        slug: String,
    ) -> Self {
        Self {
            loader,
            weddings,
            sessions,
            slug,
            drafts: Mutex::new(HashMap::new()),
        }
    }

    /// ## Summary
    /// The session's draft, opened from the stored content if it has none.
    ///
    /// ## Side Effects
    /// Opening a draft drops the drafts of sessions that have ended.
    ///
    /// ## Errors
    /// Returns `Unavailable` or a persistence error when the stored content
    /// cannot be read; nothing is cached then, so the next call retries.
    #[tracing::instrument(skip(self))]
    pub async fn draft(&self, session: Uuid) -> ServiceResult<Draft> {
        if let Some(draft) = self.drafts.lock().await.get(&session) {
            return Ok(draft.clone());
        }

        let loaded = self.loader.load_checked(&self.slug).await?;
        let opened = Draft {
            content: loaded.content,
            dirty: false,
            revision: 0,
        };

        self.prune().await;

        Ok(self
            .drafts
            .lock()
            .await
            .entry(session)
            .or_insert(opened)
            .clone())
    }

    /// ## Summary
    /// Drops drafts whose session has been revoked or has expired.
    /// Returns how many were dropped.
    pub async fn prune(&self) -> usize {
        let live = self.sessions.live_tokens().await;

        let mut drafts = self.drafts.lock().await;
        let before = drafts.len();
        drafts.retain(|session, _| live.contains(session));
        let dropped = before - drafts.len();

        if dropped > 0 {
            tracing::debug!(dropped, "Dropped drafts of ended sessions");
        }
        dropped
    }

    /// ## Summary
    /// Applies a batch of edits to the session's draft.
    ///
    /// ## Errors
    /// - The first invalid edit; the draft is left as it was.
    /// - Errors from opening the draft, see [`Self::draft`].
    #[tracing::instrument(skip(self, edits), fields(edit_count = edits.len()))]
    pub async fn apply(&self, session: Uuid, edits: &[ContentEdit]) -> ServiceResult<Draft> {
        let opened = self.draft(session).await?;

        let mut drafts = self.drafts.lock().await;
        let draft = drafts.entry(session).or_insert(opened);
        draft.content = apply_edits(&draft.content, edits)?;
        draft.dirty = true;
        draft.revision += 1;

        Ok(draft.clone())
    }

    /// ## Summary
    /// Persists the session's draft.
    ///
    /// ## Side Effects
    /// Overwrites every content column of the wedding row.
    ///
    /// ## Errors
    /// - `NotFound` if the session has no draft or the wedding has no stored row.
    /// - Persistence errors; the draft then stays dirty.
    #[tracing::instrument(skip(self))]
    pub async fn save(&self, session: Uuid) -> ServiceResult<Draft> {
        let snapshot = self
            .drafts
            .lock()
            .await
            .get(&session)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound("no open draft".to_string()))?;

        if !snapshot.dirty {
            return Ok(snapshot);
        }

        let wedding_id = snapshot.content.id.ok_or_else(|| {
            ServiceError::NotFound(format!("wedding '{}' has no stored row", self.slug))
        })?;
        let columns = WeddingContent::from_record(&snapshot.content)?;

        self.weddings
            .update_content(wedding_id, &columns)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("wedding {wedding_id}")))?;

        tracing::info!(%wedding_id, revision = snapshot.revision, "Content saved");

        let mut drafts = self.drafts.lock().await;
        let saved = match drafts.get_mut(&session) {
            Some(draft) => {
                if draft.revision == snapshot.revision {
                    draft.dirty = false;
                }
                draft.clone()
            }
            None => Draft {
                dirty: false,
                ..snapshot
            },
        };

        Ok(saved)
    }

    /// Drops the session's draft and its unsaved edits.
    pub async fn discard(&self, session: Uuid) -> bool {
        self.drafts.lock().await.remove(&session).is_some()
    }
}
