//! Bounded-wait content loading.
//!
//! The stored record is fetched with a deadline. Whatever happens (error,
//! timeout, missing or malformed row) the caller gets a complete record.
//! [`ContentLoader::load_checked`] is for callers that must not mistake
//! defaults for the stored row.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use vow_core::content::{ContentRecord, PartialContentRecord, default_content, resolve};
use vow_db::model::Wedding;
use vow_db::store::WeddingStore;

use crate::error::{ServiceError, ServiceResult};

/// Where a loaded record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    /// The stored row, merged over the defaults.
    Remote,
    /// Built-in defaults only.
    Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedContent {
    pub source: ContentSource,
    pub content: ContentRecord,
}

#[derive(Clone)]
pub struct ContentLoader {
    weddings: Arc<dyn WeddingStore>,
    timeout: Duration,
}

impl ContentLoader {
    #[must_use]
    pub fn new(weddings: Arc<dyn WeddingStore>, timeout: Duration) -> Self {
        Self { weddings, timeout }
    }

    /// ## Summary
    /// Loads the content of the wedding `slug`, falling back to defaults.
    ///
    /// Never fails; fetch problems are logged at `warn`.
    #[tracing::instrument(skip(self), fields(timeout_ms = self.timeout.as_millis()))]
    pub async fn load(&self, slug: &str) -> LoadedContent {
        let remote = match tokio::time::timeout(self.timeout, self.weddings.find_by_slug(slug)).await
        {
            Ok(Ok(Some(wedding))) => Some(wedding.into_partial()),
            Ok(Ok(None)) => {
                tracing::info!("No stored content, serving defaults");
                None
            }
            Ok(Err(error)) => {
                tracing::warn!(%error, "Content fetch failed, serving defaults");
                None
            }
            Err(_elapsed) => {
                tracing::warn!("Content fetch timed out, serving defaults");
                None
            }
        };

        merge_over_defaults(slug, remote)
    }

    /// ## Summary
    /// Loads the content of the wedding `slug`, reporting fetch problems
    /// instead of hiding them. A missing row still resolves to defaults.
    ///
    /// ## Errors
    /// - `Unavailable` if the fetch misses the deadline.
    /// - Persistence errors from the store.
    #[tracing::instrument(skip(self), fields(timeout_ms = self.timeout.as_millis()))]
    pub async fn load_checked(&self, slug: &str) -> ServiceResult<LoadedContent> {
        let stored = tokio::time::timeout(self.timeout, self.weddings.find_by_slug(slug))
            .await
            .map_err(|_elapsed| {
                ServiceError::Unavailable(format!("content of '{slug}' did not load in time"))
            })??;

        Ok(merge_over_defaults(slug, stored.map(Wedding::into_partial)))
    }
}

fn merge_over_defaults(slug: &str, remote: Option<PartialContentRecord>) -> LoadedContent {
    let source = if remote.is_some() {
        ContentSource::Remote
    } else {
        ContentSource::Defaults
    };

    LoadedContent {
        source,
        content: resolve(remote, &default_content(slug)),
    }
}
