//! Admin-side guest list management.
//!
//! The registry owns invite-link derivation: every create and every rename
//! writes the link computed from the stored name.

use std::sync::Arc;

use serde::Deserialize;
use vow_core::guest::invite::{invite_link, normalize_guest_name};
use vow_db::db::enums::GuestGroup;
use vow_db::db::query::guest::GuestQuery;
use vow_db::model::{Guest, GuestChangeset, NewGuest};
use vow_db::store::{GuestStore, WeddingStore};

use crate::error::{ServiceError, ServiceResult};

/// Admin edit of an existing guest. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GuestUpdate {
    #[serde(default)]
    pub guest_name: Option<String>,
    /// `Some(None)` clears the group.
    #[serde(default, with = "double_option")]
    pub guest_group: Option<Option<GuestGroup>>,
}

/// Distinguishes an absent key from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[derive(Clone)]
pub struct GuestRegistry {
    guests: Arc<dyn GuestStore>,
    weddings: Arc<dyn WeddingStore>,
    slug: String,
    origin: String,
}

impl GuestRegistry {
    #[must_use]
    pub fn new(
        guests: Arc<dyn GuestStore>,
        weddings: Arc<dyn WeddingStore>,
        slug: String,
        origin: String,
    ) -> Self {
        Self {
            guests,
            weddings,
            slug,
            origin,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn GuestStore> {
        &self.guests
    }

    /// ## Summary
    /// Id of the configured wedding, or `None` when it has no stored row.
    ///
    /// ## Errors
    /// Returns persistence errors from the lookup.
    pub async fn wedding_id(&self) -> ServiceResult<Option<uuid::Uuid>> {
        let wedding = self.weddings.find_by_slug(&self.slug).await?;
        if wedding.is_none() {
            tracing::warn!(slug = %self.slug, "Wedding has no stored row, guest operations are unscoped");
        }
        Ok(wedding.map(|w| w.id))
    }

    /// ## Summary
    /// Lists the wedding's guests, newest first, optionally filtered by a
    /// case-insensitive name fragment.
    ///
    /// ## Errors
    /// Returns persistence errors.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, search: Option<&str>) -> ServiceResult<Vec<Guest>> {
        let query = GuestQuery {
            wedding_id: self.wedding_id().await?,
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        };

        Ok(self.guests.list(&query).await?)
    }

    /// ## Summary
    /// Creates an unanswered invitation and its invite link.
    ///
    /// ## Errors
    /// - `ValidationError` for a blank name.
    /// - `CoreError` if the public origin is not a valid URL.
    /// - Persistence errors.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str, group: Option<GuestGroup>) -> ServiceResult<Guest> {
        let name = validated_name(name)?;
        let link = invite_link(&self.origin, &name)?;
        let wedding_id = self.wedding_id().await?;

        let guest = self
            .guests
            .insert(NewGuest::invitation(wedding_id, name, group, link))
            .await?;

        tracing::info!(guest_id = %guest.id, "Guest invited");

        Ok(guest)
    }

    /// ## Summary
    /// Renames and/or regroups a guest. A rename always rewrites the invite link.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown id.
    /// - `ValidationError` for a blank name.
    /// - Persistence errors.
    #[tracing::instrument(skip(self), fields(guest_id = %id))]
    pub async fn update(&self, id: uuid::Uuid, update: GuestUpdate) -> ServiceResult<Guest> {
        let mut changes = GuestChangeset {
            guest_group: update.guest_group,
            ..GuestChangeset::default()
        };

        if let Some(name) = update.guest_name.as_deref() {
            let name = validated_name(name)?;
            changes.invite_link = Some(Some(invite_link(&self.origin, &name)?));
            changes.guest_name = Some(name);
        }

        let updated = if changes.is_empty() {
            self.guests.get(id).await?
        } else {
            self.guests.update(id, &changes).await?
        };

        updated.ok_or_else(|| ServiceError::NotFound(format!("guest {id}")))
    }

    /// ## Summary
    /// Permanently deletes a guest.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown id.
    /// - Persistence errors.
    #[tracing::instrument(skip(self), fields(guest_id = %id))]
    pub async fn delete(&self, id: uuid::Uuid) -> ServiceResult<()> {
        if self.guests.delete(id).await? {
            tracing::info!("Guest deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!("guest {id}")))
        }
    }
}

pub(crate) fn validated_name(name: &str) -> ServiceResult<String> {
    let name = normalize_guest_name(name);
    if name.is_empty() {
        return Err(ServiceError::ValidationError(
            "guest name must not be empty".to_string(),
        ));
    }
    Ok(name)
}
