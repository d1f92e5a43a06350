//! Public RSVP intake.
//!
//! With the default [`Reconciliation::Insert`] every submission becomes a new
//! row, so a pre-invited guest who answers produces a second row and a guest
//! who submits twice produces two. [`Reconciliation::MatchByName`] instead
//! answers the newest unanswered invitation with the same name when there is one.
//! There is no retry and no idempotency key.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vow_core::config::Reconciliation;
use vow_db::model::{Guest, GuestResponse, NewGuest};
use vow_db::store::{GuestStore, WeddingStore};

use super::registry::validated_name;
use crate::error::{ServiceError, ServiceResult};

/// The RSVP form as posted by a guest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RsvpSubmission {
    pub guest_name: String,
    pub attending: bool,
    #[serde(default = "default_party_size")]
    pub guest_count: i32,
    #[serde(default)]
    pub wish_message: Option<String>,
}

const fn default_party_size() -> i32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsvpReceipt {
    pub guest: Guest,
    /// The response answered an existing invitation instead of adding a row.
    pub matched_invitation: bool,
}

#[derive(Clone)]
pub struct RsvpService {
    guests: Arc<dyn GuestStore>,
    weddings: Arc<dyn WeddingStore>,
    reconciliation: Reconciliation,
}

impl RsvpService {
    #[must_use]
    pub fn new(
        guests: Arc<dyn GuestStore>,
        weddings: Arc<dyn WeddingStore>,
        reconciliation: Reconciliation,
    ) -> Self {
        Self {
            guests,
            weddings,
            reconciliation,
        }
    }

    /// ## Summary
    /// Records a guest's response for the wedding `slug`.
    ///
    /// ## Side Effects
    /// Inserts a guest row, or under `MatchByName` may update an invitation.
    ///
    /// ## Errors
    /// - `ValidationError` for a blank name or a party size below 1.
    /// - `NotFound` if the wedding has no stored row.
    /// - Persistence errors.
    #[tracing::instrument(skip(self, submission), fields(attending = submission.attending))]
    pub async fn submit(&self, slug: &str, submission: RsvpSubmission) -> ServiceResult<RsvpReceipt> {
        let guest_name = validated_name(&submission.guest_name)?;
        if submission.guest_count < 1 {
            return Err(ServiceError::ValidationError(
                "guest count must be at least 1".to_string(),
            ));
        }
        let response = GuestResponse {
            attending: submission.attending,
            guest_count: submission.guest_count,
            wish_message: submission
                .wish_message
                .map(|wish| wish.trim().to_string())
                .filter(|wish| !wish.is_empty()),
        };

        let wedding_id = self
            .weddings
            .find_by_slug(slug)
            .await?
            .map(|w| w.id)
            .ok_or_else(|| ServiceError::NotFound(format!("wedding '{slug}'")))?;

        if self.reconciliation == Reconciliation::MatchByName
            && let Some(guest) = self
                .guests
                .answer_invitation(wedding_id, &guest_name, &response)
                .await?
        {
            tracing::info!(guest_id = %guest.id, "RSVP answered an existing invitation");
            return Ok(RsvpReceipt {
                guest,
                matched_invitation: true,
            });
        }

        let guest = self
            .guests
            .insert(NewGuest::response(wedding_id, guest_name, &response))
            .await?;

        tracing::info!(guest_id = %guest.id, "RSVP recorded");

        Ok(RsvpReceipt {
            guest,
            matched_invitation: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vow_core::content::default_content;
    use vow_db::db::enums::GuestStatus;
    use vow_db::db::query::guest::GuestQuery;
    use vow_db::model::NewWedding;
    use vow_db::store::memory::MemoryStore;

    const SLUG: &str = "trang-chien-2026";

    async fn seeded() -> (Arc<MemoryStore>, uuid::Uuid) {
        let store = Arc::new(MemoryStore::new());
        let wedding = store
            .create(NewWedding::from_record(&default_content(SLUG)).expect("row"))
            .await
            .expect("create");
        (store, wedding.id)
    }

    fn submission(name: &str, attending: bool) -> RsvpSubmission {
        RsvpSubmission {
            guest_name: name.to_string(),
            attending,
            guest_count: 2,
            wish_message: Some("  Chúc mừng hạnh phúc!  ".to_string()),
        }
    }

    #[test_log::test(tokio::test)]
    async fn submission_inserts_answered_row() {
        let (store, wedding_id) = seeded().await;
        let rsvp = RsvpService::new(store.clone(), store, Reconciliation::Insert);

        let receipt = rsvp.submit(SLUG, submission("Anh Tuan", true)).await.expect("submit");
        let guest = receipt.guest;
        assert!(!receipt.matched_invitation);
        assert_eq!(guest.wedding_id, Some(wedding_id));
        assert_eq!(guest.attendance_status, Some(true));
        assert_eq!(guest.guest_count, Some(2));
        assert_eq!(guest.wish_message.as_deref(), Some("Chúc mừng hạnh phúc!"));
        assert_eq!(guest.status, GuestStatus::Confirmed);
    }

    // Resubmission is not deduplicated; candidate for reconciliation.
    #[test_log::test(tokio::test)]
    async fn same_name_twice_creates_two_rows() {
        let (store, _) = seeded().await;
        let rsvp = RsvpService::new(store.clone(), store.clone(), Reconciliation::Insert);

        let first = rsvp.submit(SLUG, submission("Anh Tuan", true)).await.expect("submit");
        let second = rsvp.submit(SLUG, submission("Anh Tuan", true)).await.expect("submit");

        assert_ne!(first.guest.id, second.guest.id);
        let rows = store.list(&GuestQuery::default()).await.expect("list");
        assert_eq!(rows.iter().filter(|g| g.guest_name == "Anh Tuan").count(), 2);
    }

    #[test_log::test(tokio::test)]
    async fn insert_mode_ignores_existing_invitation() {
        let (store, wedding_id) = seeded().await;
        store
            .insert(NewGuest::invitation(
                Some(wedding_id),
                "Anh Tuan".to_string(),
                None,
                "https://thiep.example/?to=Anh_Tuan".to_string(),
            ))
            .await
            .expect("insert");
        let rsvp = RsvpService::new(store.clone(), store.clone(), Reconciliation::Insert);

        rsvp.submit(SLUG, submission("Anh Tuan", false)).await.expect("submit");

        let rows = store.list(&GuestQuery::default()).await.expect("list");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.iter().filter(|g| g.has_responded()).count(), 1);
    }

    #[test_log::test(tokio::test)]
    async fn match_by_name_answers_invitation() {
        let (store, wedding_id) = seeded().await;
        let invited = store
            .insert(NewGuest::invitation(
                Some(wedding_id),
                "Anh Tuan".to_string(),
                None,
                "https://thiep.example/?to=Anh_Tuan".to_string(),
            ))
            .await
            .expect("insert");
        let rsvp = RsvpService::new(store.clone(), store.clone(), Reconciliation::MatchByName);

        let receipt = rsvp.submit(SLUG, submission("anh tuan", false)).await.expect("submit");
        assert!(receipt.matched_invitation);
        assert_eq!(receipt.guest.id, invited.id);
        assert_eq!(receipt.guest.status, GuestStatus::Declined);
        assert_eq!(receipt.guest.invite_link, invited.invite_link);

        // Already answered, so the next one inserts.
        let again = rsvp.submit(SLUG, submission("Anh Tuan", true)).await.expect("submit");
        assert!(!again.matched_invitation);
        assert_eq!(store.list(&GuestQuery::default()).await.expect("list").len(), 2);
    }

    #[test_log::test(tokio::test)]
    async fn invalid_submissions_are_rejected() {
        let (store, _) = seeded().await;
        let rsvp = RsvpService::new(store.clone(), store, Reconciliation::Insert);

        assert!(matches!(
            rsvp.submit(SLUG, submission("  ", true)).await,
            Err(ServiceError::ValidationError(_))
        ));

        let mut zero = submission("Anh Tuan", true);
        zero.guest_count = 0;
        assert!(matches!(
            rsvp.submit(SLUG, zero).await,
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test_log::test(tokio::test)]
    async fn blank_wish_is_stored_as_null() {
        let (store, _) = seeded().await;
        let rsvp = RsvpService::new(store.clone(), store, Reconciliation::Insert);
        let mut form = submission("Anh Tuan", true);
        form.wish_message = Some("   ".to_string());

        let receipt = rsvp.submit(SLUG, form).await.expect("submit");
        assert_eq!(receipt.guest.wish_message, None);
    }

    #[test_log::test(tokio::test)]
    async fn unknown_wedding_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let rsvp = RsvpService::new(store.clone(), store, Reconciliation::Insert);
        assert!(matches!(
            rsvp.submit(SLUG, submission("Anh Tuan", true)).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
