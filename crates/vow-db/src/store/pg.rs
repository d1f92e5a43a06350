//! `PostgreSQL` backend.
//!
//! Change notifications are published in process after each successful write.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;
use tokio::sync::broadcast;

use super::{CHANGE_CHANNEL_CAPACITY, ChangeKind, GuestChange, GuestStore, WeddingStore, publish};
use crate::db::DbProvider;
use crate::db::connection::DbPool;
use crate::db::query::{self, guest::GuestQuery};
use crate::db::schema::{guests, weddings};
use crate::db::transaction::with_transaction;
use crate::error::{DbError, DbResult};
use crate::model::{
    Guest, GuestChangeset, GuestResponse, NewGuest, NewWedding, Wedding, WeddingContent,
};

// TODO: forward Postgres LISTEN/NOTIFY on `guests` so writes made by other
// instances reach subscribers too.
pub struct PgStore {
    pool: DbPool,
    changes: broadcast::Sender<GuestChange>,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { pool, changes }
    }
}

#[async_trait]
impl WeddingStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> DbResult<Option<Wedding>> {
        let mut conn = self.pool.get_connection().await?;

        let wedding = query::wedding::by_slug(slug)
            .first::<Wedding>(&mut conn)
            .await
            .optional()?;

        Ok(wedding)
    }

    #[tracing::instrument(skip(self, wedding), fields(slug = %wedding.slug))]
    async fn create(&self, wedding: NewWedding) -> DbResult<Wedding> {
        let mut conn = self.pool.get_connection().await?;

        diesel::insert_into(weddings::table)
            .values(&wedding)
            .returning(Wedding::as_select())
            .get_result::<Wedding>(&mut conn)
            .await
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    DbError::DuplicateSlug(wedding.slug.clone())
                }
                other => other.into(),
            })
    }

    #[tracing::instrument(skip(self, content), fields(wedding_id = %id))]
    async fn update_content(
        &self,
        id: uuid::Uuid,
        content: &WeddingContent,
    ) -> DbResult<Option<Wedding>> {
        let mut conn = self.pool.get_connection().await?;

        let wedding = diesel::update(weddings::table.find(id))
            .set(content)
            .returning(Wedding::as_select())
            .get_result::<Wedding>(&mut conn)
            .await
            .optional()?;

        Ok(wedding)
    }
}

#[async_trait]
impl GuestStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn list(&self, query: &GuestQuery) -> DbResult<Vec<Guest>> {
        let mut conn = self.pool.get_connection().await?;

        let guests = query::guest::filtered(query)
            .load::<Guest>(&mut conn)
            .await?;

        tracing::debug!(count = guests.len(), "Loaded guests");

        Ok(guests)
    }

    #[tracing::instrument(skip(self), fields(guest_id = %id))]
    async fn get(&self, id: uuid::Uuid) -> DbResult<Option<Guest>> {
        let mut conn = self.pool.get_connection().await?;

        let guest = query::guest::by_id(id)
            .first::<Guest>(&mut conn)
            .await
            .optional()?;

        Ok(guest)
    }

    #[tracing::instrument(skip(self, guest), fields(guest_id = %guest.id))]
    async fn insert(&self, guest: NewGuest) -> DbResult<Guest> {
        let mut conn = self.pool.get_connection().await?;

        let guest = diesel::insert_into(guests::table)
            .values(&guest)
            .returning(Guest::as_select())
            .get_result::<Guest>(&mut conn)
            .await?;

        publish(&self.changes, GuestChange::of(ChangeKind::Insert, &guest));

        Ok(guest)
    }

    #[tracing::instrument(skip(self, changes), fields(guest_id = %id))]
    async fn update(&self, id: uuid::Uuid, changes: &GuestChangeset) -> DbResult<Option<Guest>> {
        let mut conn = self.pool.get_connection().await?;

        let guest = diesel::update(guests::table.find(id))
            .set(changes)
            .returning(Guest::as_select())
            .get_result::<Guest>(&mut conn)
            .await
            .optional()?;

        if let Some(guest) = &guest {
            publish(&self.changes, GuestChange::of(ChangeKind::Update, guest));
        }

        Ok(guest)
    }

    #[tracing::instrument(skip(self), fields(guest_id = %id))]
    async fn delete(&self, id: uuid::Uuid) -> DbResult<bool> {
        let mut conn = self.pool.get_connection().await?;

        let deleted = diesel::delete(guests::table.find(id))
            .returning(Guest::as_select())
            .get_result::<Guest>(&mut conn)
            .await
            .optional()?;

        if let Some(guest) = &deleted {
            publish(&self.changes, GuestChange::of(ChangeKind::Delete, guest));
        }

        Ok(deleted.is_some())
    }

    #[tracing::instrument(skip(self), fields(wedding_id = %wedding_id))]
    async fn latest_wishes(&self, wedding_id: uuid::Uuid, limit: usize) -> DbResult<Vec<Guest>> {
        let mut conn = self.pool.get_connection().await?;

        let guests = query::guest::with_wish(wedding_id)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .load::<Guest>(&mut conn)
            .await?;

        Ok(guests)
    }

    #[tracing::instrument(skip(self, response), fields(wedding_id = %wedding_id))]
    async fn answer_invitation(
        &self,
        wedding_id: uuid::Uuid,
        guest_name: &str,
        response: &GuestResponse,
    ) -> DbResult<Option<Guest>> {
        let mut conn = self.pool.get_connection().await?;
        let name = guest_name.to_string();
        let changes = GuestChangeset::from_response(response);

        let answered = with_transaction(&mut conn, |conn| {
            async move {
                let Some(candidate) = query::guest::unanswered_by_name(wedding_id, &name)
                    .first::<Guest>(conn)
                    .await
                    .optional()?
                else {
                    return Ok(None);
                };

                // Another response may have landed since the read.
                let answered = diesel::update(
                    guests::table
                        .find(candidate.id)
                        .filter(guests::attendance_status.is_null()),
                )
                .set(&changes)
                .returning(Guest::as_select())
                .get_result::<Guest>(conn)
                .await
                .optional()?;

                Ok(answered)
            }
            .scope_boxed()
        })
        .await?;

        if let Some(guest) = &answered {
            publish(&self.changes, GuestChange::of(ChangeKind::Update, guest));
        }

        Ok(answered)
    }

    fn subscribe(&self) -> broadcast::Receiver<GuestChange> {
        self.changes.subscribe()
    }
}
