//! Query builder functions for guests. Lists are newest first.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Bool;

use super::escape_like;
use crate::db::schema::guests;

/// Filters applied when listing guests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestQuery {
    /// Owning wedding; `None` lists every wedding's guests.
    pub wedding_id: Option<uuid::Uuid>,
    /// Case-insensitive substring of `guest_name`.
    pub search: Option<String>,
}

impl GuestQuery {
    #[must_use]
    pub fn for_wedding(wedding_id: Option<uuid::Uuid>) -> Self {
        Self {
            wedding_id,
            search: None,
        }
    }

    /// In-memory counterpart of [`filtered`].
    #[must_use]
    pub fn matches(&self, guest: &crate::model::Guest) -> bool {
        let in_scope = self
            .wedding_id
            .is_none_or(|id| guest.wedding_id == Some(id));
        let found = self.search.as_deref().is_none_or(|needle| {
            guest
                .guest_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        in_scope && found
    }
}

/// ## Summary
/// Returns a query to select all guests, newest first.
#[must_use]
pub fn all() -> guests::BoxedQuery<'static, diesel::pg::Pg> {
    guests::table
        .order((guests::created_at.desc(), guests::id.desc()))
        .into_boxed()
}

/// ## Summary
/// Returns a query to find a guest by ID.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> guests::BoxedQuery<'static, diesel::pg::Pg> {
    guests::table.filter(guests::id.eq(id)).into_boxed()
}

/// ## Summary
/// Returns a query applying `filter` to the newest-first guest list.
#[must_use]
pub fn filtered(filter: &GuestQuery) -> guests::BoxedQuery<'static, diesel::pg::Pg> {
    let mut query = all();
    if let Some(wedding_id) = filter.wedding_id {
        query = query.filter(guests::wedding_id.eq(wedding_id));
    }
    if let Some(search) = filter.search.as_deref() {
        query = query.filter(guests::guest_name.ilike(format!("%{}%", escape_like(search))));
    }
    query
}

/// ## Summary
/// Returns a query for the newest guests of a wedding that left a wish.
/// Whitespace-only wishes are skipped, matching [`crate::model::Guest::wish`].
#[must_use]
pub fn with_wish(wedding_id: uuid::Uuid) -> guests::BoxedQuery<'static, diesel::pg::Pg> {
    all()
        .filter(guests::wedding_id.eq(wedding_id))
        .filter(guests::wish_message.is_not_null())
        .filter(sql::<Bool>("btrim(guests.wish_message) <> ''"))
}

/// ## Summary
/// Returns a query for unanswered invitations whose name equals `guest_name`
/// ignoring case, newest first.
#[must_use]
pub fn unanswered_by_name(
    wedding_id: uuid::Uuid,
    guest_name: &str,
) -> guests::BoxedQuery<'static, diesel::pg::Pg> {
    all()
        .filter(guests::wedding_id.eq(wedding_id))
        .filter(guests::attendance_status.is_null())
        .filter(guests::guest_name.ilike(escape_like(guest_name)))
}
