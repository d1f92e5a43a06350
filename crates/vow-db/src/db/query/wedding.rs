//! Query builder functions for weddings.

use diesel::prelude::*;

use crate::db::schema::weddings;

/// ## Summary
/// Returns a query to find a wedding by its slug.
#[must_use]
pub fn by_slug(slug: &str) -> weddings::BoxedQuery<'_, diesel::pg::Pg> {
    weddings::table
        .filter(weddings::slug.eq(slug))
        .into_boxed()
}
