//! Transaction helper for multi-statement store operations.

use diesel_async::{AsyncConnection, AsyncPgConnection, scoped_futures::ScopedBoxFuture};

use crate::error::{DbError, DbResult};

/// ## Summary
/// Runs `callback` inside a transaction and returns its result.
///
/// Takes the bare connection so a pooled one can be passed as `&mut conn`
/// and coerce through `DerefMut`.
///
/// ## Errors
/// Returns any error produced by the callback, or errors raised while starting
/// or committing the transaction. The transaction is rolled back on error.
pub async fn with_transaction<'a, T, F>(conn: &mut AsyncPgConnection, callback: F) -> DbResult<T>
where
    F: for<'r> FnOnce(&'r mut AsyncPgConnection) -> ScopedBoxFuture<'a, 'r, DbResult<T>>
        + Send
        + 'a,
    T: Send + 'a,
{
    conn.transaction::<_, DbError, _>(callback).await
}
