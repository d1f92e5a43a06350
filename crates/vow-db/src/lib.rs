//! Persistence for weddings and guests: diesel schema and rows, and the
//! store traits with their `PostgreSQL` and in-memory backends.

pub mod db;
pub mod error;
pub mod model;
pub mod store;
