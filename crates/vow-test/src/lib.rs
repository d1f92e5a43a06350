//! Wedding invitation backend - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every
//! layer through one dependency.

pub use vow_app as app;
pub use vow_core as domain;
pub use vow_db as db;
pub use vow_service as service;
