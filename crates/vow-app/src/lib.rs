//! HTTP layer of the invitation backend.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services_handler;
