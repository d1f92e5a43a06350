//! Domain core for the wedding invitation backend: configuration, the content
//! record with its merge and edit rules, and guest identity handling.

pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod guest;
pub mod util;
