//! Business services of the invitation backend: admin authentication, content
//! loading and editing, guest registry, RSVP intake, statistics and the live
//! guest list.

pub mod auth;
pub mod content;
pub mod error;
pub mod guest;
