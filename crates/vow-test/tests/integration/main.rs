//! HTTP-level tests against the full router on the in-memory store.

mod helpers;

mod auth;
mod content;
mod guests;
mod invitation;
mod rsvp;
