mod admin;
mod app_specific;
mod invitation;
mod rsvp;
mod wishes;

use salvo::Router;

use crate::middleware::session::SessionMiddleware;

// Re-export route constants from core
pub use vow_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APP_ROUTE_COMPONENT, APP_ROUTE_PREFIX,
    INVITATION_ROUTE_COMPONENT, INVITATION_ROUTE_PREFIX, RSVP_ROUTE_COMPONENT, RSVP_ROUTE_PREFIX,
    WISHES_ROUTE_COMPONENT, WISHES_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router: public invitation endpoints plus the admin API
/// mounted under `admin_path`.
#[must_use]
pub fn routes(admin_path: &str) -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .hoop(SessionMiddleware)
        .push(app_specific::routes())
        .push(invitation::routes())
        .push(rsvp::routes())
        .push(wishes::routes())
        .push(admin::routes(admin_path))
}
