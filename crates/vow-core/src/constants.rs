/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const INVITATION_ROUTE_COMPONENT: &str = "invitation";
pub const INVITATION_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", INVITATION_ROUTE_COMPONENT);

pub const RSVP_ROUTE_COMPONENT: &str = "rsvp";
pub const RSVP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", RSVP_ROUTE_COMPONENT);

pub const WISHES_ROUTE_COMPONENT: &str = "wishes";
pub const WISHES_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", WISHES_ROUTE_COMPONENT);

/// Wedding served when no slug is configured.
pub const DEFAULT_WEDDING_SLUG: &str = "trang-chien-2026";

/// Admin route segment used when none is configured.
pub const DEFAULT_ADMIN_PATH: &str = "admin";

/// Session cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "vow_session";

/// Number of wishes shown in the public guestbook.
pub const GUESTBOOK_LIMIT: usize = 6;
