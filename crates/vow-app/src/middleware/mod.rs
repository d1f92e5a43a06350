pub mod require_admin;
pub mod session;
