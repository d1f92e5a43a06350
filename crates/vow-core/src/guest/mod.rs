pub mod identity;
pub mod invite;

pub use identity::{GuestView, QueryParams, Session, can_edit, can_view_dashboard, extract_guest_name};
pub use invite::invite_link;
