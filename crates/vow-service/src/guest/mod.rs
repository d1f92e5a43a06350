pub mod live;
pub mod registry;
pub mod rsvp;
pub mod stats;

pub use live::{GuestSource, LiveGuestList, LiveSnapshot, LoadState};
pub use registry::{GuestRegistry, GuestUpdate};
pub use rsvp::{RsvpReceipt, RsvpService, RsvpSubmission};
pub use stats::{GuestStats, compute_stats};
