pub mod guest;
pub mod wedding;

pub use guest::{Guest, GuestChangeset, GuestResponse, NewGuest};
pub use wedding::{NewWedding, Wedding, WeddingContent};
