pub mod editor;
pub mod loader;

pub use editor::{ContentEditor, Draft};
pub use loader::{ContentLoader, ContentSource, LoadedContent};
