pub mod defaults;
pub mod edit;
pub mod model;
pub mod resolve;

pub use defaults::default_content;
pub use edit::{ContentEdit, apply_edit, apply_edits};
pub use model::{ContentRecord, Details, EventInfo, Milestone, MilestoneIcon, PartialContentRecord};
pub use resolve::resolve;
