//! Editing operations on recognized line lists.

pub mod dedup;
pub mod merge;

pub use dedup::{deduplicate, restore, Deduplicated, Restored};
pub use merge::{merge, LineEdit};
