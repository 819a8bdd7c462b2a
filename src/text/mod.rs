//! Line-level text parsing: section segmentation and ingredient fields.

pub mod ingredient;
pub mod segment;
pub mod vocabulary;

pub use ingredient::{combine_split_lines, parse_ingredient, parse_ingredients};
pub use segment::{find_sections, segment, Sections};
pub use vocabulary::is_instruction_line;
