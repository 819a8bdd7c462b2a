//! Turning positioned fragments into reading-order lines and page zones.

pub mod columns;
pub mod rows;
pub mod zones;

pub use columns::{detect_column_divider, is_multi_column, row_lines};
pub use rows::{group_into_rows, sequential_order};
pub use zones::{detect_zones, fallback_zone, filter_zones, text_regions};

use crate::config::{LayoutConfig, ReadingOrder};
use crate::geometry::Rect;
use crate::model::TextFragment;

/// Band tolerance for sequential reading, as a share of page height.
pub const SEQUENTIAL_TOLERANCE: f64 = 0.02;

/// Reading-order lines for one page.
pub fn page_lines(fragments: &[TextFragment], page: &Rect, config: &LayoutConfig) -> Vec<String> {
    match config.reading_order {
        ReadingOrder::Rows => group_into_rows(fragments, page.height, config)
            .iter()
            .flat_map(|row| row_lines(row, config.column_gap))
            .collect(),
        ReadingOrder::Sequential => {
            sequential_order(fragments, page.height * SEQUENTIAL_TOLERANCE)
                .into_iter()
                .map(|fragment| fragment.text.trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .collect()
        }
    }
}
