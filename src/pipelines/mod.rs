pub mod fragments;
pub mod image;
pub mod text;

use serde::Serialize;

use crate::geometry::Rect;
use crate::model::Zone;

/// Everything learned about one page.
/// Zones and regions are empty when zone detection is switched off.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    /// Position of the page in the scan, starting at 0
    pub page_index: usize,
    /// Page rectangle the fragment bounds refer to
    pub page: Rect,
    pub zones: Vec<Zone>,
    /// Fragment bounds per zone, same order as `zones`
    pub text_regions: Vec<Vec<Rect>>,
    /// Reading-order lines of the page
    pub lines: Vec<String>,
}

/// Lines of all pages, in page order.
pub fn combined_lines(pages: &[PageLayout]) -> Vec<String> {
    pages.iter().flat_map(|page| page.lines.iter().cloned()).collect()
}
