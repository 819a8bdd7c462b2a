use log::debug;
use serde::{Deserialize, Serialize};

use super::PageLayout;
use crate::config::{LayoutConfig, PreprocessingOptions};
use crate::geometry::Rect;
use crate::layout::{detect_zones, fallback_zone, filter_zones, page_lines, text_regions};
use crate::model::TextFragment;

/// Recognized fragments of one page together with the page rectangle their
/// bounds are expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFragments {
    #[serde(default = "Rect::unit")]
    pub page: Rect,
    pub fragments: Vec<TextFragment>,
}

impl PageFragments {
    pub fn new(page: Rect, fragments: Vec<TextFragment>) -> Self {
        Self { page, fragments }
    }
}

/// Lays out one page: zones (when enabled) and reading-order lines.
pub fn process(
    page_index: usize,
    input: &PageFragments,
    preprocessing: &PreprocessingOptions,
    layout: &LayoutConfig,
) -> PageLayout {
    let page = input.page;

    let zones = if preprocessing.auto_detect_zones {
        filter_zones(
            detect_zones(&input.fragments, &page),
            preprocessing.minimum_zone_confidence,
            &page,
        )
    } else {
        vec![fallback_zone(&page)]
    };

    let text_regions = if preprocessing.detect_text_regions {
        zones
            .iter()
            .map(|zone| text_regions(zone, &input.fragments))
            .collect()
    } else {
        Vec::new()
    };

    let lines = page_lines(&input.fragments, &page, layout);
    debug!(
        "Page {}: {} fragments, {} zones, {} lines",
        page_index,
        input.fragments.len(),
        zones.len(),
        lines.len()
    );

    PageLayout {
        page_index,
        page,
        zones,
        text_regions,
        lines,
    }
}

/// Lays out every page independently, keeping input order.
pub fn process_pages(
    pages: &[PageFragments],
    preprocessing: &PreprocessingOptions,
    layout: &LayoutConfig,
) -> Vec<PageLayout> {
    pages
        .iter()
        .enumerate()
        .map(|(index, page)| process(index, page, preprocessing, layout))
        .collect()
}
