use log::debug;

use crate::config::LayoutConfig;
use crate::model::{Row, TextFragment};

/// Groups fragments into horizontal rows, top of the page first.
///
/// Fragments are visited by descending top edge. A fragment joins the
/// current row when its top is within the row threshold of the row's
/// anchor, which is the top of the fragment that opened the row. The anchor
/// never moves, so a slowly drifting baseline eventually starts a new row.
pub fn group_into_rows(
    fragments: &[TextFragment],
    page_height: f64,
    config: &LayoutConfig,
) -> Vec<Row> {
    let threshold = config.row_threshold(page_height);

    let mut sorted: Vec<&TextFragment> = fragments.iter().collect();
    sorted.sort_by(|a, b| b.bounds.top().total_cmp(&a.bounds.top()));

    let mut rows: Vec<Row> = Vec::new();
    for fragment in sorted {
        let top = fragment.bounds.top();
        match rows.last_mut() {
            Some(row) if (top - row.anchor_top).abs() <= threshold => {
                row.fragments.push(fragment.clone());
            }
            _ => rows.push(Row {
                anchor_top: top,
                fragments: vec![fragment.clone()],
            }),
        }
    }

    debug!(
        "Grouped {} fragments into {} rows (threshold {:.3})",
        fragments.len(),
        rows.len(),
        threshold
    );
    rows
}

/// Top-to-bottom, left-to-right order without column handling.
///
/// Fragments whose tops lie within `tolerance` of the first fragment of a
/// band are read left to right; each fragment stays its own entry.
pub fn sequential_order(fragments: &[TextFragment], tolerance: f64) -> Vec<&TextFragment> {
    let mut sorted: Vec<&TextFragment> = fragments.iter().collect();
    sorted.sort_by(|a, b| b.bounds.top().total_cmp(&a.bounds.top()));

    let mut bands: Vec<(f64, Vec<&TextFragment>)> = Vec::new();
    for fragment in sorted {
        let top = fragment.bounds.top();
        match bands.last_mut() {
            Some((anchor, band)) if *anchor - top <= tolerance => band.push(fragment),
            _ => bands.push((top, vec![fragment])),
        }
    }

    bands
        .into_iter()
        .flat_map(|(_, mut band)| {
            band.sort_by(|a, b| a.bounds.left().total_cmp(&b.bounds.left()));
            band
        })
        .collect()
}
