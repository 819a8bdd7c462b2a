use crate::geometry::Rect;
use crate::model::{Row, TextFragment};

/// Centre-x positions needed before a column divider is looked for.
const MIN_DIVIDER_FRAGMENTS: usize = 5;
/// The divider must sit inside this band of the page width.
const DIVIDER_BAND: (f64, f64) = (0.3, 0.7);
/// Smallest accepted gap, as a share of the page width.
const MIN_DIVIDER_GAP: f64 = 0.05;

/// Whether a row holds parallel columns rather than one line of text.
///
/// True when any horizontal gap between neighbouring fragments, taken in
/// left-to-right order, is wider than `column_gap`.
pub fn is_multi_column(row: &[TextFragment], column_gap: f64) -> bool {
    let mut sorted: Vec<&TextFragment> = row.iter().collect();
    sorted.sort_by(|a, b| a.bounds.left().total_cmp(&b.bounds.left()));
    sorted
        .windows(2)
        .any(|pair| pair[0].bounds.horizontal_gap(&pair[1].bounds) > column_gap)
}

/// Reading lines for one row: one per fragment for multi-column rows,
/// otherwise a single space-joined line.
pub fn row_lines(row: &Row, column_gap: f64) -> Vec<String> {
    let mut sorted: Vec<&TextFragment> = row.fragments.iter().collect();
    sorted.sort_by(|a, b| a.bounds.left().total_cmp(&b.bounds.left()));
    let texts = sorted
        .iter()
        .map(|fragment| fragment.text.trim())
        .filter(|text| !text.is_empty());

    if is_multi_column(&row.fragments, column_gap) {
        texts.map(str::to_string).collect()
    } else {
        let joined = texts.collect::<Vec<_>>().join(" ");
        if joined.is_empty() {
            Vec::new()
        } else {
            vec![joined]
        }
    }
}

/// Looks for a vertical gutter between two page columns.
///
/// Returns the x position (page units) halfway across the widest gap
/// between fragment centres, when that gap lies in the middle of the page
/// and is wider than 5% of the page width.
pub fn detect_column_divider(fragments: &[TextFragment], page: &Rect) -> Option<f64> {
    if fragments.len() <= MIN_DIVIDER_FRAGMENTS || page.is_empty() {
        return None;
    }

    let mut centres: Vec<f64> = fragments
        .iter()
        .map(|fragment| (fragment.bounds.center_x() - page.x) / page.width)
        .collect();
    centres.sort_by(f64::total_cmp);

    let (low, high) = DIVIDER_BAND;
    let mut best: Option<(f64, f64)> = None;
    for pair in centres.windows(2) {
        let gap = pair[1] - pair[0];
        let midpoint = (pair[0] + pair[1]) / 2.0;
        if midpoint > low && midpoint < high && best.map_or(true, |(widest, _)| gap > widest) {
            best = Some((gap, midpoint));
        }
    }

    best.filter(|(gap, _)| *gap > MIN_DIVIDER_GAP)
        .map(|(_, midpoint)| page.x + midpoint * page.width)
}
