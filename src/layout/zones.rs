use log::debug;

use crate::geometry::{bounding_rect, Rect};
use crate::model::{TextFragment, Zone, ZoneKind};

/// Normalized centre height above which a fragment belongs to the title band.
pub const TITLE_BAND_FLOOR: f64 = 0.8;
/// Normalized centre height above which a fragment belongs to the upper body.
pub const BODY_BAND_FLOOR: f64 = 0.4;
/// Padding added around each zone, as a share of its own size.
pub const ZONE_PADDING: f64 = 0.05;
/// Left edges closer together than this (normalized) read as a list.
pub const LIST_ALIGNMENT_STDDEV: f64 = 0.05;

pub const TITLE_CONFIDENCE: f32 = 0.8;
pub const BODY_CONFIDENCE: f32 = 0.7;
pub const FALLBACK_CONFIDENCE: f32 = 1.0;

/// Splits a page into title and body zones by vertical position.
///
/// Zones are returned top to bottom in page coordinates. A page without
/// fragments yields the single full-page fallback zone.
pub fn detect_zones(fragments: &[TextFragment], page: &Rect) -> Vec<Zone> {
    if fragments.is_empty() {
        return vec![fallback_zone(page)];
    }

    let mut title = Vec::new();
    let mut upper = Vec::new();
    let mut lower = Vec::new();
    for fragment in fragments {
        let centre = fragment.bounds.normalized_within(page).center_y();
        if centre > TITLE_BAND_FLOOR {
            title.push(fragment);
        } else if centre > BODY_BAND_FLOOR {
            upper.push(fragment);
        } else {
            lower.push(fragment);
        }
    }

    let mut zones = Vec::with_capacity(3);
    if let Some(zone) = band_zone(&title, page, ZoneKind::Title, TITLE_CONFIDENCE) {
        zones.push(zone);
    }
    let upper_kind = if is_list_layout(&upper, page) {
        ZoneKind::Ingredients
    } else {
        ZoneKind::Instructions
    };
    if let Some(zone) = band_zone(&upper, page, upper_kind, BODY_CONFIDENCE) {
        zones.push(zone);
    }
    if let Some(zone) = band_zone(&lower, page, ZoneKind::Instructions, BODY_CONFIDENCE) {
        zones.push(zone);
    }

    debug!(
        "Detected zones: {}",
        zones
            .iter()
            .map(|zone| zone.kind.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    zones
}

/// The whole page as one ingredient zone.
pub fn fallback_zone(page: &Rect) -> Zone {
    Zone {
        kind: ZoneKind::Ingredients,
        bounds: *page,
        confidence: FALLBACK_CONFIDENCE,
    }
}

/// Drops zones under `minimum_confidence`, falling back to the full page
/// when none remain.
pub fn filter_zones(zones: Vec<Zone>, minimum_confidence: f32, page: &Rect) -> Vec<Zone> {
    let kept: Vec<Zone> = zones
        .into_iter()
        .filter(|zone| zone.confidence >= minimum_confidence)
        .collect();
    if kept.is_empty() {
        vec![fallback_zone(page)]
    } else {
        kept
    }
}

/// Bounds of the fragments whose centre lies inside `zone`.
pub fn text_regions(zone: &Zone, fragments: &[TextFragment]) -> Vec<Rect> {
    fragments
        .iter()
        .map(|fragment| fragment.bounds)
        .filter(|bounds| zone.bounds.contains_point(bounds.center_x(), bounds.center_y()))
        .collect()
}

fn band_zone(
    fragments: &[&TextFragment],
    page: &Rect,
    kind: ZoneKind,
    confidence: f32,
) -> Option<Zone> {
    let union = bounding_rect(fragments.iter().map(|fragment| &fragment.bounds))?;
    Some(Zone {
        kind,
        bounds: union.expanded(ZONE_PADDING, page),
        confidence,
    })
}

/// Left-aligned blocks of more than two fragments read as a list.
fn is_list_layout(fragments: &[&TextFragment], page: &Rect) -> bool {
    if fragments.len() <= 2 {
        return false;
    }
    let lefts: Vec<f64> = fragments
        .iter()
        .map(|fragment| fragment.bounds.normalized_within(page).left())
        .collect();
    let count = lefts.len() as f64;
    let mean = lefts.iter().sum::<f64>() / count;
    let variance = lefts.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count;
    variance.sqrt() < LIST_ALIGNMENT_STDDEV
}
