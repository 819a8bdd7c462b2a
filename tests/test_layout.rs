use recipe_scan::layout::{
    detect_column_divider, detect_zones, filter_zones, group_into_rows, is_multi_column,
    page_lines, text_regions,
};
use recipe_scan::{LayoutConfig, ReadingOrder, Rect, TextFragment, ZoneKind};

fn page() -> Rect {
    Rect::new(0.0, 0.0, 600.0, 800.0)
}

fn fragment(text: &str, x: f64, y: f64, width: f64) -> TextFragment {
    TextFragment::new(text, Rect::new(x, y, width, 10.0))
}

#[test]
fn test_rows_keep_their_first_anchor() {
    // Threshold on an 800 unit page is capped at 20
    let fragments = vec![
        fragment("a", 0.0, 690.0, 10.0),
        fragment("b", 20.0, 680.0, 10.0),
        fragment("c", 40.0, 671.0, 10.0),
        fragment("d", 60.0, 669.0, 10.0),
    ];
    let rows = group_into_rows(&fragments, 800.0, &LayoutConfig::default());

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].anchor_top, 700.0);
    let first: Vec<&str> = rows[0].fragments.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(first, vec!["a", "b", "c"]);
    assert_eq!(rows[1].fragments[0].text, "d");
}

#[test]
fn test_rows_within_threshold_share_a_row() {
    let tops = [500.0, 495.0, 488.0, 481.0];
    let fragments: Vec<TextFragment> = tops
        .iter()
        .enumerate()
        .map(|(i, top)| fragment(&i.to_string(), i as f64 * 50.0, top - 10.0, 20.0))
        .collect();
    let rows = group_into_rows(&fragments, 800.0, &LayoutConfig::default());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fragments.len(), 4);
}

#[test]
fn test_small_pages_use_proportional_threshold() {
    // 100 unit page: threshold 10
    let fragments = vec![fragment("a", 0.0, 80.0, 10.0), fragment("b", 20.0, 69.0, 10.0)];
    let rows = group_into_rows(&fragments, 100.0, &LayoutConfig::default());
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_column_gap_boundary() {
    let left = fragment("2 cups sugar", 0.0, 500.0, 100.0);
    let wide = [left.clone(), fragment("250 ml", 131.0, 500.0, 40.0)];
    let narrow = [left, fragment("sugar", 129.0, 500.0, 40.0)];

    assert!(is_multi_column(&wide, 30.0));
    assert!(!is_multi_column(&narrow, 30.0));
}

#[test]
fn test_page_lines_keep_columns_apart() {
    let fragments = vec![
        fragment("Pancakes", 50.0, 750.0, 120.0),
        fragment("250 ml", 400.0, 600.0, 60.0),
        fragment("2 cups sugar", 50.0, 600.0, 120.0),
        fragment("2 cups", 50.0, 550.0, 50.0),
        fragment("flour", 105.0, 550.0, 40.0),
    ];
    let lines = page_lines(&fragments, &page(), &LayoutConfig::default());
    assert_eq!(lines, vec!["Pancakes", "2 cups sugar", "250 ml", "2 cups flour"]);
}

#[test]
fn test_sequential_reading_order() {
    let fragments = vec![
        fragment("flour", 105.0, 550.0, 40.0),
        fragment("2 cups", 50.0, 550.0, 50.0),
        fragment("Pancakes", 50.0, 750.0, 120.0),
    ];
    let config = LayoutConfig {
        reading_order: ReadingOrder::Sequential,
        ..LayoutConfig::default()
    };
    let lines = page_lines(&fragments, &page(), &config);
    assert_eq!(lines, vec!["Pancakes", "2 cups", "flour"]);
}

#[test]
fn test_column_divider_between_two_columns() {
    let mut fragments = Vec::new();
    for i in 0..4 {
        let y = 600.0 - i as f64 * 40.0;
        fragments.push(fragment("left", 40.0, y, 160.0));
        fragments.push(fragment("right", 380.0, y, 160.0));
    }
    let divider = detect_column_divider(&fragments, &page()).unwrap();
    assert!((divider - 290.0).abs() < 1e-9);

    assert!(detect_column_divider(&fragments[..4], &page()).is_none());
}

#[test]
fn test_zones_from_vertical_bands() {
    let fragments = vec![
        fragment("Curry", 50.0, 700.0, 100.0),
        fragment("2 cups rice", 50.0, 560.0, 120.0),
        fragment("1 onion", 50.0, 520.0, 80.0),
        fragment("1 tbsp oil", 50.0, 480.0, 100.0),
        fragment("Heat oil and cook.", 50.0, 200.0, 200.0),
    ];
    let zones = detect_zones(&fragments, &page());

    let kinds: Vec<ZoneKind> = zones.iter().map(|zone| zone.kind).collect();
    assert_eq!(
        kinds,
        vec![ZoneKind::Title, ZoneKind::Ingredients, ZoneKind::Instructions]
    );
    assert_eq!(zones[0].confidence, 0.8);
    assert_eq!(zones[1].confidence, 0.7);

    for zone in &zones {
        assert!(zone.bounds.left() >= 0.0 && zone.bounds.right() <= 600.0);
        assert!(zone.bounds.bottom() >= 0.0 && zone.bounds.top() <= 800.0);
    }
    assert_eq!(text_regions(&zones[1], &fragments).len(), 3);
}

#[test]
fn test_ragged_upper_body_reads_as_instructions() {
    let fragments = vec![
        fragment("Mix the flour", 50.0, 560.0, 120.0),
        fragment("with the sugar until", 200.0, 520.0, 120.0),
        fragment("smooth", 400.0, 480.0, 60.0),
    ];
    let zones = detect_zones(&fragments, &page());
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].kind, ZoneKind::Instructions);
}

#[test]
fn test_empty_page_falls_back_to_full_page() {
    let zones = detect_zones(&[], &page());
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].kind, ZoneKind::Ingredients);
    assert_eq!(zones[0].bounds, page());
    assert_eq!(zones[0].confidence, 1.0);

    let strict = filter_zones(
        detect_zones(&[fragment("Curry", 50.0, 700.0, 100.0)], &page()),
        0.9,
        &page(),
    );
    assert_eq!(strict, zones);
}
