use recipe_scan::{deduplicate, merge, restore};

fn strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

fn restore_all(lines: &[String]) -> Vec<String> {
    let result = deduplicate(lines);
    let all: Vec<usize> = (0..result.removed.len()).collect();
    restore(&result.kept, &result.removed, &all).lines
}

#[test]
fn test_restoring_everything_rebuilds_the_input() {
    let cases = [
        vec!["A", "A", "A", "B"],
        vec!["A", "B", "A", "C", "B", "A"],
        vec!["Curry", "", "2 cups rice", "", "2 cups rice", "Curry", "Heat oil."],
        vec!["x", " x", "x ", "X"],
        vec![],
    ];
    for case in cases {
        let lines = strings(&case);
        assert_eq!(restore_all(&lines), lines, "round trip of {:?}", case);
    }
}

#[test]
fn test_partial_restore_lands_in_original_place() {
    let lines = strings(&["Title", "1 onion", "1 onion", "2 cups rice", "1 onion"]);
    let result = deduplicate(&lines);
    assert_eq!(result.kept, strings(&["Title", "1 onion", "2 cups rice"]));
    assert_eq!(result.removed.len(), 2);

    // Only the last repeat: after "2 cups rice", as in the input
    let last = restore(&result.kept, &result.removed, &[1]);
    assert_eq!(
        last.lines,
        strings(&["Title", "1 onion", "2 cups rice", "1 onion"])
    );
    assert_eq!(last.inserted_at, vec![3]);

    // Only the first repeat: right after its original
    let first = restore(&result.kept, &result.removed, &[0]);
    assert_eq!(
        first.lines,
        strings(&["Title", "1 onion", "1 onion", "2 cups rice"])
    );

    // Selection order does not matter
    let both = restore(&result.kept, &result.removed, &[1, 0]);
    assert_eq!(both.lines, lines);
    assert_eq!(both.inserted_at, vec![2, 4]);
}

#[test]
fn test_two_repeats_of_line_one_and_one_of_line_four() {
    // Five distinct lines; line 1 is repeated twice, line 4 once
    let lines = strings(&[
        "Curry",
        "1 onion",
        "1 onion",
        "1 onion",
        "2 cups rice",
        "1 tbsp oil",
        "Heat oil and cook.",
        "Heat oil and cook.",
    ]);
    let result = deduplicate(&lines);
    assert_eq!(
        result.kept,
        strings(&["Curry", "1 onion", "2 cups rice", "1 tbsp oil", "Heat oil and cook."])
    );
    let positions: Vec<usize> = result.removed.iter().map(|r| r.kept_position).collect();
    assert_eq!(positions, vec![2, 2, 5]);

    // Only the repeat of line 4 goes back, right after line 4
    let only_last = restore(&result.kept, &result.removed, &[2]);
    assert_eq!(only_last.inserted_at, vec![5]);
    assert_eq!(only_last.lines[4], "Heat oil and cook.");
    assert_eq!(only_last.lines[5], "Heat oil and cook.");
    assert_eq!(only_last.lines.len(), 6);

    // Both repeats of line 1 land next to each other, right after it
    let both_first = restore(&result.kept, &result.removed, &[0, 1]);
    assert_eq!(both_first.inserted_at, vec![2, 3]);
    assert_eq!(
        both_first.lines,
        strings(&[
            "Curry",
            "1 onion",
            "1 onion",
            "1 onion",
            "2 cups rice",
            "1 tbsp oil",
            "Heat oil and cook.",
        ])
    );
}

#[test]
fn test_repeats_of_one_line_stay_consecutive() {
    let lines = strings(&["A", "A", "A", "B"]);
    let result = deduplicate(&lines);
    let restored = restore(&result.kept, &result.removed, &[0, 1]);
    assert_eq!(restored.lines, lines);
    assert_eq!(restored.inserted_at, vec![1, 2]);
}

#[test]
fn test_remaining_records_restore_later() {
    let lines = strings(&["A", "B", "A", "C", "B", "A"]);
    let result = deduplicate(&lines);

    let step = restore(&result.kept, &result.removed, &[1]);
    assert_eq!(step.remaining.len(), 2);
    let all: Vec<usize> = (0..step.remaining.len()).collect();
    let rebuilt = restore(&step.lines, &step.remaining, &all);
    assert_eq!(rebuilt.lines, lines);
}

#[test]
fn test_dedup_is_idempotent() {
    let lines = strings(&["A", "B", "A", "", "", "C", "B"]);
    let once = deduplicate(&lines);
    let twice = deduplicate(&once.kept);
    assert_eq!(twice.kept, once.kept);
    assert!(twice.removed.is_empty());
}

#[test]
fn test_merge_drops_exactly_one_line() {
    let lines = strings(&["2 cups", "flour", "1 egg", "Mix well."]);
    for source in 0..lines.len() {
        for dest in 0..lines.len() {
            if source == dest {
                continue;
            }
            let edit = merge(&lines, source, dest);
            assert_eq!(edit.lines.len(), lines.len() - 1);
            assert_eq!(
                edit.lines[source.min(dest)],
                format!("{} {}", lines[source], lines[dest])
            );
            assert!(edit.invalidate_selections);
        }
    }
}

#[test]
fn test_merge_out_of_range_is_a_no_op() {
    let lines = strings(&["a", "b"]);
    let edit = merge(&lines, 1, 2);
    assert_eq!(edit.lines, lines);
    assert!(!edit.invalidate_selections);
}
