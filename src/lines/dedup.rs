use log::debug;
use std::collections::HashSet;

use crate::model::DuplicateRecord;

/// Result of [`deduplicate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduplicated {
    pub kept: Vec<String>,
    pub removed: Vec<DuplicateRecord>,
}

/// Result of [`restore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restored {
    pub lines: Vec<String>,
    /// Final position of every restored line, ascending. Positions of lines
    /// that were already present may have moved, so index-based selections
    /// held by the caller need remapping or clearing.
    pub inserted_at: Vec<usize>,
    /// Records that were not selected, re-based onto `lines` so they can be
    /// restored later.
    pub remaining: Vec<DuplicateRecord>,
}

/// Removes repeated lines, keeping the first occurrence.
///
/// Lines are compared after trimming, case-sensitively. Blank lines are
/// never treated as duplicates.
pub fn deduplicate<S: AsRef<str>>(lines: &[S]) -> Deduplicated {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut result = Deduplicated::default();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let key = line.trim();
        if key.is_empty() || seen.insert(key) {
            result.kept.push(line.to_string());
        } else {
            result.removed.push(DuplicateRecord {
                original_index: index,
                kept_position: result.kept.len(),
                text: line.to_string(),
            });
        }
    }

    debug!(
        "Deduplicated {} lines: kept {}, removed {}",
        lines.len(),
        result.kept.len(),
        result.removed.len()
    );
    result
}

/// Puts selected removed lines back.
///
/// `selected` indexes into `removed`. Selections are applied in ascending
/// order; the k-th one goes to `kept_position + k`, clamped to the current
/// length, so restoring every record rebuilds the original sequence.
/// Unknown and repeated selections are ignored.
pub fn restore(kept: &[String], removed: &[DuplicateRecord], selected: &[usize]) -> Restored {
    let mut selected: Vec<usize> = selected
        .iter()
        .copied()
        .filter(|&index| index < removed.len())
        .collect();
    selected.sort_unstable();
    selected.dedup();

    let mut lines = kept.to_vec();
    let mut inserted_at = Vec::with_capacity(selected.len());

    for (offset, &index) in selected.iter().enumerate() {
        let record = &removed[index];
        let position = (record.kept_position + offset).min(lines.len());
        lines.insert(position, record.text.clone());
        inserted_at.push(position);
    }

    // Each restored record in front of a remaining one moves it down by one
    let remaining = removed
        .iter()
        .enumerate()
        .filter(|(index, _)| selected.binary_search(index).is_err())
        .map(|(index, record)| DuplicateRecord {
            kept_position: record.kept_position + selected.partition_point(|&s| s < index),
            ..record.clone()
        })
        .collect();

    Restored {
        lines,
        inserted_at,
        remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_trimmed_case_sensitive_comparison() {
        let lines = ["1 egg", "  1 egg ", "1 Egg"];
        let result = deduplicate(&lines);
        assert_eq!(result.kept, strings(&["1 egg", "1 Egg"]));
        assert_eq!(result.removed.len(), 1);
        assert_eq!(result.removed[0].original_index, 1);
        assert_eq!(result.removed[0].kept_position, 1);
        assert_eq!(result.removed[0].text, "  1 egg ");
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let lines = ["a", "", "b", "  ", "", "a"];
        let result = deduplicate(&lines);
        assert_eq!(result.kept, strings(&["a", "", "b", "  ", ""]));
        assert_eq!(result.removed.len(), 1);
    }

    #[test]
    fn test_restore_ignores_bad_selections() {
        let result = deduplicate(&["a", "a"]);
        let restored = restore(&result.kept, &result.removed, &[5, 0, 0]);
        assert_eq!(restored.lines, strings(&["a", "a"]));
        assert_eq!(restored.inserted_at, vec![1]);
    }

    #[test]
    fn test_remaining_records_restore_later() {
        let lines = strings(&["A", "B", "A", "C", "B", "A"]);
        let result = deduplicate(&lines);
        assert_eq!(result.removed.len(), 3);

        let first = restore(&result.kept, &result.removed, &[1]);
        assert_eq!(first.lines, strings(&["A", "B", "C", "B"]));
        assert_eq!(first.remaining.len(), 2);

        let second = restore(&first.lines, &first.remaining, &[0, 1]);
        assert_eq!(second.lines, lines);
    }

    #[test]
    fn test_restore_nothing() {
        let result = deduplicate(&["a", "b", "a"]);
        let restored = restore(&result.kept, &result.removed, &[]);
        assert_eq!(restored.lines, result.kept);
        assert!(restored.inserted_at.is_empty());
    }
}
