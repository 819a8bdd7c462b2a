/// A line list after an edit, with the selection contract for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub lines: Vec<String>,
    /// True when positions shifted; every index-based selection on the old
    /// list must be dropped.
    pub invalidate_selections: bool,
}

/// Merges the line at `source` into the line at `dest`.
///
/// The merged text, `lines[source] + " " + lines[dest]`, takes the lower of
/// the two positions and the higher one is removed. Equal or out-of-range
/// indices leave the list untouched.
pub fn merge<S: AsRef<str>>(lines: &[S], source: usize, dest: usize) -> LineEdit {
    let mut merged: Vec<String> = lines.iter().map(|line| line.as_ref().to_string()).collect();

    if source == dest || source >= merged.len() || dest >= merged.len() {
        return LineEdit {
            lines: merged,
            invalidate_selections: false,
        };
    }

    let text = format!("{} {}", merged[source], merged[dest]);
    let (low, high) = (source.min(dest), source.max(dest));
    merged[low] = text;
    merged.remove(high);

    LineEdit {
        lines: merged,
        invalidate_selections: true,
    }
}
