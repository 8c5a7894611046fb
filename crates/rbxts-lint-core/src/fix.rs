//! Applying automatic fixes to source text.

use crate::types::{Fix, TextEdit};

/// Outcome of [`apply_fixes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutput {
    /// Rewritten source.
    pub output: String,
    /// Number of fixes applied.
    pub applied: usize,
    /// Number of fixes skipped because they conflicted with an earlier one.
    pub skipped: usize,
    /// Positions, in input order, of the fixes that were applied.
    pub applied_indices: Vec<usize>,
}

impl FixOutput {
    /// Returns true if the fix at input position `index` was applied.
    #[must_use]
    pub fn was_applied(&self, index: usize) -> bool {
        self.applied_indices.binary_search(&index).is_ok()
    }
}

/// Applies `fixes` to `source` in one pass.
///
/// Fixes are taken in source order of their covered range. A fix whose range
/// starts before the end of an already accepted fix is skipped, and so is a
/// fix that inserts text exactly where the accepted one ends: two edits at
/// one offset could stack into a different expression. Running the linter
/// again picks skipped fixes up. Edits that fall outside `source` or off a
/// char boundary cause their whole fix to be skipped.
#[must_use]
pub fn apply_fixes<'a, I>(source: &str, fixes: I) -> FixOutput
where
    I: IntoIterator<Item = &'a Fix>,
{
    let mut ordered: Vec<(usize, usize, &Fix)> = fixes
        .into_iter()
        .enumerate()
        .filter_map(|(index, fix)| fix.range().map(|r| (r.start, index, fix)))
        .collect();
    ordered.sort_by_key(|(start, index, _)| (*start, *index));

    let mut accepted: Vec<&TextEdit> = Vec::new();
    let mut applied_indices = Vec::new();
    let mut last_end: Option<usize> = None;
    let mut skipped = 0;
    for (start, index, fix) in ordered {
        let in_bounds = fix.edits.iter().all(|e| {
            e.span.start <= e.span.end
                && source.is_char_boundary(e.span.start)
                && source.is_char_boundary(e.span.end)
        });
        let conflicts = last_end.is_some_and(|end| {
            let inserts_at_end = fix
                .edits
                .iter()
                .any(|e| e.span.is_empty() && e.span.start == end);
            start < end || (start == end && inserts_at_end)
        });
        if conflicts || !in_bounds {
            tracing::debug!(start, ?last_end, in_bounds, "skipping fix");
            skipped += 1;
            continue;
        }
        accepted.extend(fix.edits.iter());
        last_end = fix.range().map(|r| r.end).or(last_end);
        applied_indices.push(index);
    }
    applied_indices.sort_unstable();

    // Insertions sort before replacements starting at the same offset.
    accepted.sort_by_key(|e| (e.span.start, e.span.end));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in accepted {
        if edit.span.start < cursor {
            continue;
        }
        output.push_str(&source[cursor..edit.span.start]);
        output.push_str(&edit.new_text);
        cursor = edit.span.end;
    }
    output.push_str(&source[cursor..]);

    FixOutput {
        output,
        applied: applied_indices.len(),
        skipped,
        applied_indices,
    }
}
