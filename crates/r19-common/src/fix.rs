//! Text edits and fixes.
//!
//! A `Fix` is an immutable list of range-tagged replacements computed
//! against a snapshot of the original text. Offsets are never re-based after
//! an edit: the whole list is applied in one pass.

use serde::Serialize;
use thiserror::Error;

/// A single substitution of `[start, end)` with `new_text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub start: u32,
    pub end: u32,
    pub new_text: String,
}

impl TextEdit {
    pub fn replace(start: u32, end: u32, new_text: impl Into<String>) -> Self {
        TextEdit {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    pub fn insert(at: u32, new_text: impl Into<String>) -> Self {
        Self::replace(at, at, new_text)
    }

    pub fn remove(start: u32, end: u32) -> Self {
        Self::replace(start, end, String::new())
    }

    pub fn is_insertion(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("fix contains no edits")]
    Empty,

    #[error("edit range {start}..{end} is inverted")]
    InvertedRange { start: u32, end: u32 },

    #[error("edit range {start}..{end} exceeds source length {len}")]
    OutOfBounds { start: u32, end: u32, len: u32 },

    #[error("edit offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: u32 },

    #[error("edits {first:?} and {second:?} overlap")]
    Overlapping { first: (u32, u32), second: (u32, u32) },
}

/// An ordered, non-overlapping set of edits that eliminates one diagnosed
/// occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fix {
    edits: Vec<TextEdit>,
}

impl Fix {
    /// Validate and order `edits` against `source`.
    ///
    /// Edits are sorted by `(start, end)`; two edits may touch but must not
    /// intersect.
    pub fn new(source: &str, mut edits: Vec<TextEdit>) -> Result<Fix, EditError> {
        if edits.is_empty() {
            return Err(EditError::Empty);
        }
        let len = source.len() as u32;
        for edit in &edits {
            if edit.start > edit.end {
                return Err(EditError::InvertedRange {
                    start: edit.start,
                    end: edit.end,
                });
            }
            if edit.end > len {
                return Err(EditError::OutOfBounds {
                    start: edit.start,
                    end: edit.end,
                    len,
                });
            }
            for offset in [edit.start, edit.end] {
                if !source.is_char_boundary(offset as usize) {
                    return Err(EditError::NotCharBoundary { offset });
                }
            }
        }

        edits.sort_by_key(|e| (e.start, e.end));
        for pair in edits.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.end > next.start {
                return Err(EditError::Overlapping {
                    first: (prev.start, prev.end),
                    second: (next.start, next.end),
                });
            }
        }

        Ok(Fix { edits })
    }

    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Smallest range covering every edit.
    pub fn span(&self) -> (u32, u32) {
        let start = self.edits.first().map_or(0, |e| e.start);
        let end = self.edits.iter().map(|e| e.end).max().unwrap_or(start);
        (start, end)
    }

    /// Apply the edits to the source they were computed against.
    pub fn apply(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        let mut cursor = 0usize;
        for edit in &self.edits {
            out.push_str(&source[cursor..edit.start as usize]);
            out.push_str(&edit.new_text);
            cursor = edit.end as usize;
        }
        out.push_str(&source[cursor..]);
        out
    }
}

/// Apply as many of `fixes` as possible in one pass.
///
/// Fixes are taken in order of their span start; a fix whose span starts
/// before the end of an already accepted fix is skipped (it is picked up by
/// the next lint pass). Returns the new text and the indices of the applied
/// fixes.
pub fn apply_fixes(source: &str, fixes: &[&Fix]) -> (String, Vec<usize>) {
    let mut order: Vec<usize> = (0..fixes.len()).collect();
    order.sort_by_key(|&i| fixes[i].span());

    let mut accepted: Vec<&TextEdit> = Vec::new();
    let mut applied = Vec::new();
    let mut last_end: Option<u32> = None;
    for i in order {
        let (start, end) = fixes[i].span();
        if last_end.is_some_and(|last| start < last) {
            continue;
        }
        accepted.extend(fixes[i].edits());
        applied.push(i);
        last_end = Some(end);
    }

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for edit in accepted {
        out.push_str(&source[cursor..edit.start as usize]);
        out.push_str(&edit.new_text);
        cursor = edit.end as usize;
    }
    out.push_str(&source[cursor..]);
    applied.sort_unstable();
    (out, applied)
}
