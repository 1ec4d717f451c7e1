//! Position and location utilities.
//!
//! The syntax tree uses byte offsets, while reporters print 1-based
//! line/column pairs. This module provides the conversion.

use serde::Serialize;

/// A position in a source file (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (UTF-16 code units, matching editor conventions)
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// A range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }
}

/// Line map for offset <-> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];

        for i in memchr::memchr2_iter(b'\n', b'\r', bytes) {
            if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                // \r\n - the \n creates the line start
                continue;
            }
            line_starts.push((i + 1) as u32);
        }

        LineMap { line_starts }
    }

    /// 0-indexed line containing `offset`.
    pub fn line_of(&self, offset: u32) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        }
    }

    /// Convert a byte offset to a Position (line, character).
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = self.line_of(offset);
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");
        let character = slice.chars().map(|ch| ch.len_utf16() as u32).sum();

        Position {
            line: line as u32,
            character,
        }
    }

    pub fn range(&self, start: u32, end: u32, source: &str) -> Range {
        Range::new(
            self.offset_to_position(start, source),
            self.offset_to_position(end, source),
        )
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the starting offset of a line.
    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }

    /// Whitespace run at the start of the line containing `offset`.
    pub fn indentation_at<'a>(&self, offset: u32, source: &'a str) -> &'a str {
        let start = self
            .line_start(self.line_of(offset))
            .map_or(0, |s| s as usize)
            .min(source.len());
        let rest = &source[start..];
        let width = rest
            .bytes()
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        &rest[..width]
    }

    /// True when only whitespace precedes `offset` on its line.
    pub fn is_first_on_line(&self, offset: u32, source: &str) -> bool {
        let start = self.line_start(self.line_of(offset)).unwrap_or(0) as usize;
        source
            .get(start..offset as usize)
            .is_some_and(|prefix| prefix.bytes().all(|b| b == b' ' || b == b'\t'))
    }
}

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn test_line_map_simple() {
        let source = "line1\nline2\nline3";
        let map = LineMap::build(source);

        assert_eq!(map.line_count(), 3);
        assert_eq!(map.offset_to_position(0, source), Position::new(0, 0));
        assert_eq!(map.offset_to_position(4, source), Position::new(0, 4));
        assert_eq!(map.offset_to_position(6, source), Position::new(1, 0));
        assert_eq!(map.offset_to_position(12, source), Position::new(2, 0));
    }

    #[test]
    fn test_line_map_windows_line_endings() {
        let source = "line1\r\nline2\r\nline3";
        let map = LineMap::build(source);

        assert_eq!(map.line_count(), 3);
        assert_eq!(map.offset_to_position(7, source), Position::new(1, 0));
    }

    #[test]
    fn test_indentation_at() {
        let source = "function f({\n    a,\n\tb,\n}) {}";
        let map = LineMap::build(source);
        let a = source.find('a').unwrap() as u32;
        let b = source.find('b').unwrap() as u32;
        assert_eq!(map.indentation_at(a, source), "    ");
        assert_eq!(map.indentation_at(b, source), "\t");
        assert!(map.is_first_on_line(a, source));
        assert!(!map.is_first_on_line(a + 1, source));
    }
}
