//! Character spans within a document
//!
//! Offsets are counted in `char`s from the start of the document, not bytes.

use serde::{Deserialize, Serialize};

/// A span of text from start (inclusive) to end (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharSpan {
    pub start: usize,
    pub end: usize,
}

impl CharSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create an empty span at an offset
    pub fn empty_at(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    /// Check if this span is empty (start == end)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if an offset is contained within this span
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if a cursor at `offset` sits on this span
    ///
    /// Unlike `contains`, the end offset counts: a cursor parked after the last
    /// character of a line (or on a blank line) is still on that line.
    pub fn holds_cursor(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains() {
        let span = CharSpan::new(2, 5);

        assert!(span.contains(2));
        assert!(span.contains(4));
        assert!(!span.contains(5)); // Exclusive end
        assert!(!span.contains(1));
    }

    #[test]
    fn test_cursor_at_end_of_line_is_on_the_line() {
        let span = CharSpan::new(2, 5);
        assert!(span.holds_cursor(5));
        assert!(!span.holds_cursor(6));
    }

    #[test]
    fn test_empty_span_holds_cursor_at_its_start() {
        let span = CharSpan::empty_at(7);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
        assert!(!span.contains(7));
        assert!(span.holds_cursor(7));
        assert!(!span.holds_cursor(8));
    }
}
