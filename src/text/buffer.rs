//! Text buffer implementation
//!
//! Line numbers handed to this module are 1-based, the way a person reading
//! the document (or typing `!line 5` into chat) counts them.

use super::span::CharSpan;
use serde::{Deserialize, Serialize};

/// Core text buffer trait
///
/// This trait defines the minimal interface the annotation engine needs from
/// a document. Different implementations can use different backing stores.
pub trait TextCore {
    /// Get the number of lines
    fn line_count(&self) -> usize;

    /// Get the text of a line (1-based), without its terminator
    fn get_line(&self, line: usize) -> Option<&str>;

    /// Resolve a line (1-based) to its current character span
    fn line_span(&self, line: usize) -> Option<CharSpan>;

    /// Extract the text covered by a span
    fn slice(&self, span: CharSpan) -> Option<String>;
}

/// Simple string-backed text buffer
///
/// An empty buffer has one (empty) line, and a trailing newline opens a new
/// empty last line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self { text: String::new() }
    }

    /// Whole buffer contents
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the whole buffer contents
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    /// Append text at the end, returning the span it now occupies
    pub fn append(&mut self, text: &str) -> CharSpan {
        let start = self.char_len();
        self.text.push_str(text);
        CharSpan::new(start, start + text.chars().count())
    }

    /// Insert text at a character offset (clamped to the end of the buffer),
    /// returning the span it now occupies
    pub fn insert(&mut self, offset: usize, text: &str) -> CharSpan {
        let offset = offset.min(self.char_len());
        let byte = self.byte_offset(offset).unwrap_or(self.text.len());
        self.text.insert_str(byte, text);
        CharSpan::new(offset, offset + text.chars().count())
    }

    /// Widen a changed span to the complete lines it touches
    ///
    /// The result starts at the beginning of the span's first line and ends
    /// just after the last newline that closes a touched line. An unterminated
    /// last line is left out; it is picked up once a later change completes
    /// it.
    pub fn complete_lines(&self, span: CharSpan) -> Option<CharSpan> {
        if span.start > span.end || span.end > self.char_len() {
            return None;
        }

        let chars: Vec<char> = self.text.chars().collect();
        let start = chars[..span.start]
            .iter()
            .rposition(|c| *c == '\n')
            .map_or(0, |i| i + 1);
        let from = span.end.saturating_sub(1).max(start);

        let end = match chars[from..].iter().position(|c| *c == '\n') {
            Some(i) => from + i + 1,
            None => chars[start..from]
                .iter()
                .rposition(|c| *c == '\n')
                .map_or(start, |i| start + i + 1),
        };
        Some(CharSpan::new(start, end))
    }

    fn byte_offset(&self, char_offset: usize) -> Option<usize> {
        if char_offset == self.char_len() {
            return Some(self.text.len());
        }
        self.text.char_indices().nth(char_offset).map(|(i, _)| i)
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self { text: s.to_string() }
    }
}

impl TextCore for TextBuffer {
    fn line_count(&self) -> usize {
        // Single forward scan; the newline count bounds nothing but itself.
        self.text.bytes().filter(|b| *b == b'\n').count() + 1
    }

    fn get_line(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.text.split('\n').nth(line - 1)
    }

    fn line_span(&self, line: usize) -> Option<CharSpan> {
        if line == 0 {
            return None;
        }

        let mut start = 0;
        for (index, text) in self.text.split('\n').enumerate() {
            let len = text.chars().count();
            if index + 1 == line {
                return Some(CharSpan::new(start, start + len));
            }
            // +1 for the newline separating this line from the next
            start += len + 1;
        }
        None
    }

    fn slice(&self, span: CharSpan) -> Option<String> {
        if span.start > span.end || span.end > self.char_len() {
            return None;
        }
        Some(self.text.chars().skip(span.start).take(span.len()).collect())
    }
}
