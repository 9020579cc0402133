//! Reveal of a line's comments on cursor entry

use crate::annotations::surface::EditingSurface;
use crate::config::{SessionConfig, DEFAULT_AUTHOR_STYLE, DEFAULT_SEPARATOR};
use crate::models::{CursorDirection, Indicator, LineAnnotations};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A run of reveal text, optionally drawn in a named style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealSegment {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl RevealSegment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    fn styled(text: impl Into<String>, style: &str) -> Self {
        Self {
            text: text.into(),
            style: Some(style.to_string()),
        }
    }
}

/// Formatted comments for one line
///
/// `Display` renders the plain text, e.g.
/// `bob - nah, use a tree; alice - use a hashmap here`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealText {
    pub segments: Vec<RevealSegment>,
}

impl fmt::Display for RevealText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(&segment.text)?;
        }
        Ok(())
    }
}

/// Turns cursor entry on a marker into a status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealController {
    author_style: String,
    separator: String,
}

impl RevealController {
    pub fn new(author_style: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            author_style: author_style.into(),
            separator: separator.into(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.author_style.clone(), config.separator.clone())
    }

    /// Format comments in list order (newest first)
    pub fn format(&self, comments: &LineAnnotations) -> RevealText {
        let mut segments = Vec::with_capacity(comments.len() * 3);
        for (i, comment) in comments.iter().enumerate() {
            if i > 0 {
                segments.push(RevealSegment::plain(self.separator.clone()));
            }
            segments.push(RevealSegment::styled(comment.author.clone(), &self.author_style));
            segments.push(RevealSegment::plain(format!(" - {}", comment.text)));
        }
        RevealText { segments }
    }

    /// Handle a cursor transition across a marker
    ///
    /// Only entry produces output; leaving a marker is ignored.
    pub fn on_cursor_transition<S: EditingSurface + ?Sized>(
        &self,
        surface: &mut S,
        indicator: &Indicator,
        direction: CursorDirection,
    ) -> Option<RevealText> {
        match direction {
            CursorDirection::Entered => {
                let text = self.format(&indicator.comments);
                log::debug!("revealing line {} ({}): {}", indicator.line, indicator.id, text);
                surface.show_message(&text);
                Some(text)
            }
            CursorDirection::Left => None,
        }
    }
}

impl Default for RevealController {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHOR_STYLE, DEFAULT_SEPARATOR)
    }
}
