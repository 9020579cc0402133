//! Annotation records
//!
//! A chat command parses into an `AnnotationCommand`, which is consumed once
//! to produce a `Comment`. Comments for a line are kept as a `LineAnnotations`
//! list, newest first, with no structural duplicates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed `!line` chat command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationCommand {
    /// Chat author (the text between the angle brackets)
    pub author: String,

    /// Target line (1-based, not yet checked against any document)
    pub line: usize,

    /// Comment text with any trailing transport artifact stripped
    pub comment: String,
}

impl AnnotationCommand {
    /// Split into the target line and the comment to store
    pub fn into_parts(self) -> (usize, Comment) {
        (self.line, Comment::new(self.author, self.comment))
    }
}

/// A single comment left on a line
///
/// Equality is structural: the same author saying the same thing twice is
/// one comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
}

impl Comment {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.author, self.text)
    }
}

/// Comments attached to one line, most recently added first
///
/// Values are never mutated once built; `with_prepended` produces the next
/// list, leaving snapshots held by existing indicators untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineAnnotations {
    comments: Vec<Comment>,
}

impl LineAnnotations {
    /// A list holding a single comment
    pub fn single(comment: Comment) -> Self {
        Self {
            comments: vec![comment],
        }
    }

    /// Check whether a structurally equal comment is already present
    pub fn contains(&self, comment: &Comment) -> bool {
        self.comments.iter().any(|c| c == comment)
    }

    /// Build the list that results from adding `comment`
    ///
    /// Returns `None` when the comment is already present.
    pub fn with_prepended(&self, comment: Comment) -> Option<Self> {
        if self.contains(&comment) {
            return None;
        }

        let mut comments = Vec::with_capacity(self.comments.len() + 1);
        comments.push(comment);
        comments.extend(self.comments.iter().cloned());
        Some(Self { comments })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.comments.iter()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn as_slice(&self) -> &[Comment] {
        &self.comments
    }
}

impl<'a> IntoIterator for &'a LineAnnotations {
    type Item = &'a Comment;
    type IntoIter = std::slice::Iter<'a, Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.comments.iter()
    }
}
