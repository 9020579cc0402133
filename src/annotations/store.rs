//! Line → comments mapping
//!
//! Every mutation here goes through the `IndicatorManager` in the same call,
//! so the set of annotated lines and the set of lines with a live marker are
//! always the same set.

use crate::annotations::indicator::IndicatorManager;
use crate::annotations::surface::EditingSurface;
use crate::errors::AnnotationError;
use crate::models::{Comment, LineAnnotations};
use std::collections::BTreeMap;
use std::sync::Arc;

/// What an upsert did to its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The line had no comments; a first marker was created
    Created,
    /// A new comment was prepended; the marker was replaced
    Extended,
    /// The comment was already present; nothing changed
    Unchanged,
}

/// Result of an upsert: the outcome and the line's resulting comments
#[derive(Debug, Clone, PartialEq)]
pub struct Upserted {
    pub outcome: UpsertOutcome,
    pub comments: Arc<LineAnnotations>,
}

/// Comments per line for the attached document
#[derive(Debug, Default)]
pub struct AnnotationStore {
    lines: BTreeMap<usize, Arc<LineAnnotations>>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comment to a line
    ///
    /// The marker is refreshed before the store is written, so a line that
    /// does not exist in the document leaves both untouched and reports
    /// `OutOfRange`. Repeating a comment already on the line is a no-op.
    pub fn upsert<S: EditingSurface + ?Sized>(
        &mut self,
        indicators: &mut IndicatorManager,
        surface: &mut S,
        line: usize,
        comment: Comment,
    ) -> Result<Upserted, AnnotationError> {
        let (next, outcome) = match self.lines.get(&line) {
            None => (LineAnnotations::single(comment), UpsertOutcome::Created),
            Some(existing) => match existing.with_prepended(comment) {
                Some(next) => (next, UpsertOutcome::Extended),
                None => {
                    log::debug!("duplicate comment on line {}, ignoring", line);
                    return Ok(Upserted {
                        outcome: UpsertOutcome::Unchanged,
                        comments: Arc::clone(existing),
                    });
                }
            },
        };

        let next = Arc::new(next);
        indicators.refresh(surface, line, Arc::clone(&next))?;
        self.lines.insert(line, Arc::clone(&next));

        Ok(Upserted {
            outcome,
            comments: next,
        })
    }

    /// Remove a line's comments and its marker
    pub fn clear<S: EditingSurface + ?Sized>(
        &mut self,
        indicators: &mut IndicatorManager,
        surface: &mut S,
        line: usize,
    ) -> Option<Arc<LineAnnotations>> {
        indicators.destroy(surface, line);
        self.lines.remove(&line)
    }

    /// Remove every comment and marker, returning how many lines were cleared
    pub fn clear_all<S: EditingSurface + ?Sized>(
        &mut self,
        indicators: &mut IndicatorManager,
        surface: &mut S,
    ) -> usize {
        indicators.destroy_all(surface);
        let count = self.lines.len();
        self.lines.clear();
        count
    }

    pub fn get(&self, line: usize) -> Option<&Arc<LineAnnotations>> {
        self.lines.get(&line)
    }

    /// Annotated lines, ascending
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Arc<LineAnnotations>)> {
        self.lines.iter().map(|(line, comments)| (*line, comments))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
