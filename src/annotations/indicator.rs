//! Marker ownership for annotated lines
//!
//! Markers are immutable once rendered. A line whose comments change gets its
//! old marker destroyed and a fresh one built over the line's current span.

use crate::annotations::surface::EditingSurface;
use crate::errors::AnnotationError;
use crate::models::{Indicator, LineAnnotations, MarkerId, MarkerStyle};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Owns the live marker for each annotated line
#[derive(Debug)]
pub struct IndicatorManager {
    indicators: BTreeMap<usize, Indicator>,
    style: MarkerStyle,
    next_id: u32,
}

impl IndicatorManager {
    pub fn new(style: MarkerStyle) -> Self {
        Self::with_first_id(style, 1)
    }

    /// Start allocating marker ids at `first_id`
    ///
    /// Used when switching documents so ids stay unique across the session.
    pub fn with_first_id(style: MarkerStyle, first_id: u32) -> Self {
        Self {
            indicators: BTreeMap::new(),
            style,
            next_id: first_id,
        }
    }

    /// Id the next marker will get
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Build a fresh marker for `line` carrying `comments`
    ///
    /// The line's span is resolved first; if the line does not exist nothing
    /// is destroyed or created. Otherwise any existing marker for the line is
    /// destroyed before the new one is attached.
    pub fn refresh<S: EditingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        line: usize,
        comments: Arc<LineAnnotations>,
    ) -> Result<&Indicator, AnnotationError> {
        let span = surface.line_span(line).ok_or_else(|| AnnotationError::OutOfRange {
            line,
            line_count: surface.line_count(),
        })?;

        let replaced = self.destroy(surface, line);

        let indicator = Indicator {
            id: self.allocate_id(),
            line,
            span,
            style: self.style.clone(),
            comments,
        };
        surface.attach_marker(&indicator);

        match replaced {
            Some(old) => log::info!(
                "replaced marker {} with {} on line {} ({} comments)",
                old.id,
                indicator.id,
                line,
                indicator.comments.len()
            ),
            None => log::info!("created marker {} on line {}", indicator.id, line),
        }

        let indicator = match self.indicators.entry(line) {
            Entry::Vacant(slot) => slot.insert(indicator),
            Entry::Occupied(mut slot) => {
                slot.insert(indicator);
                slot.into_mut()
            }
        };
        Ok(indicator)
    }

    /// Destroy the marker for `line`, if any
    pub fn destroy<S: EditingSurface + ?Sized>(&mut self, surface: &mut S, line: usize) -> Option<Indicator> {
        let indicator = self.indicators.remove(&line)?;
        surface.detach_marker(indicator.id);
        Some(indicator)
    }

    /// Destroy every marker, returning how many there were
    pub fn destroy_all<S: EditingSurface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let count = self.indicators.len();
        for indicator in std::mem::take(&mut self.indicators).into_values() {
            surface.detach_marker(indicator.id);
        }
        count
    }

    pub fn get(&self, line: usize) -> Option<&Indicator> {
        self.indicators.get(&line)
    }

    /// Look up a live marker by id
    pub fn find(&self, id: MarkerId) -> Option<&Indicator> {
        self.indicators.values().find(|i| i.id == id)
    }

    /// Lines with a live marker, ascending
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.indicators.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Indicator> {
        self.indicators.values()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    fn allocate_id(&mut self) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

impl Default for IndicatorManager {
    fn default() -> Self {
        Self::new(MarkerStyle::default())
    }
}
