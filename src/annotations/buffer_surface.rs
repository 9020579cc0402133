//! In-memory editing surface
//!
//! `BufferSurface` keeps the target document in a `TextBuffer`, tracks the
//! rendered markers and the cursor, and queues every outbound call so a host
//! (the JavaScript API, or a test) can replay them.

use crate::annotations::reveal::RevealText;
use crate::annotations::surface::{EditingSurface, MarkerView, SurfaceOp};
use crate::models::{CursorDirection, Indicator, MarkerId};
use crate::text::{CharSpan, TextBuffer, TextCore};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct BufferSurface {
    document: TextBuffer,
    markers: BTreeMap<MarkerId, MarkerView>,
    pending: Vec<SurfaceOp>,
    cursor: Option<usize>,
    last_message: Option<RevealText>,
}

impl BufferSurface {
    pub fn new(document: TextBuffer) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(TextBuffer::from(text))
    }

    pub fn document(&self) -> &TextBuffer {
        &self.document
    }

    /// Replace the document text (a host-side edit)
    ///
    /// Markers stay attached to their line numbers.
    pub fn set_text(&mut self, text: &str) {
        self.document.set_text(text);
    }

    pub fn marker(&self, id: MarkerId) -> Option<&MarkerView> {
        self.markers.get(&id)
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerView> {
        self.markers.values()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Most recent message shown on this surface
    pub fn last_message(&self) -> Option<&RevealText> {
        self.last_message.as_ref()
    }

    /// Drain the queued outbound operations
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.pending)
    }

    /// Move the cursor to a character offset
    ///
    /// Returns the transitions this move causes, marker leaves before marker
    /// entries. A marker's extent is its line's current span.
    pub fn move_cursor(&mut self, offset: usize) -> Vec<(MarkerId, CursorDirection)> {
        let prior = self.cursor.replace(offset);

        let mut left = Vec::new();
        let mut entered = Vec::new();
        for marker in self.markers.values() {
            let span = self.document.line_span(marker.line).unwrap_or(marker.span);
            let was_on = prior.is_some_and(|p| span.holds_cursor(p));
            let is_on = span.holds_cursor(offset);

            match (was_on, is_on) {
                (true, false) => left.push((marker.id, CursorDirection::Left)),
                (false, true) => entered.push((marker.id, CursorDirection::Entered)),
                _ => {}
            }
        }

        left.extend(entered);
        left
    }
}

impl EditingSurface for BufferSurface {
    fn line_count(&self) -> usize {
        self.document.line_count()
    }

    fn line_span(&self, line: usize) -> Option<CharSpan> {
        self.document.line_span(line)
    }

    fn attach_marker(&mut self, indicator: &Indicator) {
        let marker = MarkerView::from(indicator);
        self.markers.insert(marker.id, marker.clone());
        self.pending.push(SurfaceOp::MarkerCreated { marker });
    }

    fn detach_marker(&mut self, id: MarkerId) {
        if self.markers.remove(&id).is_some() {
            self.pending.push(SurfaceOp::MarkerDestroyed { id });
        }
    }

    fn show_message(&mut self, message: &RevealText) {
        self.last_message = Some(message.clone());
        self.pending.push(SurfaceOp::Message {
            message: message.clone(),
        });
    }
}
