//! Editing-surface collaborator
//!
//! The host editor owns document storage, cursor tracking and margin
//! rendering. The engine reaches it only through `EditingSurface`.

use crate::annotations::reveal::RevealText;
use crate::models::{Indicator, LineAnnotations, MarkerId, MarkerStyle};
use crate::text::CharSpan;
use serde::{Deserialize, Serialize};

/// Operations the engine needs from the host editor
///
/// `attach_marker` doubles as the cursor-sensor subscription: once a marker
/// is attached, the host reports cursor transitions across its span back to
/// the session by marker id, until `detach_marker` is called for that id.
pub trait EditingSurface {
    /// Number of lines in the document
    fn line_count(&self) -> usize;

    /// Current character span of a line (1-based), `None` if out of range
    fn line_span(&self, line: usize) -> Option<CharSpan>;

    /// Render a marker and start reporting cursor transitions for it
    fn attach_marker(&mut self, indicator: &Indicator);

    /// Remove a marker and stop reporting transitions for it
    fn detach_marker(&mut self, id: MarkerId);

    /// Show a transient message (status line, echo area, toast)
    fn show_message(&mut self, message: &RevealText);
}

/// Plain, serializable view of a rendered marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerView {
    pub id: MarkerId,
    pub line: usize,
    pub span: CharSpan,
    pub style: MarkerStyle,
    pub comments: LineAnnotations,
}

impl From<&Indicator> for MarkerView {
    fn from(indicator: &Indicator) -> Self {
        Self {
            id: indicator.id,
            line: indicator.line,
            span: indicator.span,
            style: indicator.style.clone(),
            comments: (*indicator.comments).clone(),
        }
    }
}

/// One outbound call made to the editing surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    MarkerCreated { marker: MarkerView },
    MarkerDestroyed { id: MarkerId },
    Message { message: RevealText },
}
