//! Visual markers placed on annotated lines

use crate::models::annotation::LineAnnotations;
use crate::text::CharSpan;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

/// Identity of one rendered marker
///
/// Ids are never reused within a session, so an event addressed to a
/// replaced marker can be told apart from one addressed to its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub u32);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which margin the marker glyph is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fringe {
    #[default]
    Left,
    Right,
}

/// How a marker is drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Name of the bitmap/glyph the host draws (e.g. "left-triangle")
    pub glyph: String,

    /// Margin the glyph goes in
    pub fringe: Fringe,
}

impl MarkerStyle {
    pub fn left_margin(glyph: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            fringe: Fringe::Left,
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::left_margin("left-triangle")
    }
}

/// Direction of a cursor transition across a marker's span
#[wasm_bindgen]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum CursorDirection {
    /// Cursor moved into the marker's span
    Entered = 0,

    /// Cursor moved out of the marker's span
    Left = 1,
}

/// A live marker bound to one annotated line
///
/// The comment list is a snapshot taken when the marker was built. Markers
/// are never edited in place: a changed list gets a brand new marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub id: MarkerId,

    /// Annotated line (1-based)
    pub line: usize,

    /// Span of the line when the marker was created
    pub span: CharSpan,

    pub style: MarkerStyle,

    /// Comments shown when the cursor enters the marker
    pub comments: Arc<LineAnnotations>,
}
