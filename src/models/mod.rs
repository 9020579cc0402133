//! Models module for the annotation engine
//!
//! This module contains the data records shared by the parser, the
//! annotation store, the indicator manager and the JavaScript API.

pub mod annotation;
pub mod marker;

// Re-export commonly used types
pub use annotation::{AnnotationCommand, Comment, LineAnnotations};
pub use marker::{CursorDirection, Fringe, Indicator, MarkerId, MarkerStyle};
