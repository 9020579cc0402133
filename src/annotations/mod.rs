//! Annotation engine
//!
//! Comments arrive per line and are kept in an `AnnotationStore`. Every line
//! with comments has exactly one live marker, owned by the
//! `IndicatorManager`; the store never changes without its marker changing in
//! the same call. When the cursor enters a marker, the `RevealController`
//! formats the line's comments and shows them on the editing surface.
//!
//! ## Modules
//!
//! - `surface`: The editing-surface collaborator trait and its outbound operations
//! - `buffer_surface`: In-memory editing surface over a `TextBuffer`
//! - `store`: Line → comments mapping
//! - `indicator`: Marker creation, replacement and destruction
//! - `reveal`: Reveal text formatting on cursor entry

pub mod buffer_surface;
pub mod indicator;
pub mod reveal;
pub mod store;
pub mod surface;

// Re-exports for convenience
pub use buffer_surface::BufferSurface;
pub use indicator::IndicatorManager;
pub use reveal::{RevealController, RevealSegment, RevealText};
pub use store::{AnnotationStore, UpsertOutcome, Upserted};
pub use surface::{EditingSurface, MarkerView, SurfaceOp};
