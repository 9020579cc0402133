//! Text layer for annotated documents
//!
//! Pure text storage with no knowledge of annotations. The engine only ever
//! asks two things of a document: how many lines it has, and which character
//! span a given line currently occupies.
//!
//! ## Modules
//!
//! - `buffer`: Text storage, line counting and line → span resolution
//! - `span`: Character spans (start inclusive, end exclusive)

pub mod buffer;
pub mod span;

// Re-exports for convenience
pub use buffer::{TextBuffer, TextCore};
pub use span::CharSpan;
