//! Backseat annotation WASM API
//!
//! This module provides the JavaScript-facing API for the annotation engine.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, session access, error handling, and logging
//! - `types`: Result types returned to JavaScript
//! - `session`: Session lifecycle, chat ingestion, cursor events and clearing

pub mod helpers;
pub mod session;
pub mod types;

// Re-export all public functions to keep the JavaScript-facing API in one place
pub use session::{
    append_chat_text, attach_document, clear_all_annotations, clear_line, cursor_transition,
    get_annotations, ingest_chat_line, init_session, move_cursor, set_document_text,
};
pub use types::{ChatBatchResult, ChatResult, SurfaceUpdate};
