//! Backseat Annotation WASM Module
//!
//! Lets a live chat audience annotate lines of a document. Chat lines of the
//! form `<author> !line N comment` are parsed, stored per line, and marked in
//! the editor's margin; moving the cursor onto a marked line reveals its
//! comments.

pub mod annotations;
pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod parse;
pub mod session;
pub mod text;

// Re-export commonly used types
pub use annotations::{BufferSurface, EditingSurface, RevealText, SurfaceOp};
pub use config::SessionConfig;
pub use errors::AnnotationError;
pub use models::*;
pub use parse::CommandParser;
pub use session::{AnnotatedLine, AnnotationSession, ChatOutcome};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    install_panic_hook();
    init_logging();

    log::info!("Backseat annotation WASM module initialized");
}

#[cfg(feature = "console_error_panic_hook")]
fn install_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(feature = "console_error_panic_hook"))]
fn install_panic_hook() {}

#[cfg(feature = "console_log")]
fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already initialized: {}", e)));
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
