//! WASM API for the annotation session
//!
//! The session is WASM-owned: JavaScript feeds it chat text, document text
//! and cursor events, and applies the returned `SurfaceUpdate` operations to
//! its gutter and status line.

use std::sync::Mutex;

use lazy_static::lazy_static;
use wasm_bindgen::prelude::*;

use crate::annotations::BufferSurface;
use crate::api::helpers::{annotation_error, deserialize, lock_session, serialize, validation_error, with_session};
use crate::api::types::{ChatBatchResult, ChatResult, SurfaceUpdate};
use crate::config::SessionConfig;
use crate::models::{CursorDirection, MarkerId};
use crate::session::AnnotationSession;
use crate::{wasm_info, wasm_log, wasm_warn};

// WASM-owned session storage (canonical source of truth)
lazy_static! {
    pub(crate) static ref SESSION: Mutex<Option<AnnotationSession<BufferSurface>>> = Mutex::new(None);
}

/// Drain the operations queued on the attached surface
fn drain(session: &mut AnnotationSession<BufferSurface>) -> SurfaceUpdate {
    SurfaceUpdate::new(session.surface_mut().map(|s| s.take_ops()).unwrap_or_default())
}

/// Create a fresh session
///
/// # Parameters
/// - `config_js`: configuration object, or `undefined` for defaults
#[wasm_bindgen(js_name = initSession)]
pub fn init_session(config_js: JsValue) -> Result<(), JsValue> {
    let config = if config_js.is_undefined() || config_js.is_null() {
        SessionConfig::default()
    } else {
        deserialize::<SessionConfig>(config_js, "Config deserialization error")?
    };

    wasm_info!(
        "initSession: channel={:?}, nick={:?}",
        config.channel.as_deref().unwrap_or("-"),
        config.nick.as_deref().unwrap_or("-")
    );

    let mut guard = lock_session()?;
    *guard = Some(AnnotationSession::new(config));
    Ok(())
}

/// Attach the document that chat commands annotate
///
/// # Returns
/// `SurfaceUpdate` destroying the previous document's markers
#[wasm_bindgen(js_name = attachDocument)]
pub fn attach_document(document_id: &str, text: &str) -> Result<JsValue, JsValue> {
    wasm_info!("attachDocument called: id={}, {} chars", document_id, text.chars().count());

    with_session(|session| {
        let previous = session.attach(document_id, BufferSurface::from_text(text));
        let update = SurfaceUpdate::new(previous.map(|mut s| s.take_ops()).unwrap_or_default());
        serialize(&update, "Update serialization error")
    })
}

/// Replace the attached document's text after a host-side edit
#[wasm_bindgen(js_name = setDocumentText)]
pub fn set_document_text(text: &str) -> Result<(), JsValue> {
    with_session(|session| {
        let surface = session
            .surface_mut()
            .ok_or_else(|| validation_error("No document attached"))?;
        surface.set_text(text);
        Ok(())
    })
}

/// Handle one chat line from the transport
///
/// # Parameters
/// - `raw`: the chat line, e.g. `<alice> !line 5 use a hashmap here`
/// - `author`: sender reported separately by the transport, if any; `raw` is then
///   a bare `!line 5 comment` and this is the only author used
///
/// # Returns
/// `ChatResult` with the outcome and the surface operations it caused
#[wasm_bindgen(js_name = ingestChatLine)]
pub fn ingest_chat_line(raw: &str, author: Option<String>) -> Result<JsValue, JsValue> {
    wasm_log!("ingestChatLine: {:?}", raw);

    with_session(|session| {
        let outcome = session
            .on_incoming_chat_text(raw, author.as_deref())
            .map_err(annotation_error)?;
        let result = ChatResult {
            outcome,
            update: drain(session),
        };
        serialize(&result, "Chat result serialization error")
    })
}

/// Append text to the chat transcript and process every line it completes
#[wasm_bindgen(js_name = appendChatText)]
pub fn append_chat_text(text: &str) -> Result<JsValue, JsValue> {
    with_session(|session| {
        let mut result = ChatBatchResult::default();
        for outcome in session.append_chat_text(text) {
            match outcome {
                Ok(outcome) => result.outcomes.push(outcome),
                Err(e) => {
                    wasm_warn!("Dropped annotation: {}", e);
                    result.errors.push(e.to_string());
                }
            }
        }
        result.update = drain(session);
        serialize(&result, "Chat batch serialization error")
    })
}

/// Report that the cursor entered or left a marker
///
/// # Returns
/// `SurfaceUpdate` carrying the reveal message on entry
#[wasm_bindgen(js_name = cursorTransition)]
pub fn cursor_transition(marker_id: u32, direction: CursorDirection) -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.on_cursor_transition(MarkerId(marker_id), direction);
        serialize(&drain(session), "Update serialization error")
    })
}

/// Move the cursor and let the session work out marker transitions
#[wasm_bindgen(js_name = moveCursor)]
pub fn move_cursor(offset: usize) -> Result<JsValue, JsValue> {
    with_session(|session| {
        let transitions = session
            .surface_mut()
            .map(|s| s.move_cursor(offset))
            .unwrap_or_default();
        for (marker, direction) in transitions {
            session.on_cursor_transition(marker, direction);
        }
        serialize(&drain(session), "Update serialization error")
    })
}

/// Remove the comments and marker on one line
#[wasm_bindgen(js_name = clearLine)]
pub fn clear_line(line: usize) -> Result<JsValue, JsValue> {
    wasm_info!("clearLine called: line={}", line);

    with_session(|session| {
        session.clear_line(line).map_err(annotation_error)?;
        serialize(&drain(session), "Update serialization error")
    })
}

/// Remove every comment and marker in the attached document
#[wasm_bindgen(js_name = clearAllAnnotations)]
pub fn clear_all_annotations() -> Result<JsValue, JsValue> {
    with_session(|session| {
        let cleared = session.clear_all().map_err(annotation_error)?;
        wasm_info!("clearAllAnnotations: {} lines cleared", cleared);
        serialize(&drain(session), "Update serialization error")
    })
}

/// List every annotated line with its comments
#[wasm_bindgen(js_name = getAnnotations)]
pub fn get_annotations() -> Result<JsValue, JsValue> {
    with_session(|session| serialize(&session.snapshot(), "Annotations serialization error"))
}
