//! Annotation session
//!
//! The session is the one context object the host holds. It owns the chat
//! transcript, the attached target document with its store and markers, and
//! handles the two inbound event streams: chat text from the transport and
//! cursor transitions from the editing surface.
//!
//! Chat commands always go to the document attached at the time they arrive,
//! i.e. the one most recently passed to `attach`, regardless of what the host
//! currently has focused.

use crate::annotations::{
    AnnotationStore, EditingSurface, IndicatorManager, RevealController, RevealText, UpsertOutcome,
};
use crate::config::SessionConfig;
use crate::errors::AnnotationError;
use crate::models::{CursorDirection, LineAnnotations, MarkerId};
use crate::parse::CommandParser;
use crate::text::{CharSpan, TextBuffer, TextCore};
use serde::{Deserialize, Serialize};

/// What a single inbound chat line did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatOutcome {
    /// Not a command
    Ignored,
    /// The line's comments changed
    Annotated { line: usize, comments: LineAnnotations },
    /// The comment was already on the line
    Duplicate { line: usize },
}

/// One annotated line, for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedLine {
    pub line: usize,
    pub comments: LineAnnotations,
}

/// The attached target document and everything bound to it
#[derive(Debug)]
struct DocumentContext<S> {
    id: String,
    surface: S,
    store: AnnotationStore,
    indicators: IndicatorManager,
}

#[derive(Debug)]
pub struct AnnotationSession<S: EditingSurface> {
    config: SessionConfig,
    parser: CommandParser,
    reveal: RevealController,
    chat: TextBuffer,
    context: Option<DocumentContext<S>>,
    next_marker_id: u32,
}

impl<S: EditingSurface> AnnotationSession<S> {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            parser: CommandParser::new(config.suffix_len),
            reveal: RevealController::from_config(&config),
            config,
            chat: TextBuffer::new(),
            context: None,
            next_marker_id: 1,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The chat transcript
    pub fn chat(&self) -> &TextBuffer {
        &self.chat
    }

    // ========================================================================
    // Document context
    // ========================================================================

    /// Attach a target document, replacing any previous one
    ///
    /// All markers of the previous document are destroyed on its surface and
    /// its comments are dropped; the previous surface is handed back.
    pub fn attach(&mut self, id: impl Into<String>, surface: S) -> Option<S> {
        let previous = self.detach();
        let id = id.into();

        log::info!("attached to document {:?}", id);
        self.context = Some(DocumentContext {
            id,
            surface,
            store: AnnotationStore::new(),
            indicators: IndicatorManager::with_first_id(self.config.marker_style(), self.next_marker_id),
        });
        previous
    }

    /// Detach the target document, clearing its comments and markers
    pub fn detach(&mut self) -> Option<S> {
        let mut ctx = self.context.take()?;
        let cleared = ctx.store.clear_all(&mut ctx.indicators, &mut ctx.surface);
        self.next_marker_id = ctx.indicators.next_id();

        log::info!("detached from document {:?} ({} annotated lines cleared)", ctx.id, cleared);
        Some(ctx.surface)
    }

    pub fn document_id(&self) -> Option<&str> {
        self.context.as_ref().map(|ctx| ctx.id.as_str())
    }

    pub fn surface(&self) -> Option<&S> {
        self.context.as_ref().map(|ctx| &ctx.surface)
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.context.as_mut().map(|ctx| &mut ctx.surface)
    }

    pub fn store(&self) -> Option<&AnnotationStore> {
        self.context.as_ref().map(|ctx| &ctx.store)
    }

    pub fn indicators(&self) -> Option<&IndicatorManager> {
        self.context.as_ref().map(|ctx| &ctx.indicators)
    }

    // ========================================================================
    // Inbound chat
    // ========================================================================

    /// Handle one chat line delivered by the transport
    ///
    /// `author` is the sender when the transport reports it separately from
    /// the text. The text is then a bare `!line N comment` and that author is
    /// the only one used; without it, the line must carry its own `<author>`
    /// prefix.
    pub fn on_incoming_chat_text(
        &mut self,
        raw: &str,
        author: Option<&str>,
    ) -> Result<ChatOutcome, AnnotationError> {
        let command = match author {
            Some(author) => self.parser.parse_from(author, raw),
            None => self.parser.parse(raw),
        };
        let Some(command) = command else {
            return Ok(ChatOutcome::Ignored);
        };

        let ctx = self.context.as_mut().ok_or(AnnotationError::NoDocument)?;
        let (line, comment) = command.into_parts();
        let author = comment.author.clone();

        let upserted = ctx
            .store
            .upsert(&mut ctx.indicators, &mut ctx.surface, line, comment)
            .map_err(|e| {
                log::warn!("dropping annotation from {} on line {}: {}", author, line, e);
                e
            })?;

        Ok(match upserted.outcome {
            UpsertOutcome::Unchanged => ChatOutcome::Duplicate { line },
            UpsertOutcome::Created | UpsertOutcome::Extended => ChatOutcome::Annotated {
                line,
                comments: (*upserted.comments).clone(),
            },
        })
    }

    /// Append text to the chat transcript and run the change hook on it
    pub fn append_chat_text(&mut self, text: &str) -> Vec<Result<ChatOutcome, AnnotationError>> {
        let span = self.chat.append(text);
        self.on_chat_document_changed(span.start, span.end)
    }

    /// Change hook of the chat transcript
    ///
    /// Parses every complete line the changed region touches. A trailing line
    /// still missing its newline waits for the change that finishes it. Only
    /// the transcript has this hook; edits to the target document, including
    /// the ones markers cause, never reach the parser.
    pub fn on_chat_document_changed(
        &mut self,
        start: usize,
        end: usize,
    ) -> Vec<Result<ChatOutcome, AnnotationError>> {
        let Some(lines) = self
            .chat
            .complete_lines(CharSpan::new(start, end))
            .and_then(|span| self.chat.slice(span))
        else {
            log::warn!("chat change {}..{} is outside the transcript", start, end);
            return Vec::new();
        };

        lines
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.on_incoming_chat_text(line, None))
            .collect()
    }

    // ========================================================================
    // Inbound cursor events
    // ========================================================================

    /// Handle a cursor transition reported for a marker
    ///
    /// Events for markers that no longer exist (replaced or cleared) are
    /// ignored.
    pub fn on_cursor_transition(&mut self, marker: MarkerId, direction: CursorDirection) -> Option<RevealText> {
        let ctx = self.context.as_mut()?;
        let Some(indicator) = ctx.indicators.find(marker) else {
            log::debug!("ignoring cursor event for stale marker {}", marker);
            return None;
        };

        self.reveal.on_cursor_transition(&mut ctx.surface, indicator, direction)
    }

    // ========================================================================
    // Clearing and listing
    // ========================================================================

    /// Remove one line's comments and marker
    pub fn clear_line(&mut self, line: usize) -> Result<Option<LineAnnotations>, AnnotationError> {
        let ctx = self.context.as_mut().ok_or(AnnotationError::NoDocument)?;
        let removed = ctx.store.clear(&mut ctx.indicators, &mut ctx.surface, line);
        Ok(removed.map(|comments| (*comments).clone()))
    }

    /// Remove every comment and marker in the attached document
    pub fn clear_all(&mut self) -> Result<usize, AnnotationError> {
        let ctx = self.context.as_mut().ok_or(AnnotationError::NoDocument)?;
        let cleared = ctx.store.clear_all(&mut ctx.indicators, &mut ctx.surface);
        log::info!("cleared {} annotated lines", cleared);
        Ok(cleared)
    }

    /// Every annotated line with its comments, ascending
    pub fn snapshot(&self) -> Vec<AnnotatedLine> {
        self.store()
            .map(|store| {
                store
                    .iter()
                    .map(|(line, comments)| AnnotatedLine {
                        line,
                        comments: (**comments).clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl<S: EditingSurface> Default for AnnotationSession<S> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
