//! Shared types for the WASM API
//!
//! This module contains the result types returned to JavaScript.

use serde::{Deserialize, Serialize};

use crate::annotations::SurfaceOp;
use crate::session::ChatOutcome;

/// Marker and message operations the host must apply, in order
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SurfaceUpdate {
    pub ops: Vec<SurfaceOp>,
}

impl SurfaceUpdate {
    pub fn new(ops: Vec<SurfaceOp>) -> Self {
        Self { ops }
    }

    /// Append operations drained from another surface
    pub fn extend(&mut self, ops: Vec<SurfaceOp>) {
        self.ops.extend(ops);
    }
}

/// Result of ingesting one chat line
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatResult {
    pub outcome: ChatOutcome,
    pub update: SurfaceUpdate,
}

/// Result of appending text to the chat transcript
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatBatchResult {
    pub outcomes: Vec<ChatOutcome>,
    /// Annotations that were dropped, one message each
    pub errors: Vec<String>,
    pub update: SurfaceUpdate,
}
