//! Parsing module for chat commands
//!
//! This module turns raw chat lines into structured annotation commands.
//! Most chat traffic is ordinary conversation, so a line that is not a
//! command parses to `None` rather than an error.

pub mod command;

// Re-export commonly used types
pub use command::*;
