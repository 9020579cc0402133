//! Session configuration
//!
//! Connection identity (channel, nick, password) belongs to the chat
//! transport and is carried here untouched. The engine itself only reads the
//! marker and formatting tunables.

use crate::errors::AnnotationError;
use crate::models::MarkerStyle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the trailing artifact the chat transport appends to messages
pub const DEFAULT_SUFFIX_LEN: usize = 9;

/// Glyph drawn in the left margin of annotated lines
pub const DEFAULT_MARKER_GLYPH: &str = "left-triangle";

/// Face used for comment authors in the reveal text
pub const DEFAULT_AUTHOR_STYLE: &str = "highlight";

/// Separator between comments in the reveal text
pub const DEFAULT_SEPARATOR: &str = "; ";

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Chat channel to join
    pub channel: Option<String>,

    /// Chat user name
    pub nick: Option<String>,

    /// Chat credential (never serialized back out)
    #[serde(skip_serializing)]
    pub password: Option<String>,

    pub marker_glyph: String,

    pub author_style: String,

    /// Characters stripped from comments ending in `]` (0 disables stripping)
    pub suffix_len: usize,

    pub separator: String,
}

impl SessionConfig {
    /// Load a configuration from YAML
    ///
    /// Missing keys take their defaults, so an empty document is valid.
    pub fn from_yaml(source: &str) -> Result<Self, AnnotationError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| AnnotationError::InvalidConfig(e.to_string()))
    }

    pub fn marker_style(&self) -> MarkerStyle {
        MarkerStyle::left_margin(self.marker_glyph.clone())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            channel: None,
            nick: None,
            password: None,
            marker_glyph: DEFAULT_MARKER_GLYPH.to_string(),
            author_style: DEFAULT_AUTHOR_STYLE.to_string(),
            suffix_len: DEFAULT_SUFFIX_LEN,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("channel", &self.channel)
            .field("nick", &self.nick)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("marker_glyph", &self.marker_glyph)
            .field("author_style", &self.author_style)
            .field("suffix_len", &self.suffix_len)
            .field("separator", &self.separator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = SessionConfig::from_yaml("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.suffix_len, 9);
        assert_eq!(config.separator, "; ");
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = SessionConfig::from_yaml("channel: \"#rustlang\"\nnick: streamer\nsuffix_len: 0\n").unwrap();
        assert_eq!(config.channel.as_deref(), Some("#rustlang"));
        assert_eq!(config.nick.as_deref(), Some("streamer"));
        assert_eq!(config.suffix_len, 0);
        assert_eq!(config.marker_glyph, DEFAULT_MARKER_GLYPH);
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let result = SessionConfig::from_yaml("suffix_len: [not a number");
        assert!(matches!(result, Err(AnnotationError::InvalidConfig(_))));
    }

    #[test]
    fn test_password_is_not_leaked() {
        let config = SessionConfig::from_yaml("password: oauth:secret\n").unwrap();
        assert_eq!(config.password.as_deref(), Some("oauth:secret"));

        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("secret"));
    }

    #[test]
    fn test_marker_style_uses_configured_glyph() {
        let config = SessionConfig {
            marker_glyph: "dot".to_string(),
            ..SessionConfig::default()
        };
        assert_eq!(config.marker_style(), MarkerStyle::left_margin("dot"));
    }
}
