//! `!line` command grammar
//!
//! ```text
//! "<" AUTHOR ">" WS "!line" WS LINE_NUMBER WS COMMENT
//! ```
//!
//! AUTHOR is one or more characters other than angle brackets, LINE_NUMBER is
//! one or more decimal digits, and COMMENT is the rest of the line, starting
//! at its first non-whitespace character.
//!
//! When the transport reports the sender itself, the text carries no author
//! and is matched against the bare form `"!line" WS LINE_NUMBER WS COMMENT`.

use crate::config::DEFAULT_SUFFIX_LEN;
use crate::models::AnnotationCommand;
use once_cell::sync::Lazy;
use regex::Regex;

static COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<([^<>]+)>\s+!line\s+(\d+)\s+(\S.*)$").expect("command pattern is valid")
});

static BARE_COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!line\s+(\d+)\s+(\S.*)$").expect("bare command pattern is valid"));

/// Parser for `!line` chat commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandParser {
    /// Length of the transport artifact trailing `]`-terminated comments
    suffix_len: usize,
}

impl CommandParser {
    pub fn new(suffix_len: usize) -> Self {
        Self { suffix_len }
    }

    /// Parse one raw chat line
    ///
    /// Returns `None` for anything that is not a well-formed command. The line
    /// number is not checked against any document.
    pub fn parse(&self, raw: &str) -> Option<AnnotationCommand> {
        let raw = raw.trim_end_matches(['\r', '\n']);
        let Some(caps) = COMMAND_RE.captures(raw) else {
            log::debug!("ignoring chat line: {:?}", raw);
            return None;
        };

        self.build(&caps[1], &caps[2], &caps[3])
    }

    /// Parse the text of a chat message whose sender the transport reported
    ///
    /// The text is `!line N comment` with no `<author>` prefix; `author` is
    /// the only identity used, so a prefix typed into the message is never
    /// trusted.
    pub fn parse_from(&self, author: &str, text: &str) -> Option<AnnotationCommand> {
        let text = text.trim_end_matches(['\r', '\n']);
        if author.is_empty() || author.contains(['<', '>']) {
            log::debug!("ignoring message from unusable author {:?}", author);
            return None;
        }
        let Some(caps) = BARE_COMMAND_RE.captures(text) else {
            log::debug!("ignoring message from {}: {:?}", author, text);
            return None;
        };

        self.build(author, &caps[1], &caps[2])
    }

    fn build(&self, author: &str, line: &str, comment: &str) -> Option<AnnotationCommand> {
        let line = match line.parse::<usize>() {
            Ok(line) => line,
            Err(e) => {
                log::debug!("ignoring command with unusable line number {:?}: {}", line, e);
                return None;
            }
        };
        let comment = self.strip_suffix(comment)?;

        Some(AnnotationCommand {
            author: author.to_string(),
            line,
            comment,
        })
    }

    /// Drop the transport's trailing artifact from a comment
    ///
    /// Only comments ending in `]` carry the artifact. A comment that is
    /// nothing but the artifact yields `None`.
    fn strip_suffix(&self, comment: &str) -> Option<String> {
        if self.suffix_len == 0 || !comment.ends_with(']') {
            return Some(comment.to_string());
        }

        let len = comment.chars().count();
        if len < self.suffix_len {
            return Some(comment.to_string());
        }

        let stripped: String = comment.chars().take(len - self.suffix_len).collect();
        if stripped.is_empty() {
            log::debug!("ignoring command whose comment is only a transport suffix");
            return None;
        }
        Some(stripped)
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIX_LEN)
    }
}

/// Parse a raw chat line with the default suffix length
pub fn parse(raw: &str) -> Option<AnnotationCommand> {
    CommandParser::default().parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(author: &str, line: usize, comment: &str) -> AnnotationCommand {
        AnnotationCommand {
            author: author.to_string(),
            line,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_parse_basic_command() {
        assert_eq!(
            parse("<alice> !line 5 use a hashmap here"),
            Some(command("alice", 5, "use a hashmap here"))
        );
    }

    #[test]
    fn test_parse_keeps_punctuation_in_comment() {
        assert_eq!(
            parse("<bob> !line 5 nah, use a tree"),
            Some(command("bob", 5, "nah, use a tree"))
        );
    }

    #[test]
    fn test_parse_author_with_spaces_and_symbols() {
        assert_eq!(
            parse("<some user_42> !line 12 rename this"),
            Some(command("some user_42", 12, "rename this"))
        );
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        assert_eq!(
            parse("<alice>\t!line   7    spaced out"),
            Some(command("alice", 7, "spaced out"))
        );
    }

    #[test]
    fn test_parse_strips_line_terminator() {
        assert_eq!(
            parse("<alice> !line 3 typo here\r\n"),
            Some(command("alice", 3, "typo here"))
        );
    }

    #[test]
    fn test_parse_missing_author() {
        assert_eq!(parse("!line 3 missing author"), None);
    }

    #[test]
    fn test_parse_rejects_non_commands() {
        assert_eq!(parse("<alice> hello chat"), None);
        assert_eq!(parse("<alice> !lines 3 nope"), None);
        assert_eq!(parse("<alice> !line three words"), None);
        assert_eq!(parse("<alice> !line 3"), None);
        assert_eq!(parse("<alice> !line 3 "), None);
        assert_eq!(parse("<alice> !line 1   "), None);
        assert_eq!(parse("<alice> !line 1 \t "), None);
        assert_eq!(parse("<> !line 3 empty author"), None);
        assert_eq!(parse("<a<b> !line 3 nested bracket"), None);
        assert_eq!(parse("<alice>!line 3 no gap"), None);
        assert_eq!(parse("<alice> !line -3 negative"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_parse_line_zero_is_left_to_caller() {
        assert_eq!(parse("<alice> !line 0 top"), Some(command("alice", 0, "top")));
    }

    #[test]
    fn test_parse_rejects_overflowing_line_number() {
        assert_eq!(parse("<alice> !line 99999999999999999999999999 far"), None);
    }

    #[test]
    fn test_strip_transport_suffix() {
        assert_eq!(
            parse("<alice> !line 5 use a hashmap here [12:34]"),
            Some(command("alice", 5, "use a hashmap her"))
        );
        assert_eq!(
            parse("<alice> !line 5 fix this  [12:34]"),
            Some(command("alice", 5, "fix this"))
        );
    }

    #[test]
    fn test_no_strip_without_closing_bracket() {
        assert_eq!(
            parse("<alice> !line 5 see [docs] please"),
            Some(command("alice", 5, "see [docs] please"))
        );
    }

    #[test]
    fn test_strip_uses_configured_length() {
        let parser = CommandParser::new(3);
        assert_eq!(
            parser.parse("<alice> !line 2 ok [x]"),
            Some(command("alice", 2, "ok "))
        );

        let parser = CommandParser::new(0);
        assert_eq!(
            parser.parse("<alice> !line 2 ok [x]"),
            Some(command("alice", 2, "ok [x]"))
        );
    }

    #[test]
    fn test_short_bracketed_comment_is_kept() {
        assert_eq!(parse("<alice> !line 2 [x]"), Some(command("alice", 2, "[x]")));
    }

    #[test]
    fn test_comment_consumed_by_suffix_is_dropped() {
        assert_eq!(parse("<alice> !line 2 xx[12:34]"), None);
    }

    #[test]
    fn test_strip_counts_chars_not_bytes() {
        assert_eq!(
            parse("<alice> !line 1 très bien [12:34]"),
            Some(command("alice", 1, "très bie"))
        );
    }

    #[test]
    fn test_parse_from_uses_reported_author() {
        let parser = CommandParser::default();
        assert_eq!(
            parser.parse_from("bob", "!line 2 love it\n"),
            Some(command("bob", 2, "love it"))
        );
        assert_eq!(parser.parse_from("bob", "!line 2 <3 love it"), Some(command("bob", 2, "<3 love it")));
    }

    #[test]
    fn test_parse_from_rejects_embedded_prefix() {
        let parser = CommandParser::default();
        assert_eq!(parser.parse_from("mallory", "<alice> !line 2 spoofed"), None);
        assert_eq!(parser.parse_from("bob", "<3 !line 2 love it"), None);
        assert_eq!(parser.parse_from("bob", "!line 2   "), None);
        assert_eq!(parser.parse_from("", "!line 2 nobody"), None);
        assert_eq!(parser.parse_from("a<b", "!line 2 bad author"), None);
    }
}
