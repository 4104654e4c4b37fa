//! Locating the identifier under the cursor in a source buffer.
//!
//! Source files are not tokenized. An identifier is any run of alphanumerics,
//! `_`, `.` and `-`, which covers `SERVER`, `DATABASES__default__NAME`,
//! `DATABASES.default.NAME` and YAML style `log-level` keys alike. Positions
//! count chars within the line.

use ropey::Rope;
use tower_lsp::lsp_types::{Position, Range};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub text: String,
    pub range: Range,
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Separators that cannot start or end an identifier.
fn is_edge_separator(c: char) -> bool {
    matches!(c, '.' | '-')
}

pub fn select_line(rope: &Rope, line: usize) -> Option<Vec<char>> {
    rope.get_line(line).map(|slice| {
        slice
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .collect()
    })
}

/// The identifier containing the cursor, or ending right at it.
pub fn identifier_at(rope: &Rope, position: Position) -> Option<Identifier> {
    let chars = select_line(rope, position.line as usize)?;
    let cursor = position.character as usize;
    if cursor > chars.len() {
        return None;
    }

    let mut start = cursor;
    while start > 0 && is_identifier_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = cursor;
    while end < chars.len() && is_identifier_char(chars[end]) {
        end += 1;
    }

    while start < end && is_edge_separator(chars[start]) {
        start += 1;
    }
    while end > start && is_edge_separator(chars[end - 1]) {
        end -= 1;
    }

    if start == end {
        return None;
    }

    Some(Identifier {
        text: chars[start..end].iter().collect(),
        range: Range {
            start: Position {
                line: position.line,
                character: start as u32,
            },
            end: Position {
                line: position.line,
                character: end as u32,
            },
        },
    })
}

/// The identifier characters immediately before the cursor; empty when the
/// cursor does not follow an identifier.
pub fn prefix_at(rope: &Rope, position: Position) -> String {
    let Some(chars) = select_line(rope, position.line as usize) else {
        return String::new();
    };
    let cursor = (position.character as usize).min(chars.len());

    let mut start = cursor;
    while start > 0 && is_identifier_char(chars[start - 1]) {
        start -= 1;
    }

    chars[start..cursor].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{position, rope, SETTINGS_PY};

    fn text_at(text: &str, line: u32, character: u32) -> Option<String> {
        identifier_at(&rope(text), position(line, character)).map(|id| id.text)
    }

    #[test]
    fn finds_word_around_cursor() {
        assert_eq!(text_at(SETTINGS_PY, 0, 3), Some("SERVER".to_string()));
        assert_eq!(text_at(SETTINGS_PY, 0, 0), Some("SERVER".to_string()));
        assert_eq!(text_at(SETTINGS_PY, 0, 6), Some("SERVER".to_string()));
        assert_eq!(text_at(SETTINGS_PY, 0, 12), Some("localhost".to_string()));
    }

    #[test]
    fn keeps_path_separators() {
        assert_eq!(
            text_at(SETTINGS_PY, 10, 14),
            Some("DATABASES__default__NAME".to_string())
        );
        assert_eq!(
            text_at("x = settings.DATABASES.default.", 0, 20),
            Some("settings.DATABASES.default".to_string())
        );
        assert_eq!(text_at("log-level: debug", 0, 2), Some("log-level".to_string()));
    }

    #[test]
    fn reports_range() {
        let identifier = identifier_at(&rope(SETTINGS_PY), position(1, 1)).unwrap();
        assert_eq!(identifier.text, "PORT");
        assert_eq!(identifier.range.start, position(1, 0));
        assert_eq!(identifier.range.end, position(1, 4));
    }

    #[test]
    fn nothing_outside_identifiers() {
        assert_eq!(text_at("a = {", 0, 4), None);
        assert_eq!(text_at("   ", 0, 1), None);
        assert_eq!(text_at(SETTINGS_PY, 0, 200), None);
        assert_eq!(text_at(SETTINGS_PY, 500, 0), None);
    }

    #[test]
    fn prefix_stops_at_cursor() {
        let text = rope(SETTINGS_PY);
        assert_eq!(prefix_at(&text, position(0, 4)), "SERV");
        assert_eq!(prefix_at(&text, position(0, 0)), "");
        assert_eq!(prefix_at(&text, position(4, 0)), "");
        assert_eq!(prefix_at(&text, position(10, 12)), "DATABASES__d");
        assert_eq!(prefix_at(&text, position(500, 3)), "");
    }
}
