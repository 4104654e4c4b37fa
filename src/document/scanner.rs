//! Line scanning of the companion markdown file.
//!
//! Only a small dialect is meaningful here: the region markers, headings of
//! two to six `#`, and the blockquote that immediately follows a heading in
//! either the fenced (`>>>`) or the line-prefixed (`>`) form. Everything else
//! is inert text.

use once_cell::sync::Lazy;
use regex::Regex;

pub const DOC_START_MARKER: &str = "<!-- doc-start -->";
pub const DOC_END_MARKER: &str = "<!-- doc-end -->";

const FENCE: &str = ">>>";
const QUOTE: char = '>';
const FALLBACK_START: &str = "## ";

/// Half-open range of line indexes that make up the documentation region.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

/// Locates the documentation region, or `None` when neither the start marker
/// nor a level-1 heading exists.
pub fn find_region(lines: &[&str]) -> Option<Region> {
    let start = lines
        .iter()
        .position(|line| line.contains(DOC_START_MARKER))
        .map(|idx| idx + 1)
        .or_else(|| {
            lines
                .iter()
                .position(|line| line.starts_with(FALLBACK_START))
        })?;

    let end = lines
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, line)| line.contains(DOC_END_MARKER))
        .map(|(idx, _)| idx)
        .unwrap_or(lines.len());

    Some(Region { start, end })
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LineKind<'a> {
    Heading {
        level: usize,
        title: &'a str,
        default: Option<&'a str>,
    },
    Body,
}

pub fn classify(line: &str) -> LineKind<'_> {
    static HEADING_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?<starter>#{2,6}) (?<heading_text>.*)$").unwrap());

    let Some(captures) = HEADING_RE.captures(line) else {
        return LineKind::Body;
    };

    match (captures.name("starter"), captures.name("heading_text")) {
        (Some(starter), Some(heading_text)) => {
            let (title, default) = match heading_text.as_str().split_once('=') {
                Some((title, default)) => (title, Some(default.trim())),
                None => (heading_text.as_str(), None),
            };

            LineKind::Heading {
                level: starter.as_str().len() - 1,
                title: title.trim(),
                default: default.filter(|value| !value.is_empty()),
            }
        }
        _ => LineKind::Body,
    }
}

/// The documentation attached to a heading, and where scanning resumes.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Block {
    pub body: String,
    pub resume: usize,
}

/// Extracts the blockquote that follows a heading.
///
/// `start` is the line right after the heading; `end` is the region boundary.
pub fn extract_block(lines: &[&str], start: usize, end: usize) -> Block {
    let mut idx = start;
    while idx < end && lines[idx].trim().is_empty() {
        idx += 1;
    }

    if idx < end && lines[idx].trim() == FENCE {
        idx += 1;
        let content_start = idx;
        while idx < end && lines[idx].trim() != FENCE {
            idx += 1;
        }

        let body = lines[content_start..idx].join("\n").trim().to_string();
        // step over the closing fence when there is one
        let resume = if idx < end { idx + 1 } else { idx };

        return Block { body, resume };
    }

    if idx < end && lines[idx].starts_with(QUOTE) {
        let content_start = idx;
        while idx < end && lines[idx].starts_with(QUOTE) {
            idx += 1;
        }

        let body = lines[content_start..idx]
            .iter()
            .map(|line| line[QUOTE.len_utf8()..].trim())
            .collect::<Vec<_>>()
            .join("\n");

        return Block { body, resume: idx };
    }

    Block {
        body: String::new(),
        resume: start,
    }
}

/// A heading found inside the documentation region, with its body.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ScannedHeading {
    pub level: usize,
    pub title: String,
    pub body: String,
    /// Text after `=` on the heading line, if any.
    pub default: Option<String>,
    /// Zero-based line of the heading in the markdown file.
    pub line: usize,
}

pub fn scan(text: &str) -> Vec<ScannedHeading> {
    let lines: Vec<&str> = text.lines().collect();
    let Some(region) = find_region(&lines) else {
        return vec![];
    };

    let mut headings = vec![];
    let mut idx = region.start;
    while idx < region.end {
        match classify(lines[idx]) {
            LineKind::Heading {
                level,
                title,
                default,
            } => {
                let block = extract_block(&lines, idx + 1, region.end);
                headings.push(ScannedHeading {
                    level,
                    title: title.to_string(),
                    body: block.body,
                    default: default.map(String::from),
                    line: idx,
                });
                idx = block.resume;
            }
            LineKind::Body => idx += 1,
        }
    }

    headings
}
