//! Hover provider for documented configuration variables.
//!
//! This module implements the LSP `textDocument/hover` capability: the
//! identifier under the cursor is resolved against the companion document and
//! its documentation is rendered as markdown.
//!
//! # Configuration
//!
//! Hover can be disabled via [`Settings::hover`]:
//!
//! ```toml
//! hover = false
//! ```

use ropey::Rope;
use tower_lsp::lsp_types::{Hover, HoverContents, HoverParams, MarkupContent, MarkupKind};

use crate::{config::Settings, document::Document, document::Variable, identifier::identifier_at};

/// Generate hover content for the identifier at the cursor position.
///
/// # Returns
///
/// `Some(Hover)` with markdown content, or `None` if:
/// - Hover is disabled in settings
/// - Cursor is not on an identifier
/// - The identifier has no documentation
pub fn hover(
    document: &Document,
    rope: &Rope,
    params: &HoverParams,
    settings: &Settings,
) -> Option<Hover> {
    if !settings.hover {
        return None;
    }

    let cursor_position = params.text_document_position_params.position;
    let identifier = identifier_at(rope, cursor_position)?;
    let variable = document.resolve(&identifier.text)?;

    Some(Hover {
        contents: HoverContents::Markup(render_variable(variable)),
        range: Some(identifier.range),
    })
}

pub fn render_variable(variable: &Variable) -> MarkupContent {
    let mut value = format!("**{}** `{}`\n\n", variable.name, variable.full_path);

    match variable.doc.is_empty() {
        true => value.push_str("_No documentation._"),
        false => value.push_str(&variable.doc),
    }

    if let Some(default) = &variable.default {
        value.push_str(&format!("\n\nDefault: `{default}`"));
    }

    MarkupContent {
        kind: MarkupKind::Markdown,
        value,
    }
}
