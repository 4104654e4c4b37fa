use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Documentation, Position, Range,
    TextEdit,
};

use crate::{
    document::{trailing_fragment, Document, Variable},
    hover::render_variable,
    identifier::{prefix_at, select_line},
};

use super::{Completable, Completer, Context};

/// Completes the last path fragment of the identifier before the cursor.
///
/// For `DATABASES__default__NA|` the fragment is `NA`, and accepting `NAME`
/// replaces just that fragment.
pub struct VariableCompleter<'a> {
    /// Identifier text before the cursor
    prefix: String,
    /// The part of `prefix` after its last separator
    fragment: String,
    line: u32,
    character: u32,
    document: &'a Document,
}

impl<'a> Completer<'a> for VariableCompleter<'a> {
    fn construct(context: Context<'a>, line: usize, character: usize) -> Option<Self>
    where
        Self: Sized + Completer<'a>,
    {
        // clients may send a column past the end of the line
        let character = select_line(context.rope, line)
            .map_or(0, |chars| character.min(chars.len())) as u32;
        let position = Position {
            line: line as u32,
            character,
        };
        let prefix = prefix_at(context.rope, position);
        let fragment = trailing_fragment(&prefix);

        Some(Self {
            prefix,
            fragment,
            line: line as u32,
            character,
            document: context.document,
        })
    }

    fn completions(&self) -> Vec<impl Completable<'a, Self>>
    where
        Self: Sized,
    {
        self.document.completion(&self.prefix)
    }
}

impl VariableCompleter<'_> {
    fn fragment_range(&self) -> Range {
        let fragment_len = self.fragment.chars().count() as u32;

        Range {
            start: Position {
                line: self.line,
                character: self.character.saturating_sub(fragment_len),
            },
            end: Position {
                line: self.line,
                character: self.character,
            },
        }
    }
}

impl<'a> Completable<'a, VariableCompleter<'a>> for &'a Variable {
    fn completions(&self, completer: &VariableCompleter<'a>) -> Option<CompletionItem> {
        let variable: &'a Variable = *self;

        Some(CompletionItem {
            label: variable.name.clone(),
            kind: Some(CompletionItemKind::VARIABLE),
            detail: Some(variable.full_path.clone()),
            documentation: Some(Documentation::MarkupContent(render_variable(variable))),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                range: completer.fragment_range(),
                new_text: variable.name.clone(),
            })),
            ..Default::default()
        })
    }
}
