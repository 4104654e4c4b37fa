//! Completion of documented variable names.
//!
//! Completers follow a construct-then-complete shape: [`Completer::construct`]
//! inspects the line at the cursor and bails out with `None` when it does not
//! apply, then [`Completer::completions`] yields candidates that each render
//! themselves into a [`CompletionItem`].

use ropey::Rope;
use tower_lsp::lsp_types::{CompletionItem, CompletionParams, CompletionResponse};

use crate::{config::Settings, document::Document};

use self::variable_completer::VariableCompleter;

mod variable_completer;

#[derive(Clone, Copy)]
pub struct Context<'a> {
    document: &'a Document,
    rope: &'a Rope,
    settings: &'a Settings,
}

pub trait Completer<'a>: Sized {
    fn construct(context: Context<'a>, line: usize, character: usize) -> Option<Self>
    where
        Self: Sized + Completer<'a>;

    fn completions(&self) -> Vec<impl Completable<'a, Self>>
    where
        Self: Sized;
}

pub trait Completable<'a, T: Completer<'a>>: Sized {
    fn completions(&self, completer: &T) -> Option<CompletionItem>;
}

/// Completions for the identifier being typed. A disabled setting gives
/// `None`; anything else, including "nothing to suggest", is an array.
pub fn get_completions(
    document: &Document,
    rope: &Rope,
    params: &CompletionParams,
    settings: &Settings,
) -> Option<CompletionResponse> {
    if !settings.completion {
        return None;
    }

    let completion_context = Context {
        document,
        rope,
        settings,
    };

    let items = run_completer::<VariableCompleter>(
        completion_context,
        params.text_document_position.position.line,
        params.text_document_position.position.character,
    )
    .unwrap_or_default();

    Some(CompletionResponse::Array(items))
}

fn run_completer<'a, T: Completer<'a>>(
    context: Context<'a>,
    line: u32,
    character: u32,
) -> Option<Vec<CompletionItem>> {
    let completer = T::construct(context, line as usize, character as usize)?;
    let completions = completer.completions();

    let completions = completions
        .into_iter()
        .take(context.settings.completion_limit)
        .flat_map(|completable| completable.completions(&completer))
        .collect::<Vec<CompletionItem>>();

    Some(completions)
}
