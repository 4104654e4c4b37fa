//! The language server: open buffers, the document cache, and the LSP
//! handlers that tie them to [`hover`](crate::hover) and
//! [`completion`](crate::completion).

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use ropey::Rope;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidChangeWatchedFilesParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    DidSaveTextDocumentParams, Hover, HoverParams, HoverProviderCapability, InitializeParams,
    InitializeResult, InitializedParams, MessageType, ServerCapabilities, ServerInfo,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};

use crate::{
    cache::{companion_path, DocumentCache},
    completion::get_completions,
    config::Settings,
    document::Document,
    hover::hover,
};

pub const SERVER_NAME: &str = "doc-lsp";

pub struct Backend {
    client: Client,
    settings: RwLock<Settings>,
    open_files: RwLock<HashMap<PathBuf, Rope>>,
    cache: RwLock<DocumentCache>,
}

fn uri_path(uri: &Url) -> Option<PathBuf> {
    uri.to_file_path().ok()
}

impl Backend {
    pub fn new(client: Client) -> Backend {
        Backend {
            client,
            settings: RwLock::new(Settings::default()),
            open_files: RwLock::new(HashMap::new()),
            cache: RwLock::new(DocumentCache::new()),
        }
    }

    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// The parsed companion of `source`, if it exists and could be read.
    async fn document_for(&self, source: &Path) -> Option<Arc<Document>> {
        let suffix = self.settings.read().await.doc_suffix.clone();
        let doc_path = companion_path(source, &suffix);

        let loaded = self.cache.write().await.load(&doc_path);
        match loaded {
            Ok(document) => document,
            Err(err) => {
                warn!(path = %doc_path.display(), "{err}");
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Failed to load documentation: {err}"),
                    )
                    .await;
                None
            }
        }
    }

    async fn rope_for(&self, path: &Path) -> Option<Rope> {
        self.open_files.read().await.get(path).cloned()
    }

    async fn invalidate(&self, path: &Path) {
        if self.cache.write().await.invalidate(path) {
            debug!(path = %path.display(), "invalidated documentation");
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        #[allow(deprecated)]
        let root_dir = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|folder| uri_path(&folder.uri))
            .or_else(|| params.root_uri.as_ref().and_then(uri_path));

        let settings = match root_dir {
            Some(root_dir) => Settings::new(&root_dir, &params.capabilities).unwrap_or_else(|err| {
                warn!(root = %root_dir.display(), "using default settings: {err}");
                Settings::from_capabilities(&params.capabilities)
            }),
            None => Settings::from_capabilities(&params.capabilities),
        };
        *self.settings.write().await = settings;

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![".".to_string(), "_".to_string()]),
                    ..Default::default()
                }),
                ..Default::default()
            },
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("{SERVER_NAME} initialized");
        self.client
            .log_message(MessageType::INFO, format!("{SERVER_NAME} initialized"))
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let Some(path) = uri_path(&params.text_document.uri) else {
            return;
        };
        self.open_files
            .write()
            .await
            .insert(path, Rope::from_str(&params.text_document.text));
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let Some(path) = uri_path(&params.text_document.uri) else {
            return;
        };
        // full sync: the last change carries the whole text
        if let Some(change) = params.content_changes.last() {
            self.open_files
                .write()
                .await
                .insert(path, Rope::from_str(&change.text));
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        if let Some(path) = uri_path(&params.text_document.uri) {
            self.invalidate(&path).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        if let Some(path) = uri_path(&params.text_document.uri) {
            self.open_files.write().await.remove(&path);
        }
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        for change in params.changes {
            if let Some(path) = uri_path(&change.uri) {
                self.invalidate(&path).await;
            }
        }
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let Some(path) = uri_path(&params.text_document_position_params.text_document.uri) else {
            return Ok(None);
        };
        let Some(rope) = self.rope_for(&path).await else {
            return Ok(None);
        };
        let Some(document) = self.document_for(&path).await else {
            return Ok(None);
        };

        let settings = self.settings().await;
        Ok(hover(&document, &rope, &params, &settings))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let settings = self.settings().await;
        if !settings.completion {
            return Ok(None);
        }

        let empty = Ok(Some(CompletionResponse::Array(vec![])));
        let Some(path) = uri_path(&params.text_document_position.text_document.uri) else {
            return empty;
        };
        let Some(rope) = self.rope_for(&path).await else {
            return empty;
        };
        let Some(document) = self.document_for(&path).await else {
            return empty;
        };

        Ok(get_completions(&document, &rope, &params, &settings))
    }
}

/// Serves the protocol over stdin/stdout until the client disconnects.
pub async fn run_stdio() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
