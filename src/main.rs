//! doc-lsp binary: a stdio language server by default, plus query subcommands.
//!
//! Logging: set `RUST_LOG=doc_lsp=debug` to see parse and cache logs on stderr.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use doc_lsp::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol, logs go to stderr
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("doc_lsp=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    run(cli).await
}
