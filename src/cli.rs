//! Command line entry points.
//!
//! Besides serving the protocol, the binary can query a documentation file
//! directly, which is handy when writing one.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use clap::{Parser, Subcommand};

use crate::{document::Document, server::run_stdio};

#[derive(Parser, Debug)]
#[command(name = "doc-lsp", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Serve the language server protocol over stdio (default)
    Serve,
    /// Print the documentation an identifier resolves to, as JSON
    Resolve {
        /// Markdown documentation file
        doc: PathBuf,
        /// Identifier as it appears in source, e.g. `DATABASES__default__NAME`
        query: String,
    },
    /// Print the completions for a prefix, as JSON
    Complete { doc: PathBuf, prefix: String },
    /// Print every documented variable, as JSON
    Dump { doc: PathBuf },
}

fn load_document(path: &Path) -> anyhow::Result<Document> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| anyhow!("Can't read {}: {err}", path.display()))?;
    Ok(Document::parse(&text))
}

/// Runs a query subcommand and returns the JSON it prints.
pub fn query(command: &Command) -> anyhow::Result<String> {
    let json = match command {
        Command::Serve => return Err(anyhow!("serve is not a query")),
        Command::Resolve { doc, query } => {
            serde_json::to_string_pretty(&load_document(doc)?.resolve(query))?
        }
        Command::Complete { doc, prefix } => {
            serde_json::to_string_pretty(&load_document(doc)?.completion(prefix))?
        }
        Command::Dump { doc } => serde_json::to_string_pretty(load_document(doc)?.variables())?,
    };

    Ok(json)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            run_stdio().await;
            Ok(())
        }
        command => {
            println!("{}", query(&command)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::SETTINGS_DOC;

    fn doc_file() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.py.md");
        fs::write(&path, SETTINGS_DOC).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["doc-lsp"]).unwrap();
        assert_eq!(cli.command, None);

        let cli = Cli::try_parse_from(["doc-lsp", "resolve", "a.md", "SERVER"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Resolve {
                doc: PathBuf::from("a.md"),
                query: "SERVER".to_string(),
            })
        );
    }

    #[test]
    fn resolve_prints_variable() {
        let (_temp_dir, doc) = doc_file();

        let json = query(&Command::Resolve {
            doc,
            query: "PORT".to_string(),
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "PORT");
        assert_eq!(value["full_path"], "PORT");
        assert_eq!(value["default"], "1234");
    }

    #[test]
    fn unresolved_prints_null() {
        let (_temp_dir, doc) = doc_file();

        let json = query(&Command::Resolve {
            doc,
            query: "MISSING".to_string(),
        })
        .unwrap();

        assert_eq!(json, "null");
    }

    #[test]
    fn complete_and_dump() {
        let (_temp_dir, doc) = doc_file();

        let json = query(&Command::Complete {
            doc: doc.clone(),
            prefix: "D".to_string(),
        })
        .unwrap();
        let completions: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(completions.len(), 3);

        let json = query(&Command::Dump { doc }).unwrap();
        let variables: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(variables.len(), 12);
        assert!(variables[0].get("default").is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = query(&Command::Dump {
            doc: PathBuf::from("/nonexistent/doc.md"),
        });
        assert!(result.is_err());
    }
}
