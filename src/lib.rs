//! doc-lsp: documentation for configuration variables, served over LSP
//!
//! A source file such as `settings.py` is documented by a companion markdown
//! file, `settings.py.md`, whose headings name the variables and whose
//! blockquotes hold their documentation. Nesting follows heading depth:
//!
//! ```markdown
//! ## DATABASES
//! > Dict of DB configs.
//!
//! ### {key}
//! #### NAME = "default"
//! > The DB name.
//! ```
//!
//! `DATABASES__default__NAME`, `DATABASES.default.NAME` and `NAME` seen in the
//! source all resolve to the `NAME` entry.
//!
//! # Architecture
//!
//! - [`document`]: markdown scanning, the heading tree, and the lookup index
//! - [`cache`]: parsed documents keyed by path and modification time
//! - [`identifier`]: the identifier under the cursor in a source buffer
//! - [`hover`] and [`completion`]: the LSP features
//! - [`server`]: the tower-lsp backend
//! - [`config`]: configuration management and settings
//!
//! ```ignore
//! use doc_lsp::document::Document;
//!
//! let document = Document::parse(&std::fs::read_to_string("settings.py.md")?);
//! let name = document.resolve("DATABASES__default__NAME");
//! ```

// Core model
pub mod cache;
pub mod document;

// LSP feature modules
pub mod completion;
pub mod hover;
pub mod identifier;
pub mod server;

// Configuration and entry points
pub mod cli;
pub mod config;

// Test utilities (only available in test builds)
#[cfg(test)]
pub mod test_utils;
