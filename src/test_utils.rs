//! Shared test utilities for doc-lsp.
//!
//! This module provides common fixtures used across multiple test modules.
//! It is only compiled when running tests.

use std::fs;
use std::path::PathBuf;

use ropey::Rope;
use tempfile::TempDir;
use tower_lsp::lsp_types::Position;

/// A companion document exercising every construct of the dialect: the region
/// markers, both quote forms, `=` defaults, `{key}` and `[item]` placeholders,
/// and a `NAME` leaf that appears under two parents.
pub const SETTINGS_DOC: &str = r#"# Settings

Some intro that is ignored.

<!-- doc-start -->

## SERVER
> This variable defines which server the system is connected to.

## PORT = 1234
> Port used to connect to server.

## DEBUG
>>>
Enable or disable debugging mode.

Never enable it in production.
>>>

## DEFAULT_ORG
> The default organization.

## DATABASES
> Dict of DB configs.

### {key}
>>>
Per-database config block.
>>>

#### NAME
> The DB name.
> Either a filename or a connection string.

#### {key}.OPTIONS
> Arbitrary driver options.

##### TLS_VERIFICATION
> Whether TLS is verified.

##### {key}.OPTIONS.TIMEOUT = 30
> Time out in seconds.

## authors
> The blog authors.

### authors[item].name
> The name of the author.

### [item].url
> The URL of the author.

<!-- doc-end -->

## IGNORED
> Outside the region.
"#;

/// A settings source file documented by [`SETTINGS_DOC`].
pub const SETTINGS_PY: &str = r#"SERVER = "localhost"
PORT = 1234
DEBUG = True
DEFAULT_ORG = "Acme"

DATABASES = {
    "default": {
        "NAME": "foo",
    }
}
DATABASES__default__NAME = "bar"
"#;

pub fn rope(text: &str) -> Rope {
    Rope::from_str(text)
}

pub fn position(line: u32, character: u32) -> Position {
    Position { line, character }
}

/// Creates a temporary workspace holding `settings.py` and, when `doc` is
/// given, its `settings.py.md` companion.
///
/// Returns a tuple of (TempDir, PathBuf) where:
/// - TempDir: The temp directory handle (must be kept alive for the test duration)
/// - PathBuf: The path to `settings.py`
pub fn create_settings_workspace(doc: Option<&str>) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source = temp_dir.path().join("settings.py");
    fs::write(&source, SETTINGS_PY).expect("Failed to write settings.py");

    if let Some(doc) = doc {
        fs::write(temp_dir.path().join("settings.py.md"), doc)
            .expect("Failed to write settings.py.md");
    }

    (temp_dir, source)
}
