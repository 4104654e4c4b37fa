//! Parsed companion documents, keyed by path and invalidated by modification time.
//!
//! A cached [`Document`] is never mutated. A newer file on disk produces a new
//! `Arc<Document>` that replaces the entry wholesale, so readers holding the
//! previous snapshot keep a consistent view.

use std::{
    collections::HashMap,
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
    time::SystemTime,
};

use anyhow::anyhow;
use tracing::debug;

use crate::document::Document;

#[derive(Debug, Clone)]
struct CachedDocument {
    modified: SystemTime,
    document: Arc<Document>,
}

#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: HashMap<PathBuf, CachedDocument>,
}

impl DocumentCache {
    pub fn new() -> DocumentCache {
        DocumentCache::default()
    }

    /// Returns the document parsed from `path`, re-reading it only when the
    /// modification time differs from the cached one. A missing file is
    /// `Ok(None)`.
    pub fn load(&mut self, path: &Path) -> anyhow::Result<Option<Arc<Document>>> {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.entries.remove(path);
                return Ok(None);
            }
            Err(err) => return Err(anyhow!("Can't stat {}: {err}", path.display())),
        };
        let modified = metadata.modified()?;

        if let Some(cached) = self.entries.get(path) {
            if cached.modified == modified {
                return Ok(Some(cached.document.clone()));
            }
        }

        let text = std::fs::read_to_string(path)
            .map_err(|err| anyhow!("Can't read {}: {err}", path.display()))?;
        let document = Arc::new(Document::parse(&text));

        debug!(path = %path.display(), variables = document.len(), "cached documentation");

        self.entries.insert(
            path.to_path_buf(),
            CachedDocument {
                modified,
                document: document.clone(),
            },
        );

        Ok(Some(document))
    }

    /// Drops the entry for `path`; returns whether one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The documentation file for `source`: its full path with `suffix` appended.
pub fn companion_path(source: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(source.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}
