mod path;
mod scanner;
mod tree;


pub use path::{fold, trailing_fragment, NormalizedPath};
pub use scanner::{
    classify, extract_block, find_region, scan, Block, LineKind, Region, ScannedHeading,
    DOC_END_MARKER, DOC_START_MARKER,
};
pub use tree::{Header, HeaderId, HeaderTree};

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use self::path::key_leaf;

/// The documentation for one heading, as served to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// Leaf identifier, original casing.
    pub name: String,
    pub doc: String,
    /// Dot-path from the top-level ancestor, original casing.
    pub full_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Zero-based line of the heading in the markdown file.
    pub line: usize,
}

/// An immutable snapshot of one parsed markdown file.
///
/// Every variable is reachable under its case-folded full path and its
/// case-folded leaf name. Keys keep the order in which they were first
/// inserted (document order); when two variables share a key the later one
/// wins. Two unrelated `NAME` leaves therefore collide on the `name` key and
/// the bare-name lookup lands on the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    tree: HeaderTree,
    variables: Vec<Variable>,
    keys: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Document {
    pub fn parse(text: &str) -> Document {
        let document = Document::from_tree(HeaderTree::parse(text));

        debug!(
            headers = document.tree.len(),
            variables = document.variables.len(),
            keys = document.keys.len(),
            "parsed documentation"
        );

        document
    }

    pub fn from_tree(tree: HeaderTree) -> Document {
        let mut document = Document::default();
        for root in tree.roots() {
            document.index_header(&tree, *root, None);
        }
        document.tree = tree;
        document
    }

    fn index_header(&mut self, tree: &HeaderTree, id: HeaderId, parent_path: Option<&str>) {
        let Some(header) = tree.get(id) else {
            return;
        };

        let title = NormalizedPath::new(&header.title);
        let full_path = match title.leaf() {
            Some(leaf) => {
                let full_path = match parent_path {
                    Some(parent_path) => format!("{parent_path}.{leaf}"),
                    None => leaf.to_string(),
                };

                let variable_id = self.variables.len();
                self.variables.push(Variable {
                    name: leaf.to_string(),
                    doc: header.body.clone(),
                    full_path: full_path.clone(),
                    default: header.default.clone(),
                    line: header.line,
                });
                self.insert_key(fold(&full_path), variable_id);
                self.insert_key(fold(leaf), variable_id);

                Some(full_path)
            }
            // placeholder-only headings are transparent to their children
            None => parent_path.map(String::from),
        };

        for child in &header.children {
            self.index_header(tree, *child, full_path.as_deref());
        }
    }

    fn insert_key(&mut self, key: String, variable_id: usize) {
        match self.index.get(&key) {
            Some(&position) => self.keys[position].1 = variable_id,
            None => {
                self.index.insert(key.clone(), self.keys.len());
                self.keys.push((key, variable_id));
            }
        }
    }

    fn variable_for_key(&self, position: usize) -> Option<&Variable> {
        self.keys
            .get(position)
            .and_then(|(_, variable_id)| self.variables.get(*variable_id))
    }

    /// Finds the documentation for an identifier seen in a source file.
    ///
    /// `A.B.C`, `A__B__C` and `C` all reach the same variable when `C` is the
    /// leaf under `A.B`. A full-path match is tried first, then a match on the
    /// last segment alone.
    pub fn resolve(&self, query: &str) -> Option<&Variable> {
        let query = NormalizedPath::new(query);
        let leaf = fold(query.leaf()?);

        if let Some(&position) = self.index.get(&query.key()) {
            return self.variable_for_key(position);
        }

        self.keys
            .iter()
            .position(|(key, _)| key_leaf(key) == leaf)
            .and_then(|position| self.variable_for_key(position))
    }

    /// Variables whose leaf starts with the fragment being typed, in the order
    /// their keys first appeared. An empty fragment completes nothing.
    pub fn completion(&self, prefix: &str) -> Vec<&Variable> {
        let fragment = fold(&trailing_fragment(prefix));
        if fragment.is_empty() {
            return vec![];
        }

        self.keys
            .iter()
            .filter(|(key, _)| key_leaf(key).starts_with(&fragment))
            .map(|(_, variable_id)| *variable_id)
            .unique()
            .filter_map(|variable_id| self.variables.get(variable_id))
            .collect()
    }

    /// Every variable in document order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Index keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(|(key, _)| key.as_str())
    }

    pub fn tree(&self) -> &HeaderTree {
        &self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }
}
