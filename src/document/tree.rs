//! Nesting of scanned headings into a forest.
//!
//! Nodes live in an arena; `parent` is a plain index so upward traversal does
//! not need shared ownership.

use super::scanner::{self, ScannedHeading};

pub type HeaderId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Heading depth minus one; `##` is level 1.
    pub level: usize,
    pub title: String,
    pub body: String,
    pub default: Option<String>,
    pub line: usize,
    pub parent: Option<HeaderId>,
    pub children: Vec<HeaderId>,
}

impl From<ScannedHeading> for Header {
    fn from(value: ScannedHeading) -> Self {
        Header {
            level: value.level,
            title: value.title,
            body: value.body,
            default: value.default,
            line: value.line,
            parent: None,
            children: vec![],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTree {
    headers: Vec<Header>,
    roots: Vec<HeaderId>,
}

impl HeaderTree {
    pub fn parse(text: &str) -> HeaderTree {
        HeaderTree::build(scanner::scan(text))
    }

    /// A heading becomes a child of the nearest preceding heading with a
    /// strictly lower level, however many levels it skips.
    pub fn build(scanned: impl IntoIterator<Item = ScannedHeading>) -> HeaderTree {
        let mut tree = HeaderTree::default();
        let mut stack: Vec<HeaderId> = vec![];

        for heading in scanned {
            let mut header = Header::from(heading);
            let id = tree.headers.len();

            while stack
                .last()
                .is_some_and(|top| tree.headers[*top].level >= header.level)
            {
                stack.pop();
            }

            match stack.last() {
                Some(&parent) => {
                    header.parent = Some(parent);
                    tree.headers[parent].children.push(id);
                }
                None => tree.roots.push(id),
            }

            tree.headers.push(header);
            stack.push(id);
        }

        tree
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn get(&self, id: HeaderId) -> Option<&Header> {
        self.headers.get(id)
    }

    pub fn roots(&self) -> &[HeaderId] {
        &self.roots
    }

    /// All headers in document order.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn parent(&self, id: HeaderId) -> Option<&Header> {
        self.get(id)?.parent.and_then(|parent| self.get(parent))
    }

    pub fn children(&self, id: HeaderId) -> impl Iterator<Item = &Header> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|header| header.children.iter())
            .filter_map(|child| self.get(*child))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: usize, title: &str) -> ScannedHeading {
        ScannedHeading {
            level,
            title: title.to_string(),
            body: String::new(),
            default: None,
            line: 0,
        }
    }

    fn titles<'a>(tree: &'a HeaderTree, ids: &[HeaderId]) -> Vec<&'a str> {
        ids.iter()
            .filter_map(|id| tree.get(*id))
            .map(|header| header.title.as_str())
            .collect()
    }

    #[test]
    fn nests_by_level() {
        let tree = HeaderTree::build([
            heading(1, "A"),
            heading(2, "B"),
            heading(3, "C"),
            heading(2, "D"),
            heading(1, "E"),
        ]);

        assert_eq!(tree.len(), 5);
        assert_eq!(titles(&tree, tree.roots()), ["A", "E"]);
        assert_eq!(titles(&tree, &tree.headers()[0].children), ["B", "D"]);
        assert_eq!(titles(&tree, &tree.headers()[1].children), ["C"]);
        assert_eq!(tree.parent(2).map(|h| h.title.as_str()), Some("B"));
        assert!(tree.parent(4).is_none());
    }

    #[test]
    fn skipped_levels_attach_to_nearest_lower() {
        let tree = HeaderTree::build([heading(1, "A"), heading(5, "DEEP"), heading(3, "MID")]);

        assert_eq!(titles(&tree, tree.roots()), ["A"]);
        assert_eq!(titles(&tree, &tree.headers()[0].children), ["DEEP", "MID"]);
    }

    #[test]
    fn roots_need_not_be_level_one() {
        let tree = HeaderTree::build([heading(3, "X"), heading(2, "Y"), heading(4, "Z")]);

        assert_eq!(titles(&tree, tree.roots()), ["X", "Y"]);
        assert_eq!(tree.parent(2).map(|h| h.title.as_str()), Some("Y"));
    }

    #[test]
    fn parent_levels_are_strictly_lower() {
        let levels = [1, 3, 2, 2, 5, 4, 1, 2, 4, 3, 5];
        let tree = HeaderTree::build(
            levels
                .iter()
                .enumerate()
                .map(|(idx, level)| heading(*level, &format!("H{idx}"))),
        );

        assert_eq!(tree.len(), levels.len());
        for (id, header) in tree.headers().iter().enumerate() {
            if let Some(parent) = tree.parent(id) {
                assert!(parent.level < header.level);
            }
            for child in tree.children(id) {
                assert_eq!(child.parent, Some(id));
            }
        }
    }

    #[test]
    fn parses_markdown() {
        let tree = HeaderTree::parse("## DATABASES\n> Dict.\n### {key}\n#### NAME\n> The DB name.");

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.headers()[2].body, "The DB name.");
        assert_eq!(tree.parent(2).map(|h| h.title.as_str()), Some("{key}"));
    }
}
