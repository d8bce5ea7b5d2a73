use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// A node in an indented configuration tree.
///
/// The root returned by [`crate::parse`] is synthetic: its `line` is empty
/// and its children are the column-zero statements of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigNode {
    /// The statement text, trimmed of surrounding whitespace.
    pub line: String,
    /// Indentation depth in the source (0 for top-level statements).
    pub depth: usize,
    /// Statements nested under this one.
    pub children: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Create a leaf node.
    pub fn new(line: impl Into<String>, depth: usize) -> Self {
        Self {
            line: line.into(),
            depth,
            children: Vec::new(),
        }
    }

    /// Return the first child whose line starts with the provided prefix.
    pub fn get_child(&self, prefix: &str) -> Option<&ConfigNode> {
        self.children
            .iter()
            .find(|child| child.line.starts_with(prefix))
    }

    /// Return all children whose line starts with the provided prefix.
    pub fn get_children(&self, prefix: &str) -> Vec<&ConfigNode> {
        self.children
            .iter()
            .filter(|child| child.line.starts_with(prefix))
            .collect()
    }

    /// True if any line in this subtree contains the needle.
    pub fn contains_line(&self, needle: &str) -> bool {
        self.line.contains(needle) || self.children.iter().any(|c| c.contains_line(needle))
    }

    /// Flatten the subtree into trimmed statement lines, depth-first.
    pub fn flat_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_lines(&mut out);
        out
    }

    fn collect_lines(&self, out: &mut Vec<String>) {
        if !self.line.is_empty() {
            out.push(self.line.clone());
        }
        for child in &self.children {
            child.collect_lines(out);
        }
    }
}

impl Display for ConfigNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.line.is_empty() {
            writeln!(f, "{}{}", " ".repeat(self.depth), self.line)?;
        }
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        Ok(())
    }
}
