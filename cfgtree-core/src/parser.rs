use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::tree::ConfigNode;

/// Errors that can occur while reading a configuration file.
///
/// Parsing itself never fails: malformed text degrades to whatever tree
/// structure can be recovered.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the input file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse indented configuration text into a [`ConfigNode`] tree.
///
/// Single-pass, line-oriented scan keyed on indentation: a line indented
/// deeper than the previous one nests under it; a line returning to a
/// shallower column pops back to the nearest open ancestor. Blank lines and
/// comment lines (`!` or `#`) are skipped. Inconsistent indentation never
/// fails, it attaches to the nearest shallower parent.
pub fn parse(text: &str) -> ConfigNode {
    let mut root = ConfigNode::new("", 0);
    // Stack of (indent, child-index path into the tree).
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for raw in text.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('!') || trimmed.starts_with('#') {
            continue;
        }
        let indent = raw.len() - raw.trim_start().len();

        while let Some(&(open_indent, _)) = stack.last() {
            if open_indent >= indent {
                stack.pop();
            } else {
                break;
            }
        }

        let node = ConfigNode::new(trimmed, indent);
        let parent = node_at_path_mut(&mut root, stack.iter().map(|&(_, i)| i));
        parent.children.push(node);
        let idx = parent.children.len() - 1;
        stack.push((indent, idx));
    }

    root
}

/// Parse a configuration file into a [`ConfigNode`] tree.
pub fn parse_file(path: &Path) -> Result<ConfigNode, ParseError> {
    let text = fs::read_to_string(path)?;
    Ok(parse(&text))
}

/// Normalize a statement line for comparison: trim, collapse runs of
/// whitespace to single spaces.
pub fn normalize_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn node_at_path_mut<'a>(
    root: &'a mut ConfigNode,
    path: impl Iterator<Item = usize>,
) -> &'a mut ConfigNode {
    let mut current = root;
    for idx in path {
        current = &mut current.children[idx];
    }
    current
}

#[cfg(test)]
mod tests {
    use super::{normalize_line, parse};

    #[test]
    fn nests_indented_lines_under_previous_statement() {
        let root = parse(
            "interface GigabitEthernet0/0\n ip address 10.0.0.1 255.255.255.0\n no shutdown\nhostname r1\n",
        );
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].children.len(), 2);
        assert_eq!(root.children[1].line, "hostname r1");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let root = parse("! header\n\n# note\nhostname r1\n");
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn irregular_indentation_attaches_to_nearest_parent() {
        let root = parse("router ospf 1\n    network 10.0.0.0 0.0.0.255 area 0\n  passive-interface default\n");
        // Second child is shallower than the first but still inside the block.
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].children.len(), 2);
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(
            normalize_line("  ip   address\t10.0.0.1 "),
            "ip address 10.0.0.1"
        );
    }
}
