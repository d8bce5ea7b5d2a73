//! Generic parsing and diffing primitives for indented plain-text
//! configuration, used by higher-level tools.

pub mod diff;
pub mod format;
pub mod parser;
pub mod tree;

pub use diff::{diff_lines, diff_lines_with_options, DiffOptions, LineDiffEntry};
pub use format::{format_json, format_summary, format_text};
pub use parser::{parse, parse_file, normalize_line, ParseError};
pub use tree::ConfigNode;
