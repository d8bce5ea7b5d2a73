pub mod engine;
pub mod result;

pub use engine::{diff_lines, diff_lines_with_options, DiffOptions};
pub use result::LineDiffEntry;
