use serde::Serialize;

/// A single diff outcome for one configuration line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum LineDiffEntry {
    /// Line present on both sides.
    Unchanged { line: String },
    /// Line only on the right input.
    Added { line: String },
    /// Line only on the left input.
    Removed { line: String },
}

impl LineDiffEntry {
    /// The line text regardless of variant.
    pub fn line(&self) -> &str {
        match self {
            Self::Unchanged { line } | Self::Added { line } | Self::Removed { line } => line,
        }
    }
}
