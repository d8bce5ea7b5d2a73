use crate::diff::result::LineDiffEntry;

/// Format diff entries as plain text.
pub fn format_text(entries: &[LineDiffEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            LineDiffEntry::Unchanged { line } => lines.push(format!("= {line}")),
            LineDiffEntry::Added { line } => lines.push(format!("+ {line}")),
            LineDiffEntry::Removed { line } => lines.push(format!("- {line}")),
        }
    }
    lines.join("\n")
}

/// Format a simple summary of diff counts.
pub fn format_summary(entries: &[LineDiffEntry]) -> String {
    let mut unchanged = 0;
    let mut added = 0;
    let mut removed = 0;

    for entry in entries {
        match entry {
            LineDiffEntry::Unchanged { .. } => unchanged += 1,
            LineDiffEntry::Added { .. } => added += 1,
            LineDiffEntry::Removed { .. } => removed += 1,
        }
    }

    format!("unchanged={unchanged} added={added} removed={removed}")
}
