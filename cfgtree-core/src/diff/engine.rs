use crate::diff::result::LineDiffEntry;
use crate::parser::normalize_line;

/// Configures line diff behavior.
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Include [`LineDiffEntry::Unchanged`] rows.
    pub include_unchanged: bool,
    /// Skip lines starting with any of these prefixes (after normalization).
    pub ignore_prefixes: Vec<String>,
}

/// Diff two line sequences with default options.
pub fn diff_lines(left: &str, right: &str) -> Vec<LineDiffEntry> {
    diff_lines_with_options(left, right, &DiffOptions::default())
}

/// Diff two line sequences with custom options.
///
/// Longest-common-subsequence diff over normalized lines. Ties in the LCS
/// table always resolve toward keeping the earlier (left-side) match, so the
/// entry order is fully deterministic: same inputs, same output.
pub fn diff_lines_with_options(
    left: &str,
    right: &str,
    opts: &DiffOptions,
) -> Vec<LineDiffEntry> {
    let left_lines = significant_lines(left, opts);
    let right_lines = significant_lines(right, opts);

    let n = left_lines.len();
    let m = right_lines.len();
    // lcs[i][j] = LCS length of left[i..] and right[j..].
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if left_lines[i] == right_lines[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if left_lines[i] == right_lines[j] {
            if opts.include_unchanged {
                out.push(LineDiffEntry::Unchanged {
                    line: left_lines[i].clone(),
                });
            }
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            // Prefer consuming the left side on ties: removals before
            // additions at the same position.
            out.push(LineDiffEntry::Removed {
                line: left_lines[i].clone(),
            });
            i += 1;
        } else {
            out.push(LineDiffEntry::Added {
                line: right_lines[j].clone(),
            });
            j += 1;
        }
    }
    while i < n {
        out.push(LineDiffEntry::Removed {
            line: left_lines[i].clone(),
        });
        i += 1;
    }
    while j < m {
        out.push(LineDiffEntry::Added {
            line: right_lines[j].clone(),
        });
        j += 1;
    }

    out
}

fn significant_lines(text: &str, opts: &DiffOptions) -> Vec<String> {
    text.lines()
        .map(normalize_line)
        .filter(|line| !line.is_empty() && !line.starts_with('!') && !line.starts_with('#'))
        .filter(|line| !opts.ignore_prefixes.iter().any(|p| line.starts_with(p)))
        .collect()
}
