//! Pluggable source minification
//!
//! The pipeline invokes a [`Minifier`] on each staged source file before
//! archiving when minification is enabled. Any semantics-preserving compactor
//! satisfies the contract; the key constraint is that top-level identifiers
//! must survive untouched, because the archived files share one flat namespace
//! and import each other by name.

use std::fs;
use std::path::Path;

use crate::error::{DuffelError, Result};

/// Capability for compacting source text
pub trait Minifier {
    fn minify(&self, source: &str) -> String;
}

/// Rewrite a staged file in place through a minifier
pub fn minify_file(minifier: &dyn Minifier, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| DuffelError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let minified = minifier.minify(&content);

    fs::write(path, minified).map_err(|e| DuffelError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}

/// Conservative line-level compactor
///
/// Drops blank lines, full-line comments, single-line literal-only statements
/// (docstrings), and trailing whitespace. Lines inside triple-quoted strings
/// pass through verbatim, so multi-line literals are never altered. No
/// identifier is renamed and no statement is reordered.
pub struct SourceCompactor;

impl Minifier for SourceCompactor {
    fn minify(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        let mut in_triple: Option<&str> = None;

        for line in source.lines() {
            if let Some(delim) = in_triple {
                out.push_str(line);
                out.push('\n');
                if count_delimiters(line, delim) % 2 == 1 {
                    in_triple = None;
                }
                continue;
            }

            let trimmed = line.trim_end();
            let stripped = trimmed.trim_start();

            if stripped.is_empty() || stripped.starts_with('#') {
                continue;
            }

            if let Some(delim) = opens_multiline_string(stripped) {
                // The literal continues past this line; keep it verbatim until
                // it closes so string contents are untouched.
                out.push_str(line);
                out.push('\n');
                in_triple = Some(delim);
                continue;
            }

            if is_literal_only_line(stripped) {
                continue;
            }

            out.push_str(trimmed);
            out.push('\n');
        }

        out
    }
}

fn count_delimiters(line: &str, delim: &str) -> usize {
    line.matches(delim).count()
}

/// Delimiter of a triple-quoted string that starts on this line and does not
/// close on it, if any
fn opens_multiline_string(stripped: &str) -> Option<&'static str> {
    for delim in ["\"\"\"", "'''"] {
        let count = count_delimiters(stripped, delim);
        if count % 2 == 1 {
            return Some(if delim == "\"\"\"" { "\"\"\"" } else { "'''" });
        }
    }
    None
}

/// Whether a line is exactly one string literal statement
fn is_literal_only_line(stripped: &str) -> bool {
    for delim in ["\"\"\"", "'''"] {
        if stripped.len() >= delim.len() * 2
            && stripped.starts_with(delim)
            && stripped.ends_with(delim)
        {
            return true;
        }
    }
    for quote in ['"', '\''] {
        if stripped.len() >= 2
            && stripped.starts_with(quote)
            && stripped.ends_with(quote)
            && !stripped[1..stripped.len() - 1].contains(quote)
        {
            return true;
        }
    }
    false
}
