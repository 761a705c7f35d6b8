//! Mermaid text -> [`DiagramGraph`].
//!
//! Line-oriented and best-effort: the first content line selects the
//! sub-language, malformed lines are skipped with a debug log, and only a
//! fully empty input is an error. Unrecognized header prefixes fall back to
//! flowchart parsing of the whole input rather than failing.

mod class;
mod flowchart;
mod sequence;

use crate::error::{Error, Result};
use crate::model::{DiagramGraph, DiagramKind};

pub fn parse_mermaid(text: &str) -> Result<(DiagramGraph, DiagramKind)> {
    let lines = content_lines(text);
    if lines.is_empty() {
        return Err(Error::EmptyInput);
    }

    let head = lines[0].to_ascii_lowercase();
    if head.starts_with("sequencediagram") {
        return Ok((sequence::parse(&lines[1..]), DiagramKind::Sequence));
    }
    if head.starts_with("classdiagram") {
        return Ok((class::parse(&lines[1..]), DiagramKind::Class));
    }
    if head.starts_with("flowchart") || head.starts_with("graph") {
        return Ok((flowchart::parse(&lines[1..]), DiagramKind::Flowchart));
    }

    // Permissive fallback: treat the whole input (header line included) as
    // flowchart content.
    Ok((flowchart::parse(&lines), DiagramKind::Flowchart))
}

/// Non-empty, non-comment (`%%`) lines, trimmed.
fn content_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("%%"))
        .collect()
}

/// Identifier charset shared by the sub-parsers. Mermaid ids are free-form
/// in principle; we accept the word-like subset and let anything else fall
/// through as a skipped line.
fn is_valid_id(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Strips one level of matching single/double quotes.
fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Turns `<br/>` variants inside a label into real newlines so labels
/// round-trip against the serializers, which emit `<br/>` for multi-line
/// text.
fn label_breaks_to_newlines(s: &str) -> String {
    static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    let re = RE.get_or_init(|| regex::Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));
    re.replace_all(s, "\n").into_owned()
}
