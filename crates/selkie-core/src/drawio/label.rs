//! Cell-label cleaning: Draw.io values are HTML fragments; the graph model
//! wants plain text with explicit newlines, safe to re-embed in Mermaid
//! bracket/label syntax.

use regex::Regex;
use std::sync::OnceLock;

fn break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Block-level boundaries become newlines before tag stripping.
    RE.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</p\s*>|</div\s*>|</li\s*>|</h[1-6]\s*>").expect("valid regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

pub(crate) fn clean_label(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let broken = break_re().replace_all(raw, "\n");
    let stripped = tag_re().replace_all(broken.as_ref(), "");
    let unescaped = htmlize::unescape(stripped.as_ref());

    // Collapse per-line whitespace but keep explicit line breaks.
    let mut lines: Vec<String> = unescaped
        .lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    // Characters that would break the Mermaid grammar downstream.
    lines
        .join("\n")
        .chars()
        .map(|c| match c {
            '"' => '\'',
            '[' => '(',
            ']' => ')',
            _ => c,
        })
        .collect()
}
