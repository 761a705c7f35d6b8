//! Serializers re-emitting the graph model as Mermaid text or Draw.io XML.
//!
//! Neither direction can fail on a well-formed graph: edges with dangling
//! endpoints are dropped instead of raised, because partial output beats a
//! failed conversion.

pub mod drawio;
pub mod mermaid;

/// Conservative Mermaid identifier derived from an arbitrary source id.
/// Deterministic, so the same source id always maps to the same token.
pub(crate) fn mermaid_id(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.') {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}
