#![forbid(unsafe_code)]

//! `selkie` converts diagrams between two textual representations: Mermaid's
//! line-oriented description language and the Draw.io (`mxGraphModel`) XML
//! format.
//!
//! Both directions round-trip a *usable* diagram — nodes, shapes, labels,
//! edges, arrow styles, and class member lists — not byte-identical output.
//! See [`Engine`] for the two conversion entry points and
//! [`Engine::list_pages`] for multi-page document handling.
//!
//! # Example
//!
//! ```
//! use selkie::{ConvertOptions, Engine};
//!
//! let engine = Engine::new();
//! let xml = engine.mermaid_to_drawio_sync("flowchart TD\nA[Start] --> B{Check}")?;
//! let text = engine.drawio_to_mermaid_sync(&xml, &ConvertOptions::default())?;
//! assert!(text.contains("A --> B"));
//! # Ok::<(), selkie::Error>(())
//! ```

pub use selkie_core::*;
