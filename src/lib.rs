//! # tex-converter
//!
//! Render an already-parsed AsciiDoc-style document tree to LaTeX.
//!
//! ## Pipeline
//!
//! 1. The parser's tree is read as JSON into [`SourceNode`]s.
//! 2. The tree is walked bottom up. Each node's children are rendered first,
//!    then the node is tagged as a [`Node`] (document, section, list, block or
//!    inline plus its kind) and rendered by [`TexRenderer`].
//! 3. The document node prepends the static fragments and front matter, and
//!    runs [`process_environments`] over the body: `\[ ... \]` regions whose
//!    first environment is `array`, `matrix`, or absent lose their markers.
//!
//! Nodes the renderer has no rule for render empty and raise a
//! [`Diagnostic`]; a conversion never stops because of one node.
//!
//! ## Quick Start
//!
//! ```rust
//! use tex_converter::{convert_json, Fragments, RenderConfig};
//!
//! let input = r#"{
//!     "name": "document",
//!     "title": "Notes",
//!     "children": [
//!         { "name": "section", "level": 1, "title": "Intro", "children": [
//!             { "name": "paragraph", "children": [
//!                 { "name": "text", "text": "Hello " },
//!                 { "name": "inline_quoted", "type": "strong", "text": "world" }
//!             ]}
//!         ]}
//!     ]
//! }"#;
//!
//! let rendered = convert_json(input, &Fragments::default(), &RenderConfig::default()).unwrap();
//! assert!(rendered.output.contains("\\section{Intro}"));
//! assert!(rendered.output.contains("Hello \\textbf{world}"));
//! assert!(rendered.diagnostics.is_empty());
//! ```
//!
//! ## Node names
//!
//! | Name | Renders as |
//! |---|---|
//! | `section` (level 1-5) | `\section` ... `\subparagraph` |
//! | `ulist` / `olist` | `itemize` / `enumerate` |
//! | `paragraph`, `stem`, `admonition`, `page_break`, `literal`, `pass` | block templates |
//! | `inline_quoted` (`strong`, `emphasis`, `math`, `monospaced`, `unquoted` + role) | `\textbf`, `\emph`, `$..$`, `\texttt`, role macro |
//! | `inline_anchor` (`link`, `ref`, `xref`) | `\href`, `\label`, `\ref` |
//! | `inline_break` | `\\` |
//! | `text` | its text |

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fragments;
pub mod render;
pub mod source;

// Convenience re-exports
pub use ast::{Block, Document, Inline, Node};
pub use config::{Config, FragmentPaths, RenderConfig};
pub use diagnostics::Diagnostic;
pub use error::{ConfigError, Error, FragmentError, Result, SourceError};
pub use fragments::Fragments;
pub use render::{process_environments, render, Rendered, TexRenderer};
pub use source::{convert, SourceNode};

/// Parse a JSON node tree and render it in one step.
pub fn convert_json(input: &str, fragments: &Fragments, config: &RenderConfig) -> Result<Rendered> {
    let root = SourceNode::from_json(input)?;
    Ok(convert(&root, fragments, config))
}
