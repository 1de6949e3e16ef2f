//! Non-fatal conditions raised while rendering.
//!
//! A diagnostic never changes the produced output. The renderer collects them
//! and, unless running quiet, logs each one as it is raised.

use thiserror::Error;

/// Something the renderer could not handle. The offending node renders empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("Unrecognized {variant} kind `{kind}`{}", excerpt_suffix(.excerpt))]
    UnrecognizedKind {
        variant: &'static str,
        kind: String,
        /// First source line of the node, when available
        excerpt: Option<String>,
    },

    #[error("Unrecognized node `{name}`")]
    UnrecognizedVariant { name: String },

    #[error("Unrecognized role `{role}` on text `{text}`")]
    UnrecognizedRole { role: String, text: String },

    #[error("Unsupported section level {level} for `{title}`")]
    UnsupportedSectionLevel { level: u32, title: String },
}

fn excerpt_suffix(excerpt: &Option<String>) -> String {
    match excerpt {
        Some(line) => format!(" near `{}`", line),
        None => String::new(),
    }
}

/// Collects diagnostics and logs them through `tracing`.
#[derive(Debug, Default)]
pub struct Diagnostics {
    quiet: bool,
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a sink. A quiet sink still collects but does not log.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            items: Vec::new(),
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        if !self.quiet {
            tracing::warn!("{}", diagnostic);
        }
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
