//! Static text placed ahead of the rendered body.

use crate::config::FragmentPaths;
use crate::error::{FragmentError, Result};
use std::path::Path;

/// Built-in preamble used when none is configured.
pub const DEFAULT_PREAMBLE: &str = r"\documentclass[11pt]{article}
\usepackage[utf8]{inputenc}
\usepackage{amsmath}
\usepackage{amssymb}
\usepackage{xcolor}
\usepackage{hyperref}
";

/// Built-in macros for the constructs the renderer emits.
pub const DEFAULT_MACROS: &str = r"
\newcommand{\admonition}[2]{\par\noindent\fbox{\parbox{\dimexpr\linewidth-2\fboxsep-2\fboxrule}{\textbf{#1}\quad #2}}\par}
";

/// The three opaque text fragments concatenated before the front matter.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragments {
    pub preamble: String,
    pub framework_macros: String,
    pub user_macros: String,
}

impl Default for Fragments {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            framework_macros: DEFAULT_MACROS.to_string(),
            user_macros: String::new(),
        }
    }
}

impl Fragments {
    /// Read the configured fragment files, falling back to the built-ins.
    pub fn load(paths: &FragmentPaths) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            preamble: read_or("preamble", paths.preamble.as_deref(), defaults.preamble)?,
            framework_macros: read_or(
                "framework macros",
                paths.macros.as_deref(),
                defaults.framework_macros,
            )?,
            user_macros: read_or("user macros", paths.user_macros.as_deref(), defaults.user_macros)?,
        })
    }

    /// All three fragments in output order.
    pub fn concat(&self) -> String {
        let mut out = String::with_capacity(
            self.preamble.len() + self.framework_macros.len() + self.user_macros.len(),
        );
        out.push_str(&self.preamble);
        out.push_str(&self.framework_macros);
        out.push_str(&self.user_macros);
        out
    }
}

fn read_or(name: &'static str, path: Option<&Path>, fallback: String) -> Result<String> {
    match path {
        Some(path) => {
            tracing::debug!(fragment = name, path = %path.display(), "Loading fragment");
            Ok(std::fs::read_to_string(path).map_err(|e| FragmentError::Read {
                name,
                path: path.to_path_buf(),
                source: e,
            })?)
        }
        None => Ok(fallback),
    }
}
