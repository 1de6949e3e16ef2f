//! Error types for the tex-converter library.
//!
//! Only failures of external collaborators are errors. Nodes the renderer
//! cannot classify are reported as [`Diagnostic`](crate::diagnostics::Diagnostic)s
//! and never abort a conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Source tree error: {0}")]
    Source(#[from] SourceError),

    #[error("Fragment error: {0}")]
    Fragment(#[from] FragmentError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reading the parser's node tree.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid node tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading the static preamble and macro fragments.
#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("Failed to read {name} from {path}: {source}")]
    Read {
        name: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
