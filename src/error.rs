//! Error types raised while bringing the game up.

use thiserror::Error;

/// Errors surfaced by asset loaders. Any of these is fatal to startup.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {path}")]
    NotFound { path: String },

    #[error("unsupported {kind} format: {path}")]
    UnsupportedFormat { kind: &'static str, path: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AssetError>;
