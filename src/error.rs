//! Error types for scatterview.
//!
//! Setup-time failures (bad data, no drawing surface, invalid point program,
//! bad configuration) are terminal for a session and surface as a single
//! [`ScatterError`]. Per-event problems never use these types; they are logged
//! and treated as a no-op instead.

use thiserror::Error;

/// Problems with the input dataset, detected before any rendering.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset contains no records")]
    Empty,

    #[error("required column `{0}` not found in header")]
    MissingColumn(String),

    #[error("line {line}: column `{column}` is not numeric: {value:?}")]
    NonNumeric {
        line: usize,
        column: String,
        value: String,
    },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Failures while creating or driving the point renderer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("renderer unavailable for a {width}x{height} surface: {reason}")]
    RendererUnavailable {
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("point program failed to compile: {0}")]
    ProgramCompile(String),

    #[error("point program failed to link: {0}")]
    ProgramLink(String),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// The terminal error surfaced by session and viewer setup.
#[derive(Error, Debug)]
pub enum ScatterError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
