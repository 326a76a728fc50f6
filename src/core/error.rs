//! Error types for the ambience engine

use thiserror::Error;

use crate::command::CommandError;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed association key '{0}'")]
    MalformedKey(String),

    #[error("Unable to locate tile '{0}'")]
    UnknownTile(String),

    #[error("Unknown macro '{0}'")]
    UnknownMacro(String),

    #[error("Unknown substrate '{0}'")]
    UnknownSubstrate(String),

    #[error("Invalid condition pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Command(#[from] CommandError),
}
