use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems found while assembling runtime settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("grid {width}x{height} is too small (minimum is {min_width}x{min_height})")]
    GridTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("unknown game-over action `{0}` (expected menu or restart)")]
    UnknownGameOverAction(String),
}

/// Top-level failures of the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to initialise logging: {0}")]
    Logger(String),
}
