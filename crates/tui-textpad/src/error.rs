use std::io;
use std::path::PathBuf;

use textpad_core::KeyParseError;
use thiserror::Error;

/// Everything that can stop the text pad from starting or running.
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal or seed-file I/O.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The config file exists but could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },
    /// The config file is not valid TOML or has unknown fields.
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// A `[keys]` entry could not be parsed.
    #[error("invalid key binding `{binding}`: {source}")]
    Key {
        binding: String,
        source: KeyParseError,
    },
    /// A logger was already installed.
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
