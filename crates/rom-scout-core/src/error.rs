use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Invalid scan root '{}': not an accessible directory", .0.display())]
    InvalidRoot(PathBuf),

    #[error("Invalid media file '{}': not an accessible file", .0.display())]
    InvalidMedia(PathBuf),

    #[error("{0}")]
    Other(String),
}
