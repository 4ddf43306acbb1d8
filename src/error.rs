//! Error types for the photo binner

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for photo binner operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the photo binner
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to move {from} to {to}: {source}")]
    Relocation {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Destination already exists: {path}")]
    DestinationOccupied { path: PathBuf },

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },

    #[error("Failed to parse ISO media container {path}: {source}")]
    Container {
        path: PathBuf,
        #[source]
        source: mp4::Error,
    },

    #[error("Failed to extract video metadata from {path}: {message}")]
    VideoMetadata { path: PathBuf, message: String },

    #[error("FFprobe not found. Please install FFmpeg and ensure ffprobe is in PATH")]
    FfprobeNotFound,

    #[error("Invalid file name: {path}")]
    InvalidFileName { path: PathBuf },

    #[error("Source directory does not exist: {path}")]
    MissingSourceDir { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl Error {
    /// Wrap an I/O failure that happened while relocating `from` to `to`
    pub fn relocation(from: impl Into<PathBuf>, to: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Relocation {
            from: from.into(),
            to: to.into(),
            source,
        }
    }
}
