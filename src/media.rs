//! Media file descriptors and extension-based kind detection

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kind of media file, decided purely from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Still image carrying EXIF capture time
    Image,
    /// Video container carrying a creation time
    Video,
    /// Anything else; never inspected
    Other,
}

impl MediaKind {
    /// Whether files of this kind are read through the EXIF path
    pub fn supports_image_metadata(self) -> bool {
        self == MediaKind::Image
    }

    /// Whether files of this kind are read through the container path
    pub fn supports_video_metadata(self) -> bool {
        self == MediaKind::Video
    }

    /// Whether this kind takes part in sorting at all
    pub fn is_supported(self) -> bool {
        self != MediaKind::Other
    }
}

/// Supported extension sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTypes {
    /// Image extensions (lowercase, without the dot)
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Video extensions (lowercase, without the dot)
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,
}

fn default_image_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "tiff", "bmp", "dng"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_video_extensions() -> Vec<String> {
    ["mp4", "mov", "avi", "mkv", "wmv", "mts", "m2ts", "3gp"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for MediaTypes {
    fn default() -> Self {
        Self {
            image_extensions: default_image_extensions(),
            video_extensions: default_video_extensions(),
        }
    }
}

impl MediaTypes {
    /// Classify an extension (with or without leading dot, any case)
    pub fn kind_of(&self, ext: &str) -> MediaKind {
        let ext = ext.trim_start_matches('.').to_lowercase();
        if self.image_extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
            MediaKind::Image
        } else if self.video_extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
            MediaKind::Video
        } else {
            MediaKind::Other
        }
    }

    /// Classify a path by its extension; paths without one are `Other`
    pub fn kind_of_path(&self, path: &Path) -> MediaKind {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.kind_of(e))
            .unwrap_or(MediaKind::Other)
    }
}

/// A file queued for sorting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    path: PathBuf,
}

impl MediaFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without extension
    pub fn stem(&self) -> Option<&str> {
        self.path.file_stem().and_then(|s| s.to_str())
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// Display name used by the terminal front-end
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl From<PathBuf> for MediaFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}
