//! Capture date extraction
//!
//! Dispatches on file extension:
//! - images are read through EXIF (`DateTimeOriginal`)
//! - videos are read through their container's creation time
//! - anything else is never opened
//!
//! Every failure along the way is absorbed and reported as "no year".

pub mod exif;
pub mod video;

use crate::media::{MediaKind, MediaTypes};
use chrono::{Datelike, NaiveDate};
use std::path::Path;
use tracing::{debug, trace};

/// Date layouts accepted from metadata, tried in order
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y:%m:%d"];

/// A source of raw capture-date strings for one family of files
pub trait DateReader {
    /// Raw date (or date-time) string found in the file's metadata
    fn read_date(&self, path: &Path) -> Option<String>;
}

/// Extracts capture years from media files
pub struct DateExtractor {
    media: MediaTypes,
    image_reader: Box<dyn DateReader>,
    video_reader: Box<dyn DateReader>,
}

impl DateExtractor {
    /// Extractor using EXIF for images and container metadata for videos
    pub fn new(media: MediaTypes) -> Self {
        Self::with_readers(media, exif::ExifDateReader, video::ContainerDateReader::new())
    }

    /// Extractor with custom readers
    pub fn with_readers(
        media: MediaTypes,
        image_reader: impl DateReader + 'static,
        video_reader: impl DateReader + 'static,
    ) -> Self {
        Self {
            media,
            image_reader: Box::new(image_reader),
            video_reader: Box::new(video_reader),
        }
    }

    pub fn media_types(&self) -> &MediaTypes {
        &self.media
    }

    /// Reader responsible for files of `kind`, if any
    fn reader_for(&self, kind: MediaKind) -> Option<&dyn DateReader> {
        if kind.supports_image_metadata() {
            Some(self.image_reader.as_ref())
        } else if kind.supports_video_metadata() {
            Some(self.video_reader.as_ref())
        } else {
            None
        }
    }

    /// Capture year of `path`, or `None` if it cannot be determined
    pub fn extract_year(&self, path: &Path) -> Option<i32> {
        let kind = self.media.kind_of_path(path);
        let Some(reader) = self.reader_for(kind) else {
            trace!(?path, "Unsupported extension, skipping metadata");
            return None;
        };
        let raw = reader.read_date(path);

        let Some(raw) = raw else {
            debug!(?path, ?kind, "No capture date in metadata");
            return None;
        };

        let year = parse_year(&raw);
        if year.is_none() {
            debug!(?path, raw = %raw, "Unparseable capture date");
        }
        year
    }
}

/// Date part of a metadata value: everything before the first space or `T`
pub fn date_token(raw: &str) -> &str {
    let raw = raw.trim().trim_matches('"');
    raw.split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or(raw)
}

/// Parse the year out of a metadata date string
///
/// `YYYY-MM-DD` is tried first, then `YYYY:MM:DD`. The date must be a real
/// calendar day.
pub fn parse_year(raw: &str) -> Option<i32> {
    let token = date_token(raw);
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(token, layout).ok())
        .map(|date| date.year())
}
