//! EXIF capture time for images

use crate::error::{Error, Result};
use crate::time::DateReader;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, trace};

/// Reads `DateTimeOriginal` from the primary image
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifDateReader;

impl DateReader for ExifDateReader {
    fn read_date(&self, path: &Path) -> Option<String> {
        match read_date_time_original(path) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(?path, error = %e, "EXIF date unavailable");
                None
            }
        }
    }
}

/// Raw `DateTimeOriginal` string, e.g. `"2024:01:15 14:30:00"`
pub fn read_date_time_original(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| Error::ExifRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .ok_or_else(|| Error::ExifRead {
            path: path.to_path_buf(),
            message: "No DateTimeOriginal tag".to_string(),
        })?;

    let value = match field.value {
        Value::Ascii(ref parts) => parts
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string()),
        _ => None,
    };

    match value {
        Some(v) if !v.is_empty() => {
            trace!(?path, value = %v, "Found DateTimeOriginal");
            Ok(v)
        }
        _ => Err(Error::ExifRead {
            path: path.to_path_buf(),
            message: "DateTimeOriginal is not a text value".to_string(),
        }),
    }
}
