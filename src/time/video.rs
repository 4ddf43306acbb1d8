//! Container creation time for videos
//!
//! ISO base media files (MP4, MOV, 3GP) are parsed with the `mp4` crate and
//! the time is taken from the `moov/mvhd` box. Everything else, or an ISO file without a usable
//! creation time, is handed to FFprobe when it is installed.

use crate::error::{Error, Result};
use crate::time::DateReader;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use mp4::Mp4Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Metadata keys to try for creation date
const CREATION_DATE_KEYS: &[&str] = &[
    "creation_time",
    "com.apple.quicktime.creationdate",
    "date",
    "date_recorded",
];

/// Extensions stored in an ISO base media container
const ISO_BMFF_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "3gp", "3g2"];

/// Cached FFprobe availability check
static FFPROBE_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Check if ffprobe is available (cached)
fn is_ffprobe_available() -> bool {
    *FFPROBE_AVAILABLE.get_or_init(|| Command::new("ffprobe").arg("-version").output().is_ok())
}

/// Reads the container-level creation time of a video
#[derive(Debug, Clone, Copy)]
pub struct ContainerDateReader {
    use_ffprobe: bool,
}

impl ContainerDateReader {
    pub fn new() -> Self {
        Self { use_ffprobe: true }
    }

    /// Reader that never shells out to FFprobe
    pub fn native_only() -> Self {
        Self { use_ffprobe: false }
    }
}

impl Default for ContainerDateReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DateReader for ContainerDateReader {
    fn read_date(&self, path: &Path) -> Option<String> {
        if is_iso_bmff(path) {
            match read_mvhd_creation_time(path) {
                Ok(Some(created)) => return Some(created.format("%Y-%m-%d %H:%M:%S").to_string()),
                Ok(None) => debug!(?path, "mvhd creation time is unset"),
                Err(e) => debug!(?path, error = %e, "Could not read mvhd"),
            }
        }

        if !self.use_ffprobe {
            return None;
        }

        match ffprobe_creation_time(path) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(?path, error = %e, "FFprobe gave no creation time");
                None
            }
        }
    }
}

fn is_iso_bmff(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ISO_BMFF_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Creation time from `moov/mvhd`, `None` when the field is zero
pub fn read_mvhd_creation_time(path: &Path) -> Result<Option<NaiveDateTime>> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();

    let header = Mp4Reader::read_header(BufReader::new(file), size).map_err(|source| {
        Error::Container {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let seconds = header.moov.mvhd.creation_time;
    if seconds == 0 {
        return Ok(None);
    }

    trace!(?path, seconds, "Found mvhd creation time");
    Ok(mac_epoch_to_datetime(seconds))
}

/// Convert seconds since 1904-01-01 00:00:00 UTC
fn mac_epoch_to_datetime(seconds: u64) -> Option<NaiveDateTime> {
    let epoch = NaiveDate::from_ymd_opt(1904, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let delta = TimeDelta::try_seconds(i64::try_from(seconds).ok()?)?;
    epoch.checked_add_signed(delta)
}

/// Raw creation time string reported by FFprobe
pub fn ffprobe_creation_time(path: &Path) -> Result<String> {
    if !is_ffprobe_available() {
        return Err(Error::FfprobeNotFound);
    }

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| Error::VideoMetadata {
            path: path.to_path_buf(),
            message: format!("Failed to execute ffprobe: {}", e),
        })?;

    if !output.status.success() {
        return Err(Error::VideoMetadata {
            path: path.to_path_buf(),
            message: format!(
                "FFprobe failed: {}",
                String::from_utf8_lossy(&output.stderr)
            ),
        });
    }

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

    creation_time_from_probe(&json).ok_or_else(|| Error::VideoMetadata {
        path: path.to_path_buf(),
        message: "No creation time found in video metadata".to_string(),
    })
}

/// Pick the creation time out of FFprobe JSON: format tags first, then streams
fn creation_time_from_probe(json: &serde_json::Value) -> Option<String> {
    let from_tags = |tags: &serde_json::Value| {
        CREATION_DATE_KEYS.iter().find_map(|key| {
            [key.to_string(), key.to_uppercase()]
                .iter()
                .find_map(|k| tags.get(k.as_str()).and_then(|v| v.as_str()))
                .map(String::from)
        })
    };

    if let Some(value) = json
        .get("format")
        .and_then(|f| f.get("tags"))
        .and_then(from_tags)
    {
        return Some(value);
    }

    json.get("streams")
        .and_then(|s| s.as_array())?
        .iter()
        .filter_map(|stream| stream.get("tags"))
        .find_map(from_tags)
}
