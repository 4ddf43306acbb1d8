//! Collision-safe relocation of files into bucket folders
//!
//! A move never overwrites: a clashing name gets `-1`, `-2`, ... appended
//! before its extension. Within one filesystem the move is a single rename;
//! across filesystems it is copy, restore timestamps, then delete, and any
//! failure leaves the source untouched.

use crate::error::{Error, Result};
use filetime::FileTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Create `dir` and its parents; succeeds if it already exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// First free path for `file_name` inside `dir`
///
/// Probes `name.ext`, then `name-1.ext`, `name-2.ext`, ... without bound.
pub fn unique_destination(dir: &Path, file_name: &Path) -> Result<PathBuf> {
    let candidate = dir.join(file_name);
    if !exists(&candidate) {
        return Ok(candidate);
    }

    let stem = file_name
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidFileName {
            path: file_name.to_path_buf(),
        })?;
    let extension = file_name
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let mut counter: u64 = 1;
    loop {
        let candidate = dir.join(format!("{}-{}{}", stem, counter, extension));
        if !exists(&candidate) {
            trace!(?candidate, counter, "Resolved name collision");
            return Ok(candidate);
        }
        counter += 1;
    }
}

/// Move `source` into `destination_dir`, returning the final path
pub fn move_into(source: &Path, destination_dir: &Path) -> Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| Error::InvalidFileName {
        path: source.to_path_buf(),
    })?;

    fs::create_dir_all(destination_dir)
        .map_err(|e| Error::relocation(source, destination_dir, e))?;

    let destination = unique_destination(destination_dir, Path::new(file_name))?;
    relocate(source, &destination)?;
    debug!(?source, ?destination, "Moved file");
    Ok(destination)
}

/// Move `source` to exactly `destination`, refusing to overwrite
///
/// The destination's parent is recreated if it has disappeared.
pub fn move_to(source: &Path, destination: &Path) -> Result<()> {
    if exists(destination) {
        return Err(Error::DestinationOccupied {
            path: destination.to_path_buf(),
        });
    }

    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::relocation(source, destination, e))?;
    }

    relocate(source, destination)?;
    debug!(?source, ?destination, "Moved file back");
    Ok(())
}

/// `exists()` that also sees dangling symlinks
fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn relocate(source: &Path, destination: &Path) -> Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!(?source, ?destination, "Rename crosses devices, copying instead");
            copy_then_remove(source, destination)
                .map_err(|e| Error::relocation(source, destination, e))
        }
        Err(e) => Err(Error::relocation(source, destination, e)),
    }
}

/// Copy with timestamps, then delete the source; all or nothing
pub(crate) fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;

    let result = fs::copy(source, destination)
        .and_then(|_| {
            let atime = FileTime::from_last_access_time(&metadata);
            let mtime = FileTime::from_last_modification_time(&metadata);
            filetime::set_file_times(destination, atime, mtime)
        })
        .and_then(|_| fs::remove_file(source));

    if let Err(e) = result {
        if exists(destination) && exists(source) {
            if let Err(cleanup) = fs::remove_file(destination) {
                warn!(?destination, error = %cleanup, "Failed to remove partial copy");
            }
        }
        return Err(e);
    }

    Ok(())
}
