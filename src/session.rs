//! Interactive sorting session
//!
//! Holds the queue of files still to sort, the cursor into it, and a single
//! undo slot. Key presses from the front-end are relayed here; the session
//! owns every file move made on the user's behalf.

use crate::bucket::resolve_key;
use crate::config::KeyBucketMap;
use crate::error::{Error, Result};
use crate::media::{MediaFile, MediaKind, MediaTypes};
use crate::mover;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// The one reversible action a session remembers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LastAction {
    /// Nothing to undo
    #[default]
    None,
    /// The most recent move; `index` is the queue slot the file was taken from
    Moved {
        original: PathBuf,
        moved: PathBuf,
        index: usize,
    },
}

/// Observable state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// A file is selected at `index` and `remaining` files are queued
    Ready { index: usize, remaining: usize },
    /// Nothing left to sort
    Exhausted,
}

/// Result of a classify keypress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyOutcome {
    /// Key unmapped or queue empty; nothing happened
    Ignored,
    /// The current file was moved into `bucket`
    Moved { bucket: String, destination: PathBuf },
}

/// Result of the undo/back control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackOutcome {
    /// The last move was reverted and the file is back in the queue
    Undone { restored: PathBuf },
    /// No pending undo; stepped back one file
    Previous,
    /// No pending undo and already at the first file
    AtStart,
}

/// Interactive sorting state machine
#[derive(Debug)]
pub struct SortSession {
    root: PathBuf,
    queue: Vec<MediaFile>,
    index: usize,
    last_action: LastAction,
}

impl SortSession {
    /// Session over an explicit queue of files in `root`
    pub fn new(root: impl Into<PathBuf>, files: impl IntoIterator<Item = MediaFile>) -> Self {
        Self {
            root: root.into(),
            queue: files.into_iter().collect(),
            index: 0,
            last_action: LastAction::None,
        }
    }

    /// Session over the images directly inside `root`, sorted by name
    pub fn scan(root: &Path, media: &MediaTypes) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::MissingSourceDir {
                path: root.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file()
                && media.kind_of_path(entry.path()) == MediaKind::Image
            {
                files.push(MediaFile::new(entry.path()));
            }
        }

        info!(root = %root.display(), count = files.len(), "Queued images for sorting");
        Ok(Self::new(root, files))
    }

    /// Pre-create one folder per mapped label
    pub fn create_bucket_dirs(&self, map: &KeyBucketMap) -> Result<()> {
        for (_, label) in map.iter() {
            mover::ensure_dir(&self.root.join(label))?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[MediaFile] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn last_action(&self) -> &LastAction {
        &self.last_action
    }

    /// Whether the undo/back control would revert a move
    pub fn can_undo(&self) -> bool {
        matches!(self.last_action, LastAction::Moved { .. })
    }

    pub fn state(&self) -> SessionState {
        if self.index < self.queue.len() {
            SessionState::Ready {
                index: self.index,
                remaining: self.queue.len(),
            }
        } else {
            SessionState::Exhausted
        }
    }

    /// File under the cursor
    pub fn current(&self) -> Option<&MediaFile> {
        self.queue.get(self.index)
    }

    /// Move the current file into the bucket bound to `key`
    ///
    /// On a relocation error nothing changes: the file stays queued at the
    /// same position and the previous undo record is kept.
    pub fn classify(&mut self, key: char, map: &KeyBucketMap) -> Result<ClassifyOutcome> {
        let Some(current) = self.queue.get(self.index) else {
            return Ok(ClassifyOutcome::Ignored);
        };
        let Some(label) = resolve_key(key, map) else {
            debug!(%key, "Key has no bucket");
            return Ok(ClassifyOutcome::Ignored);
        };

        let original = current.path().to_path_buf();
        let destination = mover::move_into(&original, &self.root.join(label)).inspect_err(|e| {
            warn!(source = %original.display(), bucket = label, error = %e, "Classify failed");
        })?;

        info!(
            source = %original.display(),
            destination = %destination.display(),
            bucket = label,
            "Classified file"
        );

        let removed_at = self.index;
        self.queue.remove(removed_at);
        self.index = removed_at.min(self.queue.len().saturating_sub(1));
        self.last_action = LastAction::Moved {
            original,
            moved: destination.clone(),
            index: removed_at,
        };

        Ok(ClassifyOutcome::Moved {
            bucket: label.to_string(),
            destination,
        })
    }

    /// Revert the last move, or step back when there is nothing to revert
    ///
    /// The undo slot is cleared by a successful revert, so pressing the
    /// control twice in a row undoes once and then goes to the previous file.
    pub fn undo(&mut self) -> Result<BackOutcome> {
        let (original, moved, removed_at) = match &self.last_action {
            LastAction::Moved {
                original,
                moved,
                index,
            } => (original.clone(), moved.clone(), *index),
            LastAction::None => {
                return Ok(if self.previous() {
                    BackOutcome::Previous
                } else {
                    BackOutcome::AtStart
                });
            }
        };

        mover::move_to(&moved, &original).inspect_err(|e| {
            warn!(moved = %moved.display(), original = %original.display(), error = %e, "Undo failed");
        })?;
        info!(restored = %original.display(), "Undid last move");

        let restored = original;
        let at = removed_at.min(self.queue.len());
        self.queue.insert(at, MediaFile::new(restored.clone()));
        self.index = at;
        self.last_action = LastAction::None;

        Ok(BackOutcome::Undone { restored })
    }

    /// Step back one file; returns whether the cursor moved
    pub fn previous(&mut self) -> bool {
        if self.index > 0 && !self.queue.is_empty() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one file; returns whether the cursor moved
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.queue.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }
}
