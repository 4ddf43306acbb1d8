//! Metadata-driven batch binning
//!
//! Handles one pass over a source directory:
//! - collecting supported media directly inside it
//! - extracting each file's capture year
//! - moving the file into `<source>/<year>` or `<source>/Unspecified Date`
//!
//! A file that fails to move is recorded and the pass carries on.

use crate::bucket::resolve_year;
use crate::error::{Error, Result};
use crate::mover;
use crate::time::DateExtractor;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span, warn};
use walkdir::WalkDir;

/// Status of a single file in a batch pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// File was moved into its bucket
    Moved,
    /// Dry run - would have been moved
    DryRun,
    /// Moving failed; the file is where it was
    Failed,
}

/// Outcome for one file
#[derive(Debug, Clone)]
pub struct FileResult {
    pub source: PathBuf,
    pub bucket: String,
    pub destination: Option<PathBuf>,
    pub status: FileStatus,
    pub error: Option<String>,
}

/// Aggregated outcome of a batch pass
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    counts: BTreeMap<String, usize>,
    results: Vec<FileResult>,
    dry_run: bool,
}

impl BatchReport {
    /// Files per bucket, in ascending bucket order
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Count for one bucket (0 if none landed there)
    pub fn count(&self, bucket: &str) -> usize {
        self.counts.get(bucket).copied().unwrap_or(0)
    }

    pub fn bucket_counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Files moved (or planned, in a dry run)
    pub fn total_moved(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileResult> {
        self.results.iter().filter(|r| r.status == FileStatus::Failed)
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn results(&self) -> &[FileResult] {
        &self.results
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn record(&mut self, result: FileResult) {
        if result.status != FileStatus::Failed {
            *self.counts.entry(result.bucket.clone()).or_insert(0) += 1;
        }
        self.results.push(result);
    }

    pub fn summary(&self) -> String {
        format!(
            "Buckets: {}, Moved: {}, Failed: {}",
            self.counts.len(),
            self.total_moved(),
            self.failed_count()
        )
    }
}

/// Runs one metadata binning pass over a directory
pub struct BatchRunner {
    source_dir: PathBuf,
    extractor: DateExtractor,
    dry_run: bool,
}

impl BatchRunner {
    pub fn new(source_dir: impl Into<PathBuf>, extractor: DateExtractor) -> Self {
        Self {
            source_dir: source_dir.into(),
            extractor,
            dry_run: false,
        }
    }

    /// Only report where files would go
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Supported media directly inside the source directory, sorted by name
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if !self.source_dir.is_dir() {
            return Err(Error::MissingSourceDir {
                path: self.source_dir.clone(),
            });
        }

        let media = self.extractor.media_types();
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.source_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() && media.kind_of_path(entry.path()).is_supported() {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Run the pass
    pub fn run(&self) -> Result<BatchReport> {
        let _span = span!(Level::INFO, "batch_run", source = %self.source_dir.display()).entered();

        let files = self.collect_files()?;
        info!(count = files.len(), dry_run = self.dry_run, "Found media files");

        let mut report = BatchReport {
            dry_run: self.dry_run,
            ..Default::default()
        };

        for path in files {
            report.record(self.process_file(&path));
        }

        info!("{}", report.summary());
        Ok(report)
    }

    fn process_file(&self, path: &Path) -> FileResult {
        let year = self.extractor.extract_year(path);
        let bucket = resolve_year(year).label().to_string();
        let bucket_dir = self.source_dir.join(&bucket);
        debug!(?path, ?year, bucket = %bucket, "Classified file");

        if self.dry_run {
            let destination = path
                .file_name()
                .map(|name| mover::unique_destination(&bucket_dir, Path::new(name)))
                .and_then(|r| r.ok());
            return FileResult {
                source: path.to_path_buf(),
                bucket,
                destination,
                status: FileStatus::DryRun,
                error: None,
            };
        }

        match mover::move_into(path, &bucket_dir) {
            Ok(destination) => FileResult {
                source: path.to_path_buf(),
                bucket,
                destination: Some(destination),
                status: FileStatus::Moved,
                error: None,
            },
            Err(e) => {
                warn!(?path, bucket = %bucket, error = %e, "Failed to move file");
                FileResult {
                    source: path.to_path_buf(),
                    bucket,
                    destination: None,
                    status: FileStatus::Failed,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
