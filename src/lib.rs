//! Photo Binner - sort a photo collection into date buckets
//!
//! Two workflows share the same relocation and classification core:
//! - Interactive sorting: step through the images in a folder and file
//!   each one into the bucket bound to a number key, with one-step undo
//! - Metadata binning: read the capture date from EXIF (images) or the
//!   container header (videos) and file every item under its year
//!
//! Moves never overwrite: a name collision gets a `-N` suffix.

// Initialize i18n with locale files
rust_i18n::i18n!("locales", fallback = "en");

pub mod batch;
pub mod bucket;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod i18n;
pub mod media;
pub mod mover;
pub mod session;
pub mod time;
pub mod tui;

pub use batch::{BatchReport, BatchRunner, FileResult, FileStatus};
pub use bucket::{Classification, UNSPECIFIED_BUCKET};
pub use cli::Cli;
pub use config::{Config, ConfigError, KeyBucketMap, KeyCoverage};
pub use display::display_summary;
pub use error::{Error, Result};
pub use i18n::init_locale;
pub use media::{MediaFile, MediaKind, MediaTypes};
pub use session::{BackOutcome, ClassifyOutcome, SortSession};
pub use time::DateExtractor;
pub use tui::SortApp;
