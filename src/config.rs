//! Configuration types for the photo binner
//!
//! The configuration file is TOML with two tables:
//! - `[Mappings]`: digit key to bucket label, used by interactive sorting
//! - `[Media]`: optional overrides for the supported extension sets

use crate::media::MediaTypes;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default configuration file name under the `Config` directory
pub const CONFIG_FILE_NAME: &str = "photo-binner.toml";

/// Keys in the order they sit on the keyboard number row
pub const KEY_ORDER: [char; 10] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'];

/// How many of the ten digit keys a loaded mapping has to cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCoverage {
    /// Every digit `0`-`9` must be mapped
    #[default]
    AllDigits,
    /// Any non-empty subset of digits is accepted
    Partial,
}

/// Ordered mapping from a digit key to a bucket label
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyBucketMap {
    entries: BTreeMap<char, String>,
}

impl KeyBucketMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// The date ranges shipped as first-run defaults
    pub fn with_defaults() -> Self {
        let labels = [
            "1940-1969",
            "1970's",
            "1980's",
            "1990-1994",
            "1995",
            "1996",
            "1997",
            "1998",
            "1999",
            "2000",
        ];
        Self {
            entries: KEY_ORDER
                .iter()
                .zip(labels)
                .map(|(k, l)| (*k, l.to_string()))
                .collect(),
        }
    }

    /// Build a mapping from key/label pairs, rejecting non-digit keys and empty labels
    pub fn from_pairs<I, L>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (char, L)>,
        L: Into<String>,
    {
        let mut map = Self::new();
        for (key, label) in pairs {
            map.insert(key, label)?;
        }
        Ok(map)
    }

    /// Map `key` to `label`, replacing any previous label for that key
    pub fn insert(&mut self, key: char, label: impl Into<String>) -> Result<(), ConfigError> {
        if !key.is_ascii_digit() {
            return Err(ConfigError::InvalidKey(key.to_string()));
        }
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ConfigError::EmptyLabel(key));
        }
        self.entries.insert(key, label);
        Ok(())
    }

    /// Label bound to `key`, if any
    pub fn get(&self, key: char) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// Entries in keyboard order (`1`..`9`, then `0`)
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        KEY_ORDER
            .iter()
            .filter_map(|k| self.entries.get(k).map(|l| (*k, l.as_str())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether all ten digit keys are mapped
    pub fn covers_all_digits(&self) -> bool {
        KEY_ORDER.iter().all(|k| self.entries.contains_key(k))
    }

    /// Checks applied when the mapping is edited and saved
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (key, label) in self.iter() {
            if label.trim().is_empty() {
                return Err(ConfigError::EmptyLabel(key));
            }
            if !seen.insert(label) {
                return Err(ConfigError::DuplicateLabel(label.to_string()));
            }
        }
        Ok(())
    }

    fn from_table(
        table: &BTreeMap<String, String>,
        coverage: KeyCoverage,
    ) -> Result<Self, ConfigError> {
        let mut map = Self::new();
        for (key, label) in table {
            let mut chars = key.chars();
            let digit = match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_digit() => c,
                _ => return Err(ConfigError::InvalidKey(key.clone())),
            };
            map.insert(digit, label.clone())?;
        }

        if map.is_empty() {
            return Err(ConfigError::MissingSection("Mappings"));
        }
        if coverage == KeyCoverage::AllDigits && !map.covers_all_digits() {
            return Err(ConfigError::IncompleteKeys(map.len()));
        }

        Ok(map)
    }

    fn to_table(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(k, l)| (k.to_string(), l.clone()))
            .collect()
    }
}

/// Contents of the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Digit key to bucket label
    #[serde(rename = "Mappings", default, skip_serializing_if = "Option::is_none")]
    mappings: Option<BTreeMap<String, String>>,

    /// Supported extension sets
    #[serde(rename = "Media", default)]
    pub media: MediaTypes,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load the file if present, otherwise start from defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load_from_file(path) {
            Err(ConfigError::NotFound(path)) => {
                debug!(?path, "No configuration file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Key mapping held by this configuration
    pub fn key_map(&self, coverage: KeyCoverage) -> Result<KeyBucketMap, ConfigError> {
        let table = self
            .mappings
            .as_ref()
            .ok_or(ConfigError::MissingSection("Mappings"))?;
        KeyBucketMap::from_table(table, coverage)
    }

    /// Replace the key mapping after validating it
    pub fn set_key_map(&mut self, map: &KeyBucketMap) -> Result<(), ConfigError> {
        map.validate()?;
        self.mappings = Some(map.to_table());
        Ok(())
    }

    /// Save configuration to a TOML file, replacing it atomically
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_err = |e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError { source: e })?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, content).map_err(write_err)?;
        fs::rename(&temp_path, path).map_err(write_err)?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        let mut out = String::from(
            "# Photo Binner configuration\n\
             #\n\
             # [Mappings] binds the number keys to bucket folders for `photo-binner sort`.\n\
             # Labels are case-sensitive folder names and must be unique.\n\
             [Mappings]\n",
        );
        for (key, label) in KeyBucketMap::with_defaults().iter() {
            out.push_str(&format!("{} = \"{}\"\n", key, label));
        }
        out.push_str(
            "\n# Supported extensions for sorting and metadata binning\n\
             [Media]\n\
             image_extensions = [\"jpg\", \"jpeg\", \"png\", \"tiff\", \"bmp\", \"dng\"]\n\
             video_extensions = [\"mp4\", \"mov\", \"avi\", \"mkv\", \"wmv\", \"mts\", \"m2ts\", \"3gp\"]\n",
        );
        out
    }
}

/// Load the key mapping, or report why there is no valid one
///
/// Any error here means first-run setup should be offered.
pub fn load_mappings(path: &Path, coverage: KeyCoverage) -> Result<KeyBucketMap, ConfigError> {
    let map = Config::load_from_file(path)?.key_map(coverage)?;
    info!(config = %path.display(), keys = map.len(), "Loaded key mappings");
    Ok(map)
}

/// Persist an edited key mapping, keeping the rest of the file intact
///
/// A file that no longer parses is replaced, since first-run setup is how
/// the user repairs it.
pub fn save_mappings(path: &Path, map: &KeyBucketMap) -> Result<(), ConfigError> {
    let mut config = match Config::load_or_default(path) {
        Err(ConfigError::ParseError { path, source }) => {
            warn!(config = %path.display(), error = %source, "Replacing unparsable configuration");
            Config::default()
        }
        other => other?,
    };
    config.set_key_map(map)?;
    config.save_to_file(path)?;
    info!(config = %path.display(), keys = map.len(), "Saved key mappings");
    Ok(())
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file '{}': {source}", path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write config file '{}': {source}", path.display())]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {source}")]
    SerializeError { source: toml::ser::Error },

    #[error("Config has no [{0}] section")]
    MissingSection(&'static str),

    #[error("Mapping key '{0}' is not a single digit")]
    InvalidKey(String),

    #[error("Mapping for key '{0}' has an empty label")]
    EmptyLabel(char),

    #[error("Label '{0}' is used by more than one key")]
    DuplicateLabel(String),

    #[error("Mappings cover {0} of the 10 digit keys")]
    IncompleteKeys(usize),
}
