//! Bucket resolution for both sorting modes

use crate::config::KeyBucketMap;
use std::fmt;

/// Folder used when no capture year could be determined
pub const UNSPECIFIED_BUCKET: &str = "Unspecified Date";

/// Outcome of classifying one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A named bucket folder
    Bucket(String),
    /// No date known; lands in [`UNSPECIFIED_BUCKET`]
    Unclassified,
}

impl Classification {
    /// Folder name for this classification
    pub fn label(&self) -> &str {
        match self {
            Classification::Bucket(name) => name,
            Classification::Unclassified => UNSPECIFIED_BUCKET,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label bound to a pressed key; `None` means the keypress is ignored
pub fn resolve_key(key: char, map: &KeyBucketMap) -> Option<&str> {
    map.get(key)
}

/// Bucket for an extracted capture year
pub fn resolve_year(year: Option<i32>) -> Classification {
    match year {
        Some(year) => Classification::Bucket(year.to_string()),
        None => Classification::Unclassified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_key() {
        let map = KeyBucketMap::from_pairs([('1', "1990s"), ('0', "2000")]).unwrap();
        assert_eq!(resolve_key('1', &map), Some("1990s"));
        assert_eq!(resolve_key('0', &map), Some("2000"));
        assert_eq!(resolve_key('5', &map), None);
        assert_eq!(resolve_key('x', &map), None);
    }

    #[test]
    fn test_resolve_year() {
        assert_eq!(resolve_year(Some(1998)).label(), "1998");
        assert_eq!(resolve_year(Some(1998)), Classification::Bucket("1998".into()));
        assert_eq!(resolve_year(None), Classification::Unclassified);
        assert_eq!(resolve_year(None).label(), "Unspecified Date");
        assert_eq!(resolve_year(None).to_string(), UNSPECIFIED_BUCKET);
    }
}
