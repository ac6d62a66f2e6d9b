//! Storage path segment validation
//!
//! Upload bucket and folder names become directory names on disk, so they
//! are restricted to a slug shape. Matches nothing that could traverse out
//! of the upload root.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for a storage path segment
const MAX_SEGMENT_LEN: usize = 64;

/// Lowercase alphanumeric plus hyphen/underscore, starting alphanumeric
static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").expect("invalid segment regex"));

/// Validated storage path segment (upload bucket or folder name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageName(String);

impl StorageName {
    /// Validate a bucket or folder name.
    ///
    /// `field` names the offending request field in error messages.
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        if s.len() > MAX_SEGMENT_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_SEGMENT_LEN,
            });
        }
        if !SEGMENT_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "must be lowercase alphanumeric with hyphens/underscores",
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StorageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_slugs() {
        assert!(StorageName::new("bucket", "property-images").is_ok());
        assert!(StorageName::new("folder", "general").is_ok());
        assert!(StorageName::new("folder", "2024_listings").is_ok());
    }

    #[test]
    fn rejects_traversal_shapes() {
        assert!(StorageName::new("folder", "..").is_err());
        assert!(StorageName::new("folder", "a/b").is_err());
        assert!(StorageName::new("folder", ".hidden").is_err());
    }

    #[test]
    fn rejects_uppercase_and_empty() {
        assert!(StorageName::new("bucket", "Images").is_err());
        assert!(StorageName::new("bucket", "").is_err());
    }

    #[test]
    fn enforces_length() {
        let long = "a".repeat(65);
        assert!(matches!(
            StorageName::new("bucket", &long).unwrap_err(),
            ValidationError::TooLong { max: 64, .. }
        ));
    }
}
