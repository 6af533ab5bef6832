//! Cover colors.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::error::{Result, StorybookError};

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

/// Color of a book's cover, stored as a CSS color string.
///
/// Values coming from storage are kept verbatim (any non-empty string), while
/// values typed by a user go through [`CoverColor::parse`] and must be `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverColor(String);

impl CoverColor {
    /// The brown every new book starts with.
    pub const DEFAULT: &'static str = "#8B4513";

    /// Parse a user-supplied `#RRGGBB` color.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if HEX_COLOR.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(StorybookError::InvalidCoverColor {
                value: value.to_string(),
            })
        }
    }

    /// Accept a stored color as-is, falling back to the default when empty.
    pub fn from_stored(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::default()
        } else {
            Self(value)
        }
    }

    /// The color string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// RGB components, if this is a `#RRGGBB` color.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        if !HEX_COLOR.is_match(&self.0) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&self.0[range], 16).ok();
        Some((channel(1..3)?, channel(3..5)?, channel(5..7)?))
    }
}

impl Default for CoverColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for CoverColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_brown() {
        assert_eq!(CoverColor::default().as_str(), "#8B4513");
    }

    #[test]
    fn parse_accepts_hex() {
        assert_eq!(CoverColor::parse("#1e90ff").unwrap().as_str(), "#1e90ff");
        assert_eq!(CoverColor::parse(" #ABCDEF ").unwrap().as_str(), "#ABCDEF");
    }

    #[test]
    fn parse_rejects_non_hex() {
        for bad in ["brown", "#12345", "#1234567", "123456", "#GGGGGG", ""] {
            assert!(
                matches!(
                    CoverColor::parse(bad),
                    Err(StorybookError::InvalidCoverColor { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn from_stored_keeps_arbitrary_values() {
        assert_eq!(CoverColor::from_stored("rebeccapurple").as_str(), "rebeccapurple");
    }

    #[test]
    fn from_stored_defaults_empty() {
        assert_eq!(CoverColor::from_stored("  "), CoverColor::default());
    }

    #[test]
    fn rgb_components() {
        assert_eq!(CoverColor::default().rgb(), Some((0x8B, 0x45, 0x13)));
        assert_eq!(CoverColor::from_stored("red").rgb(), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&CoverColor::default()).unwrap();
        assert_eq!(json, "\"#8B4513\"");
    }
}
