//! Synthetic identifiers for books and pages.
//!
//! The library itself is positional: a book is addressed by its index in the
//! stored list and a page by its index in the book. Ids ride alongside so that
//! work started against one page (an image upload) still lands on that page
//! after the cursor or the list has moved.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! synthetic_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an id from its string form.
            ///
            /// Accepts both the prefixed form produced by `Display` and a bare UUID.
            pub fn parse(s: &str) -> Option<Self> {
                let s = s.trim();
                let raw = s.strip_prefix($prefix).unwrap_or(s);
                Uuid::parse_str(raw).ok().map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $name::parse(&s).ok_or_else(|| {
                    serde::de::Error::custom(concat!("Invalid ", stringify!($name), " format"))
                })
            }
        }
    };
}

synthetic_id!(
    /// Stable identifier of a book, format `book_{uuid}`.
    BookId,
    "book_"
);

synthetic_id!(
    /// Stable identifier of a page, format `page_{uuid}`.
    PageId,
    "page_"
);
