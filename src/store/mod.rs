//! Persistent book library.
//!
//! The whole library lives in a single key of a [`KeyValueBackend`] as a JSON
//! array of books. Loading never fails: a missing, unreadable or corrupt value
//! is treated as an empty library. Saving rewrites the entire value.

mod backend;
mod file;

pub use backend::{KeyValueBackend, MemoryBackend};
pub use file::FileBackend;

use crate::book::{decode_library, encode_library, Book};
use crate::error::Result;

/// Key the library is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "savedBooks";

/// The persisted list of books.
#[derive(Debug, Clone)]
pub struct BookStore<B> {
    backend: B,
    key: String,
}

impl<B: KeyValueBackend> BookStore<B> {
    /// Create a store using the default key.
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Create a store using a custom key.
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the library.
    ///
    /// Returns an empty list when nothing is stored, the backend cannot be
    /// read, or the stored value does not parse.
    pub fn load(&self) -> Vec<Book> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No library stored under '{}'", self.key);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read library '{}', treating as empty: {}", self.key, e);
                return Vec::new();
            }
        };

        let books = decode_library(&raw);
        tracing::debug!("Loaded {} books from '{}'", books.len(), self.key);
        books
    }

    /// Serialize `books` and overwrite the stored library.
    pub fn save_all(&self, books: &[Book]) -> Result<()> {
        let raw = encode_library(books)?;
        self.backend.set(&self.key, &raw)?;
        tracing::info!("Saved {} books to '{}'", books.len(), self.key);
        Ok(())
    }
}
