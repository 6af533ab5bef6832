//! Book and page data model.
//!
//! A library is an ordered `Vec<Book>`; each [`Book`] holds a title, a
//! [`CoverColor`] and at least one [`Page`]. Stored data is decoded leniently
//! through [`decode_library`] so that malformed records are repaired rather
//! than rejected.

mod color;
mod decode;
mod id;
mod model;

pub use color::CoverColor;
pub use decode::{decode_book, decode_library, decode_page};
pub use id::{BookId, PageId};
pub use model::{Book, Page};

/// Serialize a library to the stored JSON form.
pub fn encode_library(books: &[Book]) -> crate::error::Result<String> {
    Ok(serde_json::to_string(books)?)
}
