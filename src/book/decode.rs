//! Lenient decoding of stored library data.
//!
//! The stored blob is untrusted: it may predate ids, have been edited by hand,
//! or come from an older build that wrote partial records. Every field is read
//! on its own and defaulted when missing or of the wrong type, so a decoded
//! [`Book`] always satisfies the model invariants.

use serde_json::{Map, Value};

use super::{Book, BookId, CoverColor, Page, PageId};

/// Decode a serialized library.
///
/// Anything that is not a JSON array yields an empty library. Array entries
/// that are not objects are dropped.
pub fn decode_library(raw: &str) -> Vec<Book> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Stored library is not valid JSON, treating as empty: {}", e);
            return Vec::new();
        }
    };

    let Value::Array(entries) = value else {
        tracing::warn!("Stored library is not a JSON array, treating as empty");
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let book = decode_book(entry);
            if book.is_none() {
                tracing::warn!("Dropping stored book {}: not an object", index);
            }
            book
        })
        .collect()
}

/// Decode one stored book, or `None` if the entry is not an object.
pub fn decode_book(value: &Value) -> Option<Book> {
    let fields = value.as_object()?;

    let id = string_field(fields, "id")
        .and_then(BookId::parse)
        .unwrap_or_default();
    let title = string_field(fields, "title").unwrap_or_default();
    let cover_color = string_field(fields, "coverColor")
        .map(CoverColor::from_stored)
        .unwrap_or_default();
    let pages = fields
        .get("pages")
        .and_then(Value::as_array)
        .map(|pages| pages.iter().map(decode_page).collect())
        .unwrap_or_default();

    Some(Book::from_parts(id, title, cover_color, pages))
}

/// Decode one stored page. Non-object values become a blank page.
pub fn decode_page(value: &Value) -> Page {
    let Some(fields) = value.as_object() else {
        return Page::empty();
    };

    Page {
        id: string_field(fields, "id")
            .and_then(PageId::parse)
            .unwrap_or_default(),
        text: string_field(fields, "text").unwrap_or_default().to_string(),
        image: string_field(fields, "image").unwrap_or_default().to_string(),
    }
}

fn string_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_legacy_shape_without_ids() {
        let raw = r##"[{"title":"Moon","coverColor":"#000080","pages":[{"text":"Hello","image":""}]}]"##;
        let books = decode_library(raw);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Moon");
        assert_eq!(books[0].cover_color.as_str(), "#000080");
        assert_eq!(books[0].pages()[0].text, "Hello");
    }

    #[test]
    fn keeps_stored_ids() {
        let book = Book::new().titled("Ids");
        let raw = serde_json::to_string(&vec![book.clone()]).unwrap();
        let books = decode_library(&raw);
        assert_eq!(books[0].id, book.id);
        assert_eq!(books[0].pages()[0].id, book.pages()[0].id);
    }

    #[test]
    fn invalid_json_is_empty_library() {
        assert!(decode_library("{not json").is_empty());
        assert!(decode_library("").is_empty());
    }

    #[test]
    fn non_array_is_empty_library() {
        assert!(decode_library(r#"{"title":"x"}"#).is_empty());
        assert!(decode_library("null").is_empty());
        assert!(decode_library("42").is_empty());
    }

    #[test]
    fn drops_non_object_entries() {
        let books = decode_library(r#"[1, "two", {"title":"three"}, null]"#);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "three");
    }

    #[test]
    fn missing_pages_become_one_blank_page() {
        let books = decode_library(r#"[{"title":"No pages"}]"#);
        assert_eq!(books[0].page_count(), 1);
        assert!(books[0].pages()[0].is_blank());
    }

    #[test]
    fn empty_or_mistyped_pages_become_one_blank_page() {
        let books = decode_library(r#"[{"pages":[]},{"pages":"nope"}]"#);
        assert_eq!(books.len(), 2);
        assert!(books.iter().all(|b| b.page_count() == 1));
    }

    #[test]
    fn mistyped_fields_are_defaulted() {
        let books =
            decode_library(r#"[{"title":7,"coverColor":false,"pages":[{"text":1,"image":[]}, 5]}]"#);
        let book = &books[0];
        assert_eq!(book.title, "");
        assert_eq!(book.cover_color, CoverColor::default());
        assert_eq!(book.page_count(), 2);
        assert!(book.pages().iter().all(Page::is_blank));
    }

    #[test]
    fn empty_cover_color_is_defaulted() {
        let books = decode_library(r#"[{"coverColor":""}]"#);
        assert_eq!(books[0].cover_color.as_str(), "#8B4513");
    }

    #[test]
    fn unparsable_ids_are_regenerated() {
        let books = decode_library(r#"[{"id":"garbage","pages":[{"id":"also garbage"}]}]"#);
        assert!(books[0].id.to_string().starts_with("book_"));
        assert!(books[0].pages()[0].id.to_string().starts_with("page_"));
    }
}
