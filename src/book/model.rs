//! Book and page records.

use serde::Serialize;

use super::{BookId, CoverColor, PageId};

/// One page of a book: some text and an optional embedded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Stable page id.
    pub id: PageId,
    /// Free text, may be empty.
    pub text: String,
    /// Empty, or a self-contained `data:` URI.
    pub image: String,
}

impl Page {
    /// A blank page with a fresh id.
    pub fn empty() -> Self {
        Self {
            id: PageId::new(),
            text: String::new(),
            image: String::new(),
        }
    }

    /// A page with text and no image.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::empty()
        }
    }

    /// Attach an image payload.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Whether an image is attached.
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    /// Whether both text and image are empty.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && self.image.is_empty()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::empty()
    }
}

/// A book as stored in the library.
///
/// The page list is never empty: constructors top it up with a blank page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Stable book id.
    pub id: BookId,
    /// Title, may be empty.
    pub title: String,
    /// Cover color.
    pub cover_color: CoverColor,
    pages: Vec<Page>,
}

impl Book {
    /// An untitled book with the default cover and one blank page.
    pub fn new() -> Self {
        Self::from_parts(BookId::new(), String::new(), CoverColor::default(), Vec::new())
    }

    /// Assemble a book from its fields.
    ///
    /// An empty `pages` becomes a single blank page.
    pub fn from_parts(
        id: BookId,
        title: impl Into<String>,
        cover_color: CoverColor,
        mut pages: Vec<Page>,
    ) -> Self {
        if pages.is_empty() {
            pages.push(Page::empty());
        }
        Self {
            id,
            title: title.into(),
            cover_color,
            pages,
        }
    }

    /// Builder-style title setter.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder-style page list setter. An empty list becomes one blank page.
    pub fn with_pages(mut self, pages: Vec<Page>) -> Self {
        self.pages = pages;
        if self.pages.is_empty() {
            self.pages.push(Page::empty());
        }
        self
    }

    /// Builder-style cover color setter.
    pub fn with_cover(mut self, cover_color: CoverColor) -> Self {
        self.cover_color = cover_color;
        self
    }

    /// Pages in reading order. Never empty.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages (at least 1).
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page at `index`, if any.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Take the page list out of the book.
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    /// Title for display, with a placeholder when empty.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(untitled)"
        } else {
            &self.title
        }
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_has_one_blank_page() {
        let book = Book::new();
        assert_eq!(book.page_count(), 1);
        assert!(book.pages()[0].is_blank());
        assert_eq!(book.title, "");
        assert_eq!(book.cover_color.as_str(), "#8B4513");
    }

    #[test]
    fn from_parts_tops_up_empty_pages() {
        let book = Book::from_parts(BookId::new(), "Moon", CoverColor::default(), vec![]);
        assert_eq!(book.page_count(), 1);
    }

    #[test]
    fn with_pages_keeps_order() {
        let book = Book::new().with_pages(vec![Page::with_text("a"), Page::with_text("b")]);
        let texts: Vec<_> = book.pages().iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn with_pages_empty_keeps_invariant() {
        let book = Book::new().with_pages(Vec::new());
        assert_eq!(book.page_count(), 1);
    }

    #[test]
    fn page_image_helpers() {
        let page = Page::with_text("hi").with_image("data:image/png;base64,AAAA");
        assert!(page.has_image());
        assert!(!page.is_blank());
        assert!(!Page::with_text("hi").has_image());
    }

    #[test]
    fn display_title_placeholder() {
        assert_eq!(Book::new().display_title(), "(untitled)");
        assert_eq!(Book::new().titled("Moon").display_title(), "Moon");
    }

    #[test]
    fn serializes_with_camel_case_cover() {
        let book = Book::new().titled("Moon");
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["title"], "Moon");
        assert_eq!(json["coverColor"], "#8B4513");
        assert_eq!(json["pages"].as_array().unwrap().len(), 1);
        assert_eq!(json["pages"][0]["text"], "");
        assert_eq!(json["pages"][0]["image"], "");
    }
}
