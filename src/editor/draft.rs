//! The editor's working copy of a book.

use crate::book::{Book, BookId, CoverColor, Page, PageId};

/// Unsaved copy of the book being edited, plus the page cursor.
///
/// `pages` is never empty and `page_index` always points into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Draft {
    pub(crate) book_id: BookId,
    pub(crate) title: String,
    pub(crate) cover_color: CoverColor,
    pub(crate) pages: Vec<Page>,
    pub(crate) page_index: usize,
}

impl Draft {
    /// Untitled, default cover, one blank page.
    pub(crate) fn blank() -> Self {
        Self {
            book_id: BookId::new(),
            title: String::new(),
            cover_color: CoverColor::default(),
            pages: vec![Page::empty()],
            page_index: 0,
        }
    }

    /// Copy a stored book into a draft, cursor on the first page.
    pub(crate) fn from_book(book: &Book) -> Self {
        Self {
            book_id: book.id,
            title: book.title.clone(),
            cover_color: book.cover_color.clone(),
            pages: book.pages().to_vec(),
            page_index: 0,
        }
    }

    /// Build the book this draft would save as.
    pub(crate) fn to_book(&self) -> Book {
        Book::from_parts(
            self.book_id,
            self.title.clone(),
            self.cover_color.clone(),
            self.pages.clone(),
        )
    }

    pub(crate) fn current_page(&self) -> &Page {
        &self.pages[self.page_index]
    }

    pub(crate) fn current_page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.page_index]
    }

    pub(crate) fn last_page_index(&self) -> usize {
        self.pages.len() - 1
    }

    /// Append a blank page and move onto it.
    pub(crate) fn push_page(&mut self) {
        self.pages.push(Page::empty());
        self.page_index = self.last_page_index();
    }

    pub(crate) fn page_by_id_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_draft_has_one_page() {
        let draft = Draft::blank();
        assert_eq!(draft.pages.len(), 1);
        assert_eq!(draft.page_index, 0);
        assert_eq!(draft.cover_color, CoverColor::default());
    }

    #[test]
    fn from_book_copies_fields() {
        let book = Book::new()
            .titled("Moon")
            .with_pages(vec![Page::with_text("a"), Page::with_text("b")]);
        let draft = Draft::from_book(&book);

        assert_eq!(draft.book_id, book.id);
        assert_eq!(draft.title, "Moon");
        assert_eq!(draft.pages.len(), 2);
        assert_eq!(draft.to_book(), book);
    }

    #[test]
    fn push_page_moves_cursor() {
        let mut draft = Draft::blank();
        draft.push_page();
        draft.push_page();
        assert_eq!(draft.pages.len(), 3);
        assert_eq!(draft.page_index, 2);
    }

    #[test]
    fn page_by_id_finds_page() {
        let mut draft = Draft::blank();
        draft.push_page();
        let id = draft.pages[0].id;
        draft.page_by_id_mut(id).unwrap().text = "found".into();
        assert_eq!(draft.pages[0].text, "found");
        assert!(draft.page_by_id_mut(PageId::new()).is_none());
    }
}
