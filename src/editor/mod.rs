//! Parent-side book editor.
//!
//! [`EditorSession`] keeps the loaded library, the index of the book being
//! edited and an unsaved draft of that book. Field edits only touch the draft;
//! [`EditorSession::save`] writes the draft back into the library and persists
//! the whole list, while [`EditorSession::delete_current`] persists immediately.
//!
//! The book index may equal `books().len()`: that is a new book that has not
//! been saved yet.
//!
//! # Example
//!
//! ```
//! use storybook::editor::{EditorSession, SaveOutcome};
//! use storybook::store::{BookStore, MemoryBackend};
//!
//! let mut editor = EditorSession::load(BookStore::new(MemoryBackend::new()));
//! editor.new_book();
//! editor.set_title("The Sleepy Moon");
//! editor.set_page_text("Once upon a time...");
//! assert_eq!(editor.save().unwrap(), SaveOutcome::Inserted);
//! assert_eq!(editor.books().len(), 1);
//! ```

mod draft;

use draft::Draft;

use crate::book::{Book, CoverColor, Page, PageId};
use crate::error::{Result, StorybookError};
use crate::store::{BookStore, KeyValueBackend};

/// Direction for page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

/// What a page navigation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    /// Cursor moved to an existing page.
    Moved,
    /// "Next" on the last page appended a blank page and moved onto it.
    Added,
    /// Already on the first page; nothing changed.
    AtStart,
}

/// Result of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new book was appended to the library.
    Inserted,
    /// An existing book was replaced in place.
    Updated,
}

/// Ticket for an image upload in flight.
///
/// Remembers which page the upload was started on, so the image lands there
/// even if the cursor moves before the file has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingImage {
    page_id: PageId,
    page_index: usize,
}

impl PendingImage {
    /// Id of the target page.
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Position of the target page when the upload started.
    pub fn page_index(&self) -> usize {
        self.page_index
    }
}

/// Editing state over one library.
#[derive(Debug)]
pub struct EditorSession<B> {
    store: BookStore<B>,
    books: Vec<Book>,
    current_book_index: usize,
    draft: Draft,
}

impl<B: KeyValueBackend> EditorSession<B> {
    /// Load the library and open the first book, or a blank draft when empty.
    pub fn load(store: BookStore<B>) -> Self {
        let books = store.load();
        let draft = books.first().map(Draft::from_book).unwrap_or_else(Draft::blank);
        tracing::debug!("Editor opened with {} books", books.len());

        Self {
            store,
            books,
            current_book_index: 0,
            draft,
        }
    }

    /// The store this session writes to.
    pub fn store(&self) -> &BookStore<B> {
        &self.store
    }

    /// The library as last loaded or saved.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Index of the book being edited. Equal to `books().len()` for a new book.
    pub fn current_book_index(&self) -> usize {
        self.current_book_index
    }

    /// Whether the draft is a book not yet in the library.
    pub fn is_new_book(&self) -> bool {
        self.current_book_index >= self.books.len()
    }

    /// Draft title.
    pub fn draft_title(&self) -> &str {
        &self.draft.title
    }

    /// Draft cover color.
    pub fn draft_cover_color(&self) -> &CoverColor {
        &self.draft.cover_color
    }

    /// Draft pages. Never empty.
    pub fn draft_pages(&self) -> &[Page] {
        &self.draft.pages
    }

    /// Index of the page under the cursor.
    pub fn draft_page_index(&self) -> usize {
        self.draft.page_index
    }

    /// Page under the cursor.
    pub fn current_page(&self) -> &Page {
        self.draft.current_page()
    }

    /// The draft as the book it would save as.
    pub fn draft_book(&self) -> Book {
        self.draft.to_book()
    }

    /// "Book n of m", with n = 0 for an empty library.
    pub fn book_label(&self) -> String {
        let position = if self.books.is_empty() {
            0
        } else {
            self.current_book_index + 1
        };
        format!("Book {} of {}", position, self.books.len())
    }

    /// "Page n of m" for the draft.
    pub fn page_label(&self) -> String {
        format!(
            "Page {} of {}",
            self.draft.page_index + 1,
            self.draft.pages.len()
        )
    }

    /// Whether "next page" will grow the book instead of moving.
    pub fn next_page_adds(&self) -> bool {
        self.draft.page_index == self.draft.last_page_index()
    }

    /// Whether [`previous_book`](Self::previous_book) would move.
    pub fn can_go_previous_book(&self) -> bool {
        !self.books.is_empty() && self.current_book_index != 0
    }

    /// Whether [`next_book`](Self::next_book) would move.
    pub fn can_go_next_book(&self) -> bool {
        !self.books.is_empty() && self.current_book_index != self.books.len() - 1
    }

    /// Whether the draft differs from what is stored.
    ///
    /// A new book counts as changed once it is no longer blank.
    pub fn has_unsaved_changes(&self) -> bool {
        match self.books.get(self.current_book_index) {
            Some(book) => *book != self.draft.to_book(),
            None => {
                !self.draft.title.is_empty()
                    || self.draft.cover_color != CoverColor::default()
                    || self.draft.pages.len() > 1
                    || !self.draft.pages.iter().all(Page::is_blank)
            }
        }
    }

    // --- Book selection ---

    /// Switch to the book at `index` and load it into the draft.
    ///
    /// With an empty library the draft is reset to a blank book. Otherwise an
    /// index past the end is rejected and nothing changes.
    pub fn select_book(&mut self, index: usize) -> Result<()> {
        if self.books.is_empty() {
            self.current_book_index = 0;
            self.draft = Draft::blank();
            return Ok(());
        }
        if index >= self.books.len() {
            return Err(StorybookError::BookIndexOutOfRange {
                index,
                len: self.books.len(),
            });
        }
        self.current_book_index = index;
        self.hydrate();
        tracing::debug!("Selected book {}", index);
        Ok(())
    }

    /// Move to the previous book, clamped to the first one.
    ///
    /// From an unsaved new book this goes to the last stored book. Returns
    /// whether the selection changed.
    pub fn previous_book(&mut self) -> bool {
        if self.books.is_empty() {
            return false;
        }
        let target = self
            .current_book_index
            .saturating_sub(1)
            .min(self.books.len() - 1);
        self.move_to_book(target)
    }

    /// Move to the next book, clamped to the last one. Returns whether the
    /// selection changed.
    pub fn next_book(&mut self) -> bool {
        if self.books.is_empty() {
            return false;
        }
        let target = (self.current_book_index + 1).min(self.books.len() - 1);
        self.move_to_book(target)
    }

    fn move_to_book(&mut self, target: usize) -> bool {
        if target == self.current_book_index {
            return false;
        }
        self.current_book_index = target;
        self.hydrate();
        tracing::debug!("Moved to book {}", target);
        true
    }

    /// Reload the draft from the current slot, or blank if there is none.
    fn hydrate(&mut self) {
        self.draft = self
            .books
            .get(self.current_book_index)
            .map(Draft::from_book)
            .unwrap_or_else(Draft::blank);
    }

    /// Start a new, unsaved book after the last stored one.
    pub fn new_book(&mut self) {
        self.current_book_index = self.books.len();
        self.draft = Draft::blank();
        tracing::debug!("Started new book at index {}", self.current_book_index);
    }

    // --- Draft edits ---

    /// Set the draft title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    /// Set the draft cover color from a `#RRGGBB` string.
    ///
    /// Invalid input leaves the draft unchanged.
    pub fn set_cover_color(&mut self, value: &str) -> Result<()> {
        self.draft.cover_color = CoverColor::parse(value)?;
        Ok(())
    }

    /// Set the text of the page under the cursor.
    pub fn set_page_text(&mut self, text: impl Into<String>) {
        self.draft.current_page_mut().text = text.into();
    }

    /// Set the image of the page under the cursor.
    pub fn set_page_image(&mut self, image: impl Into<String>) {
        self.draft.current_page_mut().image = image.into();
    }

    /// Remove the image of the page under the cursor.
    pub fn clear_page_image(&mut self) {
        self.draft.current_page_mut().image.clear();
    }

    // --- Pages ---

    /// Append a blank page and move onto it.
    pub fn add_page(&mut self) {
        self.draft.push_page();
        tracing::debug!("Added page {}", self.draft.page_index + 1);
    }

    /// Move the page cursor. "Next" on the last page adds a page.
    pub fn navigate_page(&mut self, direction: PageDirection) -> PageNav {
        match direction {
            PageDirection::Previous => {
                if self.draft.page_index == 0 {
                    PageNav::AtStart
                } else {
                    self.draft.page_index -= 1;
                    PageNav::Moved
                }
            }
            PageDirection::Next => {
                if self.draft.page_index < self.draft.last_page_index() {
                    self.draft.page_index += 1;
                    PageNav::Moved
                } else {
                    self.add_page();
                    PageNav::Added
                }
            }
        }
    }

    /// Shorthand for `navigate_page(PageDirection::Previous)`.
    pub fn previous_page(&mut self) -> PageNav {
        self.navigate_page(PageDirection::Previous)
    }

    /// Shorthand for `navigate_page(PageDirection::Next)`.
    pub fn next_page(&mut self) -> PageNav {
        self.navigate_page(PageDirection::Next)
    }

    // --- Images ---

    /// Start an image upload for the page under the cursor.
    pub fn begin_image_upload(&self) -> PendingImage {
        PendingImage {
            page_id: self.draft.current_page().id,
            page_index: self.draft.page_index,
        }
    }

    /// Attach a finished upload to the page it was started on.
    ///
    /// Returns `false` and drops the image if that page is no longer part of
    /// the draft (for example after switching books).
    pub fn complete_image_upload(&mut self, pending: PendingImage, data_uri: String) -> bool {
        match self.draft.page_by_id_mut(pending.page_id) {
            Some(page) => {
                page.image = data_uri;
                true
            }
            None => {
                tracing::warn!(
                    "Discarding image for page {}: page is no longer in the draft",
                    pending.page_index + 1
                );
                false
            }
        }
    }

    // --- Persistence ---

    /// Write the draft into the library and persist it.
    ///
    /// Replaces the current slot, or appends when editing a new book. The
    /// in-memory library is only updated once the store write succeeded.
    pub fn save(&mut self) -> Result<SaveOutcome> {
        let book = self.draft.to_book();
        let mut updated = self.books.clone();

        let outcome = if self.current_book_index < updated.len() {
            updated[self.current_book_index] = book;
            SaveOutcome::Updated
        } else {
            updated.push(book);
            SaveOutcome::Inserted
        };

        self.store.save_all(&updated)?;

        self.books = updated;
        if outcome == SaveOutcome::Inserted {
            self.current_book_index = self.books.len() - 1;
        }
        tracing::info!("Saved book {} ({:?})", self.current_book_index + 1, outcome);
        Ok(outcome)
    }

    /// Delete the current book from the library and persist immediately.
    ///
    /// Does nothing for an empty library or an unsaved new book. Afterwards
    /// the selection is clamped to the last remaining book and the draft is
    /// reloaded from it.
    pub fn delete_current(&mut self) -> Result<Option<Book>> {
        if self.current_book_index >= self.books.len() {
            return Ok(None);
        }

        let mut updated = self.books.clone();
        let removed = updated.remove(self.current_book_index);
        self.store.save_all(&updated)?;

        self.books = updated;
        if self.current_book_index >= self.books.len() {
            self.current_book_index = self.books.len().saturating_sub(1);
        }
        self.hydrate();

        tracing::info!("Deleted book '{}'", removed.title);
        Ok(Some(removed))
    }
}
