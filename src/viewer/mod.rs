//! Child-side book viewer.
//!
//! [`ViewerSession`] holds a read-only snapshot of the library taken at load
//! time, the open book (if any) and a [`PageCursor`]. Page turns are animated:
//! a turn starts a transition and the cursor only moves once the page-turn
//! delay has elapsed. While a transition is in flight every further turn is
//! rejected, so a rapid double press moves exactly one page.
//!
//! Time is passed in by the caller, which keeps the state machine
//! deterministic in tests.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use storybook::book::{Book, Page};
//! use storybook::viewer::{PageCursor, TurnOutcome, ViewerOptions, ViewerSession};
//!
//! let book = Book::new().with_pages(vec![Page::with_text("a"), Page::with_text("b")]);
//! let mut viewer = ViewerSession::new(vec![book], ViewerOptions::default());
//! viewer.select_book(0).unwrap();
//!
//! let start = Instant::now();
//! assert_eq!(viewer.turn_forward(start), TurnOutcome::Started);
//! viewer.tick(start + Duration::from_millis(500));
//! assert_eq!(viewer.cursor(), PageCursor::Page(0));
//! ```

mod spread;

pub use spread::{PageCursor, Spread, SpreadPolicy};

use std::time::{Duration, Instant};

use crate::book::Book;
use crate::error::{Result, StorybookError};
use crate::store::{BookStore, KeyValueBackend};

/// Default duration of a page-turn animation.
pub const DEFAULT_PAGE_TURN_DELAY: Duration = Duration::from_millis(500);

/// Light or dark reading theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Whether this is the dark theme.
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Direction of a page turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Forward,
    Backward,
}

/// Why a page turn was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRejection {
    /// No book is open.
    NoBook,
    /// Already at the last reachable spread.
    AtEnd,
    /// Already at the cover.
    AtCover,
    /// Another turn is still animating.
    InTransition,
}

/// Result of asking for a page turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The turn started; the cursor moves when the delay elapses.
    Started,
    /// The turn was refused and nothing changed.
    Rejected(TurnRejection),
}

/// Viewer behavior knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerOptions {
    /// How long a page turn animates before the cursor moves.
    pub page_turn_delay: Duration,
    /// How far a book can be turned.
    pub spread_policy: SpreadPolicy,
    /// Initial theme.
    pub theme: Theme,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            page_turn_delay: DEFAULT_PAGE_TURN_DELAY,
            spread_policy: SpreadPolicy::default(),
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Transition {
    direction: TurnDirection,
    started_at: Instant,
}

/// What the viewer is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    /// No book open: the library shelf.
    Library(&'a [Book]),
    /// A book open at its cover.
    Cover(&'a Book),
    /// A book open at a spread.
    Pages {
        book: &'a Book,
        spread: Spread<'a>,
        /// Whether this is the last reachable spread.
        last: bool,
    },
}

/// Reading state over a library snapshot.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    books: Vec<Book>,
    current_book: Option<Book>,
    cursor: PageCursor,
    theme: Theme,
    transition: Option<Transition>,
    options: ViewerOptions,
}

impl ViewerSession {
    /// Create a viewer over an already-loaded library.
    pub fn new(books: Vec<Book>, options: ViewerOptions) -> Self {
        Self {
            books,
            current_book: None,
            cursor: PageCursor::Cover,
            theme: options.theme,
            transition: None,
            options,
        }
    }

    /// Snapshot the library from a store.
    pub fn load<B: KeyValueBackend>(store: &BookStore<B>, options: ViewerOptions) -> Self {
        let books = store.load();
        tracing::debug!("Viewer opened with {} books", books.len());
        Self::new(books, options)
    }

    /// The library snapshot.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// The open book.
    pub fn current_book(&self) -> Option<&Book> {
        self.current_book.as_ref()
    }

    /// The page cursor.
    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// The current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The options this viewer runs with.
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Page-turn animation length.
    pub fn page_turn_delay(&self) -> Duration {
        self.options.page_turn_delay
    }

    /// Whether a page turn is animating.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Direction of the animating turn, if any.
    pub fn transition_direction(&self) -> Option<TurnDirection> {
        self.transition.map(|t| t.direction)
    }

    /// Last reachable cursor for the open book.
    pub fn last_cursor(&self) -> PageCursor {
        self.current_book
            .as_ref()
            .map(|b| self.options.spread_policy.last_cursor(b.page_count()))
            .unwrap_or(PageCursor::Cover)
    }

    /// Whether the open book is at its last reachable spread.
    pub fn is_last_spread(&self) -> bool {
        self.current_book.is_some()
            && self.cursor != PageCursor::Cover
            && self.cursor == self.last_cursor()
    }

    /// Whether a forward turn would currently be accepted.
    pub fn can_turn_forward(&self) -> bool {
        self.check_turn(TurnDirection::Forward).is_none()
    }

    /// Whether a backward turn would currently be accepted.
    pub fn can_turn_backward(&self) -> bool {
        self.check_turn(TurnDirection::Backward).is_none()
    }

    /// Open the book at `index`, always at its cover.
    pub fn select_book(&mut self, index: usize) -> Result<()> {
        let book = self
            .books
            .get(index)
            .cloned()
            .ok_or(StorybookError::BookIndexOutOfRange {
                index,
                len: self.books.len(),
            })?;
        self.open(book);
        Ok(())
    }

    /// Open `book`, always at its cover.
    pub fn open(&mut self, book: Book) {
        tracing::debug!("Opened '{}'", book.title);
        self.current_book = Some(book);
        self.cursor = PageCursor::Cover;
        self.transition = None;
    }

    /// Close the open book and return to the library.
    pub fn close_book(&mut self) {
        self.current_book = None;
        self.cursor = PageCursor::Cover;
        self.transition = None;
    }

    /// Flip between light and dark themes.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Start turning one page forward.
    pub fn turn_forward(&mut self, now: Instant) -> TurnOutcome {
        self.turn(TurnDirection::Forward, now)
    }

    /// Start turning one page back.
    pub fn turn_backward(&mut self, now: Instant) -> TurnOutcome {
        self.turn(TurnDirection::Backward, now)
    }

    /// Start a page turn in `direction`.
    pub fn turn(&mut self, direction: TurnDirection, now: Instant) -> TurnOutcome {
        if let Some(rejection) = self.check_turn(direction) {
            tracing::debug!("Rejected {:?} turn: {:?}", direction, rejection);
            return TurnOutcome::Rejected(rejection);
        }
        self.transition = Some(Transition {
            direction,
            started_at: now,
        });
        TurnOutcome::Started
    }

    fn check_turn(&self, direction: TurnDirection) -> Option<TurnRejection> {
        if self.current_book.is_none() {
            return Some(TurnRejection::NoBook);
        }
        if self.transition.is_some() {
            return Some(TurnRejection::InTransition);
        }
        match direction {
            TurnDirection::Forward if self.cursor >= self.last_cursor() => {
                Some(TurnRejection::AtEnd)
            }
            TurnDirection::Backward if self.cursor == PageCursor::Cover => {
                Some(TurnRejection::AtCover)
            }
            _ => None,
        }
    }

    /// Finish the animating turn if its delay has elapsed at `now`.
    ///
    /// Returns whether the cursor moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.transition {
            Some(t) if now.saturating_duration_since(t.started_at) >= self.options.page_turn_delay => {
                self.settle()
            }
            _ => false,
        }
    }

    /// Finish the animating turn immediately. Returns whether the cursor moved.
    pub fn settle(&mut self) -> bool {
        let Some(transition) = self.transition.take() else {
            return false;
        };
        self.cursor = match transition.direction {
            TurnDirection::Forward => self.cursor.forward(),
            TurnDirection::Backward => self.cursor.backward(),
        };
        tracing::debug!("Turned to {}", self.cursor);
        true
    }

    /// The spread at the cursor, if a book is open past its cover.
    pub fn spread(&self) -> Option<Spread<'_>> {
        match (self.current_book.as_ref(), self.cursor) {
            (Some(book), PageCursor::Page(p)) => Spread::at(book, p),
            _ => None,
        }
    }

    /// What should be on screen.
    pub fn view(&self) -> View<'_> {
        let Some(book) = self.current_book.as_ref() else {
            return View::Library(&self.books);
        };
        match self.spread() {
            Some(spread) => View::Pages {
                book,
                spread,
                last: self.is_last_spread(),
            },
            None => View::Cover(book),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Page;
    use crate::store::MemoryBackend;

    const DELAY: Duration = DEFAULT_PAGE_TURN_DELAY;

    fn book_with(n: usize) -> Book {
        Book::new()
            .titled(format!("{} pages", n))
            .with_pages((0..n).map(|i| Page::with_text(format!("p{}", i))).collect())
    }

    fn viewer_with(books: Vec<Book>) -> ViewerSession {
        ViewerSession::new(books, ViewerOptions::default())
    }

    /// Turn and let the animation finish.
    fn flip(viewer: &mut ViewerSession, direction: TurnDirection, now: &mut Instant) -> TurnOutcome {
        let outcome = viewer.turn(direction, *now);
        *now += DELAY;
        viewer.tick(*now);
        outcome
    }

    #[test]
    fn empty_store_shows_no_books() {
        let store = BookStore::new(MemoryBackend::new());
        let viewer = ViewerSession::load(&store, ViewerOptions::default());
        assert!(viewer.books().is_empty());
        assert_eq!(viewer.view(), View::Library(&[]));
    }

    #[test]
    fn load_snapshots_store() {
        let store = BookStore::new(MemoryBackend::new());
        store.save_all(&[book_with(2)]).unwrap();

        let viewer = ViewerSession::load(&store, ViewerOptions::default());
        store.save_all(&[]).unwrap();

        assert_eq!(viewer.books().len(), 1);
    }

    #[test]
    fn select_book_opens_at_cover() {
        let mut viewer = viewer_with(vec![book_with(3), book_with(2)]);
        let mut now = Instant::now();

        viewer.select_book(0).unwrap();
        flip(&mut viewer, TurnDirection::Forward, &mut now);
        assert_eq!(viewer.cursor(), PageCursor::Page(0));

        viewer.select_book(1).unwrap();
        assert_eq!(viewer.cursor(), PageCursor::Cover);
        assert_eq!(viewer.cursor().as_index(), -1);
        assert!(matches!(viewer.view(), View::Cover(_)));
    }

    #[test]
    fn select_missing_book_is_rejected() {
        let mut viewer = viewer_with(vec![book_with(1)]);
        assert!(matches!(
            viewer.select_book(5),
            Err(StorybookError::BookIndexOutOfRange { index: 5, len: 1 })
        ));
        assert!(viewer.current_book().is_none());
    }

    #[test]
    fn close_book_returns_to_library() {
        let mut viewer = viewer_with(vec![book_with(2)]);
        viewer.select_book(0).unwrap();
        viewer.turn_forward(Instant::now());

        viewer.close_book();
        assert!(viewer.current_book().is_none());
        assert!(!viewer.is_transitioning());
        assert!(matches!(viewer.view(), View::Library(_)));
    }

    #[test]
    fn toggle_theme_flips() {
        let mut viewer = viewer_with(vec![]);
        assert_eq!(viewer.theme(), Theme::Light);
        assert_eq!(viewer.toggle_theme(), Theme::Dark);
        assert!(viewer.theme().is_dark());
        assert_eq!(viewer.toggle_theme(), Theme::Light);
    }

    #[test]
    fn turn_without_book_is_rejected() {
        let mut viewer = viewer_with(vec![book_with(2)]);
        assert_eq!(
            viewer.turn_forward(Instant::now()),
            TurnOutcome::Rejected(TurnRejection::NoBook)
        );
        assert!(!viewer.is_transitioning());
    }

    #[test]
    fn cursor_moves_only_after_delay() {
        let mut viewer = viewer_with(vec![book_with(3)]);
        viewer.select_book(0).unwrap();
        let start = Instant::now();

        assert_eq!(viewer.turn_forward(start), TurnOutcome::Started);
        assert!(viewer.is_transitioning());
        assert_eq!(viewer.transition_direction(), Some(TurnDirection::Forward));

        assert!(!viewer.tick(start + DELAY / 2));
        assert_eq!(viewer.cursor(), PageCursor::Cover);

        assert!(viewer.tick(start + DELAY));
        assert_eq!(viewer.cursor(), PageCursor::Page(0));
        assert!(!viewer.is_transitioning());
    }

    #[test]
    fn double_turn_advances_once() {
        let mut viewer = viewer_with(vec![book_with(4)]);
        viewer.select_book(0).unwrap();
        let start = Instant::now();

        assert_eq!(viewer.turn_forward(start), TurnOutcome::Started);
        assert_eq!(
            viewer.turn_forward(start + Duration::from_millis(10)),
            TurnOutcome::Rejected(TurnRejection::InTransition)
        );
        assert_eq!(
            viewer.turn_backward(start + Duration::from_millis(20)),
            TurnOutcome::Rejected(TurnRejection::InTransition)
        );

        viewer.tick(start + DELAY * 2);
        assert_eq!(viewer.cursor(), PageCursor::Page(0));
        assert!(!viewer.tick(start + DELAY * 3));
    }

    #[test]
    fn backward_from_cover_is_rejected() {
        let mut viewer = viewer_with(vec![book_with(2)]);
        viewer.select_book(0).unwrap();
        assert_eq!(
            viewer.turn_backward(Instant::now()),
            TurnOutcome::Rejected(TurnRejection::AtCover)
        );
    }

    #[test]
    fn backward_returns_to_cover() {
        let mut viewer = viewer_with(vec![book_with(2)]);
        viewer.select_book(0).unwrap();
        let mut now = Instant::now();

        flip(&mut viewer, TurnDirection::Forward, &mut now);
        flip(&mut viewer, TurnDirection::Forward, &mut now);
        assert_eq!(viewer.cursor(), PageCursor::Page(1));

        flip(&mut viewer, TurnDirection::Backward, &mut now);
        flip(&mut viewer, TurnDirection::Backward, &mut now);
        assert_eq!(viewer.cursor(), PageCursor::Cover);
    }

    #[test]
    fn sliding_policy_reaches_last_page() {
        let mut viewer = viewer_with(vec![book_with(3)]);
        viewer.select_book(0).unwrap();
        let mut now = Instant::now();

        for _ in 0..3 {
            assert_eq!(
                flip(&mut viewer, TurnDirection::Forward, &mut now),
                TurnOutcome::Started
            );
        }
        assert_eq!(viewer.cursor(), PageCursor::Page(2));
        assert!(viewer.is_last_spread());
        assert_eq!(
            flip(&mut viewer, TurnDirection::Forward, &mut now),
            TurnOutcome::Rejected(TurnRejection::AtEnd)
        );

        let spread = viewer.spread().unwrap();
        assert_eq!(spread.left.text, "p2");
        assert!(spread.right.is_none());
    }

    #[test]
    fn full_spreads_policy_stops_before_lone_page() {
        let options = ViewerOptions {
            spread_policy: SpreadPolicy::FullSpreads,
            ..ViewerOptions::default()
        };
        let mut viewer = ViewerSession::new(vec![book_with(3)], options);
        viewer.select_book(0).unwrap();
        let mut now = Instant::now();

        for _ in 0..3 {
            flip(&mut viewer, TurnDirection::Forward, &mut now);
        }
        assert_eq!(viewer.cursor(), PageCursor::Page(1));
        let spread = viewer.spread().unwrap();
        assert_eq!(spread.left.text, "p1");
        assert_eq!(spread.right.unwrap().text, "p2");
    }

    #[test]
    fn single_page_book_turns_once() {
        let mut viewer = viewer_with(vec![book_with(1)]);
        viewer.select_book(0).unwrap();
        let mut now = Instant::now();

        assert!(viewer.can_turn_forward());
        flip(&mut viewer, TurnDirection::Forward, &mut now);
        assert_eq!(viewer.cursor(), PageCursor::Page(0));
        assert!(!viewer.can_turn_forward());
        assert!(viewer.can_turn_backward());
    }

    #[test]
    fn view_reports_spread_and_last_flag() {
        let mut viewer = viewer_with(vec![book_with(2)]);
        viewer.select_book(0).unwrap();
        let mut now = Instant::now();
        flip(&mut viewer, TurnDirection::Forward, &mut now);

        match viewer.view() {
            View::Pages { spread, last, .. } => {
                assert_eq!(spread.index, 0);
                assert_eq!(spread.right.unwrap().text, "p1");
                assert!(!last);
            }
            other => panic!("expected pages, got {:?}", other),
        }
    }

    #[test]
    fn settle_completes_without_waiting() {
        let mut viewer = viewer_with(vec![book_with(2)]);
        viewer.select_book(0).unwrap();
        viewer.turn_forward(Instant::now());

        assert!(viewer.settle());
        assert_eq!(viewer.cursor(), PageCursor::Page(0));
        assert!(!viewer.settle());
    }

    #[test]
    fn options_seed_theme() {
        let options = ViewerOptions {
            theme: Theme::Dark,
            ..ViewerOptions::default()
        };
        let viewer = ViewerSession::new(vec![], options);
        assert!(viewer.theme().is_dark());
        assert_eq!(viewer.page_turn_delay(), DEFAULT_PAGE_TURN_DELAY);
    }
}
