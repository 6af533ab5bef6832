//! Page cursor and spread pairing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::book::{Book, Page};

/// Where an open book is turned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PageCursor {
    /// The closed book, showing its cover.
    #[default]
    Cover,
    /// A spread whose left page is `pages[p]`.
    Page(usize),
}

impl PageCursor {
    /// Signed index form: `-1` for the cover, `p` for `Page(p)`.
    pub fn as_index(self) -> isize {
        match self {
            Self::Cover => -1,
            Self::Page(p) => p as isize,
        }
    }

    /// One step forward.
    pub fn forward(self) -> Self {
        match self {
            Self::Cover => Self::Page(0),
            Self::Page(p) => Self::Page(p + 1),
        }
    }

    /// One step back. The cover stays the cover.
    pub fn backward(self) -> Self {
        match self {
            Self::Cover | Self::Page(0) => Self::Cover,
            Self::Page(p) => Self::Page(p - 1),
        }
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cover => f.write_str("cover"),
            Self::Page(p) => write!(f, "page {}", p + 1),
        }
    }
}

/// How far forward a book can be turned.
///
/// The cursor always steps one page at a time and the spread at `Page(p)`
/// pairs `pages[p]` with `pages[p + 1]`. The policies differ in the last
/// reachable position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadPolicy {
    /// Turn up to the last page, shown alone on the left.
    #[default]
    Sliding,
    /// Stop at the last full spread; the right slot is only empty for
    /// single-page books.
    FullSpreads,
}

impl SpreadPolicy {
    /// Last reachable cursor for a book with `page_count` pages.
    pub fn last_cursor(self, page_count: usize) -> PageCursor {
        match (self, page_count) {
            (_, 0) => PageCursor::Cover,
            (Self::Sliding, n) => PageCursor::Page(n - 1),
            (Self::FullSpreads, n) => PageCursor::Page(n.saturating_sub(2)),
        }
    }
}

impl FromStr for SpreadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "sliding" => Ok(Self::Sliding),
            "full_spreads" => Ok(Self::FullSpreads),
            _ => Err(format!("unknown spread policy: {}", s)),
        }
    }
}

/// The two facing pages visible at one cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spread<'a> {
    /// Zero-based index of the left page.
    pub index: usize,
    /// Left page.
    pub left: &'a Page,
    /// Right page, absent past the end of the book.
    pub right: Option<&'a Page>,
}

impl<'a> Spread<'a> {
    /// The spread with `pages[index]` on the left, if that page exists.
    pub fn at(book: &'a Book, index: usize) -> Option<Self> {
        let left = book.page(index)?;
        Some(Self {
            index,
            left,
            right: book.page(index + 1),
        })
    }
}
