//! Storybook - a picture-book editor and reader.
//!
//! A grown-up writes books page by page in the editor; a child reads them
//! in the viewer, one two-page spread at a time. The whole library lives in
//! a single JSON document under one key of a key-value store.
//!
//! # Modules
//!
//! - [`book`] - Book and page model, JSON encoding, and lenient decoding
//! - [`store`] - Key-value backends and the book store
//! - [`editor`] - Editing session state machine
//! - [`viewer`] - Reading session state machine
//! - [`media`] - Image files as inline data URIs
//! - [`config`] - Settings file loading
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use storybook::editor::EditorSession;
//! use storybook::store::{BookStore, MemoryBackend};
//! use storybook::viewer::{ViewerOptions, ViewerSession};
//!
//! let backend = MemoryBackend::new();
//!
//! let mut editor = EditorSession::load(BookStore::new(backend.clone()));
//! editor.set_title("Goodnight");
//! editor.save().unwrap();
//!
//! let viewer = ViewerSession::load(&BookStore::new(backend), ViewerOptions::default());
//! assert_eq!(viewer.books()[0].title, "Goodnight");
//! ```

pub mod book;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod media;
pub mod store;
pub mod ui;
pub mod viewer;

pub use error::{Result, StorybookError};
