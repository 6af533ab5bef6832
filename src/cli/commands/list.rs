//! List command implementation.
//!
//! The `storybook list` command prints the saved books, as text or JSON.

use serde::Serialize;

use crate::book::Book;
use crate::cli::args::ListArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::ui::{StorybookTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::book_line;

/// The list command implementation.
pub struct ListCommand {
    settings: Settings,
    args: ListArgs,
}

/// One entry of `storybook list --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary<'a> {
    /// 1-based position in the library.
    pub number: usize,
    /// Stable book id.
    pub id: String,
    /// Title, possibly empty.
    pub title: &'a str,
    /// Cover color as `#RRGGBB`.
    pub cover_color: &'a str,
    /// Number of pages.
    pub pages: usize,
    /// Number of pages with a picture.
    pub images: usize,
}

impl<'a> BookSummary<'a> {
    fn of(index: usize, book: &'a Book) -> Self {
        Self {
            number: index + 1,
            id: book.id.to_string(),
            title: &book.title,
            cover_color: book.cover_color.as_str(),
            pages: book.page_count(),
            images: book.pages().iter().filter(|p| p.has_image()).count(),
        }
    }
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(settings: &Settings, args: ListArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let books = self.settings.open_store().load();

        if self.args.json {
            let summaries: Vec<_> = books
                .iter()
                .enumerate()
                .map(|(i, b)| BookSummary::of(i, b))
                .collect();
            ui.message(&serde_json::to_string_pretty(&summaries)?);
            return Ok(CommandResult::success());
        }

        if books.is_empty() {
            ui.message("No books yet. Run 'storybook edit' to make one.");
            return Ok(CommandResult::success());
        }

        let theme = StorybookTheme::for_colors(ui.uses_colors());
        ui.show_header("Library");
        for (i, book) in books.iter().enumerate() {
            ui.message(&book_line(i, book, &theme));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Page;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn settings_with(books: &[Book]) -> (TempDir, Settings) {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            data_dir: temp.path().to_path_buf(),
            ..Settings::default()
        };
        settings.open_store().save_all(books).unwrap();
        (temp, settings)
    }

    #[test]
    fn list_empty_library() {
        let (_temp, settings) = settings_with(&[]);
        let cmd = ListCommand::new(&settings, ListArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("No books yet"));
    }

    #[test]
    fn list_shows_each_book() {
        let (_temp, settings) = settings_with(&[
            Book::new().titled("Moon"),
            Book::new()
                .titled("Stars")
                .with_pages(vec![Page::empty(), Page::empty()]),
        ]);
        let cmd = ListCommand::new(&settings, ListArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert_eq!(ui.headers(), &["Library"]);
        assert!(ui.has_message("1. Moon"));
        assert!(ui.has_message("2. Stars"));
        assert!(ui.has_message("2 pages"));
    }

    #[test]
    fn list_json() {
        let book = Book::new().titled("Moon").with_pages(vec![
            Page::with_text("a").with_image("data:image/png;base64,YWJj"),
            Page::with_text("b"),
        ]);
        let (_temp, settings) = settings_with(&[book.clone()]);
        let cmd = ListCommand::new(&settings, ListArgs { json: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(value[0]["number"], 1);
        assert_eq!(value[0]["id"], book.id.to_string());
        assert_eq!(value[0]["title"], "Moon");
        assert_eq!(value[0]["coverColor"], "#8B4513");
        assert_eq!(value[0]["pages"], 2);
        assert_eq!(value[0]["images"], 1);
    }

    #[test]
    fn list_json_empty_is_empty_array() {
        let (_temp, settings) = settings_with(&[]);
        let cmd = ListCommand::new(&settings, ListArgs { json: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert_eq!(ui.messages(), &["[]"]);
    }
}
