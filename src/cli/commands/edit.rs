//! Edit command implementation.
//!
//! The `storybook edit` command runs the parent-side editor as a menu loop:
//! show where we are, ask for one action, apply it to the
//! [`EditorSession`], repeat until the user quits.

use crate::cli::args::EditArgs;
use crate::config::Settings;
use crate::editor::{EditorSession, PageNav, SaveOutcome};
use crate::error::Result;
use crate::media::ImageJob;
use crate::store::KeyValueBackend;
use crate::ui::{Prompt, PromptOption, StorybookTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::editor_status;

/// The edit command implementation.
pub struct EditCommand {
    settings: Settings,
    args: EditArgs,
}

impl EditCommand {
    /// Create a new edit command.
    pub fn new(settings: &Settings, args: EditArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &EditArgs {
        &self.args
    }
}

impl Command for EditCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut session = EditorSession::load(self.settings.open_store());

        if self.args.new {
            session.new_book();
        } else if let Some(n) = self.args.book {
            if n == 0 || n > session.books().len() || session.select_book(n - 1).is_err() {
                ui.error(&format!(
                    "No book {} (library has {})",
                    n,
                    session.books().len()
                ));
                return Ok(CommandResult::failure(2));
            }
        }

        run_editor(&mut session, ui)
    }
}

/// One menu entry of the editor loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    PreviousBook,
    NextBook,
    NewBook,
    DeleteBook,
    Title,
    CoverColor,
    PageText,
    PageImage,
    ClearImage,
    PreviousPage,
    NextPage,
    AddPage,
    Save,
    Quit,
}

impl Action {
    fn value(self) -> &'static str {
        match self {
            Self::PreviousBook => "prev_book",
            Self::NextBook => "next_book",
            Self::NewBook => "new_book",
            Self::DeleteBook => "delete_book",
            Self::Title => "title",
            Self::CoverColor => "color",
            Self::PageText => "text",
            Self::PageImage => "image",
            Self::ClearImage => "clear_image",
            Self::PreviousPage => "prev_page",
            Self::NextPage => "next_page",
            Self::AddPage => "add_page",
            Self::Save => "save",
            Self::Quit => "quit",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.value() == value)
    }

    const ALL: [Self; 14] = [
        Self::PreviousBook,
        Self::NextBook,
        Self::NewBook,
        Self::DeleteBook,
        Self::Title,
        Self::CoverColor,
        Self::PageText,
        Self::PageImage,
        Self::ClearImage,
        Self::PreviousPage,
        Self::NextPage,
        Self::AddPage,
        Self::Save,
        Self::Quit,
    ];
}

fn action_menu<B: KeyValueBackend>(session: &EditorSession<B>) -> Vec<PromptOption> {
    let mut options = vec![
        PromptOption::new(Action::PageText.value(), "Write page text"),
        PromptOption::new(Action::PageImage.value(), "Add picture to page"),
    ];
    if session.current_page().has_image() {
        options.push(PromptOption::new(
            Action::ClearImage.value(),
            "Remove picture",
        ));
    }
    options.push(PromptOption::new(Action::PreviousPage.value(), "◀ Previous page"));
    let next_label = if session.next_page_adds() {
        "Next page ▶ (adds a page)"
    } else {
        "Next page ▶"
    };
    options.push(PromptOption::new(Action::NextPage.value(), next_label));
    options.push(PromptOption::new(Action::AddPage.value(), "Add page"));
    options.push(PromptOption::new(Action::Title.value(), "Set title"));
    options.push(PromptOption::new(Action::CoverColor.value(), "Set cover color"));
    options.push(PromptOption::new(Action::Save.value(), "Save book"));
    options.push(PromptOption::new(Action::PreviousBook.value(), "◀ Previous book"));
    options.push(PromptOption::new(Action::NextBook.value(), "Next book ▶"));
    options.push(PromptOption::new(Action::NewBook.value(), "New book"));
    if !session.is_new_book() {
        options.push(PromptOption::new(Action::DeleteBook.value(), "Delete book"));
    }
    options.push(PromptOption::new(Action::Quit.value(), "Quit"));
    options
}

/// Run the editor menu loop until the user quits.
pub fn run_editor<B: KeyValueBackend>(
    session: &mut EditorSession<B>,
    ui: &mut dyn UserInterface,
) -> Result<CommandResult> {
    let theme = StorybookTheme::for_colors(ui.uses_colors());
    ui.show_header("Storybook editor");

    loop {
        for line in editor_status(session, &theme) {
            ui.message(&line);
        }

        let prompt = Prompt::select("editor_action", "What next?", action_menu(session))
            .with_default(Action::Quit.value());
        let answer = ui.prompt(&prompt)?.as_string();

        let Some(action) = Action::parse(&answer) else {
            ui.warning(&format!("Unknown action '{}'", answer));
            continue;
        };

        if action == Action::Quit {
            if session.has_unsaved_changes() {
                ui.warning("Leaving with unsaved changes");
            }
            return Ok(CommandResult::success());
        }

        apply(session, action, ui)?;
    }
}

fn apply<B: KeyValueBackend>(
    session: &mut EditorSession<B>,
    action: Action,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    match action {
        Action::PreviousBook => {
            if !session.previous_book() {
                ui.warning("Already at the first book");
            }
        }
        Action::NextBook => {
            if !session.next_book() {
                ui.warning("Already at the last book");
            }
        }
        Action::NewBook => session.new_book(),
        Action::DeleteBook => delete_book(session, ui)?,
        Action::Title => {
            let prompt = Prompt::input("book_title", "Title").with_default(session.draft_title());
            let title = ui.prompt(&prompt)?.as_string();
            session.set_title(title.trim());
        }
        Action::CoverColor => {
            let prompt = Prompt::input("cover_color", "Cover color (#RRGGBB)")
                .with_default(session.draft_cover_color().as_str());
            let value = ui.prompt(&prompt)?.as_string();
            if let Err(e) = session.set_cover_color(&value) {
                ui.error(&e.to_string());
            }
        }
        Action::PageText => {
            let prompt =
                Prompt::input("page_text", "Page text").with_default(&session.current_page().text);
            let text = ui.prompt(&prompt)?.as_string();
            session.set_page_text(text);
        }
        Action::PageImage => attach_image(session, ui)?,
        Action::ClearImage => session.clear_page_image(),
        Action::PreviousPage => {
            if session.previous_page() == PageNav::AtStart {
                ui.warning("Already on the first page");
            }
        }
        Action::NextPage => {
            if session.next_page() == PageNav::Added {
                ui.message(&format!("Added a new page: {}", session.page_label()));
            }
        }
        Action::AddPage => session.add_page(),
        Action::Save => match session.save() {
            Ok(SaveOutcome::Inserted) => ui.success(&format!(
                "Saved new book '{}'",
                session.draft_book().display_title()
            )),
            Ok(SaveOutcome::Updated) => ui.success(&format!(
                "Saved '{}'",
                session.draft_book().display_title()
            )),
            Err(e) => ui.error(&format!("Failed to save: {}", e)),
        },
        Action::Quit => {}
    }
    Ok(())
}

fn delete_book<B: KeyValueBackend>(
    session: &mut EditorSession<B>,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    if session.is_new_book() {
        ui.warning("This book has not been saved yet");
        return Ok(());
    }

    let title = session.draft_book().display_title().to_string();
    let prompt = Prompt::confirm("confirm_delete", format!("Delete '{}'?", title))
        .with_default("false");
    if ui.prompt(&prompt)?.as_bool() != Some(true) {
        return Ok(());
    }

    match session.delete_current() {
        Ok(Some(removed)) => ui.success(&format!("Deleted '{}'", removed.display_title())),
        Ok(None) => {}
        Err(e) => ui.error(&format!("Failed to delete: {}", e)),
    }
    Ok(())
}

fn attach_image<B: KeyValueBackend>(
    session: &mut EditorSession<B>,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let prompt = Prompt::input("image_path", "Image file").with_default("");
    let path = ui.prompt(&prompt)?.as_string();
    let path = path.trim();
    if path.is_empty() {
        return Ok(());
    }

    let pending = session.begin_image_upload();
    let job = ImageJob::spawn(path);
    let mut spinner = ui.start_spinner(&format!("Reading {}", job.path().display()));

    match job.wait() {
        Ok(data_uri) => {
            if session.complete_image_upload(pending, data_uri) {
                spinner.finish_success(&format!(
                    "Picture added to page {}",
                    pending.page_index() + 1
                ));
            } else {
                spinner.finish_error("Page is gone; picture discarded");
            }
        }
        Err(e) => spinner.finish_error(&e.to_string()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{Book, CoverColor, Page};
    use crate::store::{BookStore, MemoryBackend};
    use crate::ui::{MockUI, SpinnerStatus};
    use tempfile::TempDir;

    fn session_with(books: &[Book]) -> (EditorSession<MemoryBackend>, MemoryBackend) {
        let backend = MemoryBackend::new();
        let store = BookStore::new(backend.clone());
        store.save_all(books).unwrap();
        (EditorSession::load(store), backend)
    }

    fn reload(backend: &MemoryBackend) -> Vec<Book> {
        BookStore::new(backend.clone()).load()
    }

    #[test]
    fn action_values_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::parse(action.value()), Some(action));
        }
        assert_eq!(Action::parse("dance"), None);
    }

    #[test]
    fn quit_immediately() {
        let (mut session, backend) = session_with(&[]);
        let mut ui = MockUI::new();

        let result = run_editor(&mut session, &mut ui).unwrap();
        assert!(result.success);
        assert!(reload(&backend).is_empty());
        assert_eq!(ui.headers(), &["Storybook editor"]);
    }

    #[test]
    fn new_book_save_persists_defaults() {
        let (mut session, backend) = session_with(&[]);
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("editor_action", vec!["save"]);

        run_editor(&mut session, &mut ui).unwrap();

        let books = reload(&backend);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].cover_color, CoverColor::default());
        assert_eq!(books[0].page_count(), 1);
        assert!(books[0].pages()[0].is_blank());
        assert!(ui.has_success("Saved new book"));
    }

    #[test]
    fn write_a_two_page_book() {
        let (mut session, backend) = session_with(&[]);
        let mut ui = MockUI::new();
        ui.queue_prompt_responses(
            "editor_action",
            vec!["title", "color", "text", "next_page", "text", "save"],
        );
        ui.set_prompt_response("book_title", "  The Moon ");
        ui.set_prompt_response("cover_color", "#223344");
        ui.queue_prompt_responses("page_text", vec!["Hello moon", "Goodnight"]);

        run_editor(&mut session, &mut ui).unwrap();

        let books = reload(&backend);
        assert_eq!(books[0].title, "The Moon");
        assert_eq!(books[0].cover_color.as_str(), "#223344");
        assert_eq!(books[0].pages()[0].text, "Hello moon");
        assert_eq!(books[0].pages()[1].text, "Goodnight");
        assert!(ui.has_message("Added a new page: Page 2 of 2"));
    }

    #[test]
    fn bad_color_is_reported() {
        let (mut session, _backend) = session_with(&[]);
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("editor_action", vec!["color"]);
        ui.set_prompt_response("cover_color", "brown");

        run_editor(&mut session, &mut ui).unwrap();

        assert!(ui.has_error("brown"));
        assert_eq!(session.draft_cover_color(), &CoverColor::default());
    }

    #[test]
    fn navigation_warnings_at_bounds() {
        let (mut session, _backend) = session_with(&[Book::new().titled("Only")]);
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("editor_action", vec!["prev_book", "next_book", "prev_page"]);

        run_editor(&mut session, &mut ui).unwrap();

        assert!(ui.has_warning("first book"));
        assert!(ui.has_warning("last book"));
        assert!(ui.has_warning("first page"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut session, backend) =
            session_with(&[Book::new().titled("A"), Book::new().titled("B")]);
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("editor_action", vec!["delete_book", "delete_book"]);
        ui.queue_prompt_responses("confirm_delete", vec!["no", "yes"]);

        run_editor(&mut session, &mut ui).unwrap();

        let books = reload(&backend);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "B");
        assert!(ui.has_success("Deleted 'A'"));
    }

    #[test]
    fn delete_of_unsaved_book_is_refused() {
        let (mut session, _backend) = session_with(&[Book::new().titled("A")]);
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("editor_action", vec!["new_book", "delete_book"]);

        run_editor(&mut session, &mut ui).unwrap();

        assert!(ui.has_warning("not been saved"));
        assert!(!ui.prompts_shown().contains(&"confirm_delete".to_string()));
    }

    #[test]
    fn image_is_attached_to_page() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cat.png");
        std::fs::write(&path, b"abc").unwrap();

        let (mut session, backend) = session_with(&[]);
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("editor_action", vec!["image", "save"]);
        ui.set_prompt_response("image_path", path.to_str().unwrap());

        run_editor(&mut session, &mut ui).unwrap();

        let books = reload(&backend);
        assert_eq!(books[0].pages()[0].image, "data:image/png;base64,YWJj");
        let runs = ui.spinners();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].outcome.as_ref().map(|(s, _)| *s), Some(SpinnerStatus::Success));
    }

    #[test]
    fn unreadable_image_leaves_page_alone() {
        let (mut session, _backend) = session_with(&[]);
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("editor_action", vec!["image"]);
        ui.set_prompt_response("image_path", "/no/such/picture.png");

        run_editor(&mut session, &mut ui).unwrap();

        assert!(!session.current_page().has_image());
        let runs = ui.spinners();
        assert_eq!(runs[0].outcome.as_ref().map(|(s, _)| *s), Some(SpinnerStatus::Error));
    }

    #[test]
    fn quitting_with_changes_warns() {
        let (mut session, _backend) = session_with(&[]);
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("editor_action", vec!["add_page"]);

        run_editor(&mut session, &mut ui).unwrap();

        assert!(ui.has_warning("unsaved changes"));
    }

    #[test]
    fn unknown_action_is_skipped() {
        let (mut session, _backend) = session_with(&[]);
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("editor_action", vec!["dance"]);

        run_editor(&mut session, &mut ui).unwrap();

        assert!(ui.has_warning("Unknown action 'dance'"));
    }

    #[test]
    fn menu_offers_clear_only_with_image() {
        let (mut session, _backend) = session_with(&[Book::new()
            .with_pages(vec![Page::with_text("x").with_image("data:image/png;base64,YWJj")])]);
        let values: Vec<_> = action_menu(&session).into_iter().map(|o| o.value).collect();
        assert!(values.contains(&"clear_image".to_string()));
        assert!(values.contains(&"delete_book".to_string()));

        session.new_book();
        let values: Vec<_> = action_menu(&session).into_iter().map(|o| o.value).collect();
        assert!(!values.contains(&"clear_image".to_string()));
        assert!(!values.contains(&"delete_book".to_string()));
    }

    #[test]
    fn command_rejects_missing_book() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            data_dir: temp.path().to_path_buf(),
            ..Settings::default()
        };
        let cmd = EditCommand::new(
            &settings,
            EditArgs {
                book: Some(3),
                ..EditArgs::default()
            },
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("No book 3"));
    }
}
