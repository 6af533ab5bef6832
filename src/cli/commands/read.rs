//! Read command implementation.
//!
//! The `storybook read` command is the child-side viewer. It shows the
//! library shelf, opens a book at its cover, and turns pages one spread at a
//! time. Each turn waits out the page-turn delay before the next spread is
//! shown.

use std::time::Instant;

use crate::cli::args::ReadArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::ui::{Prompt, PromptOption, StorybookTheme, UserInterface};
use crate::viewer::{Theme, TurnDirection, TurnOutcome, TurnRejection, View, ViewerSession};

use super::dispatcher::{Command, CommandResult};
use super::display::{book_line, render_cover, render_spread};

/// The read command implementation.
pub struct ReadCommand {
    settings: Settings,
    args: ReadArgs,
}

impl ReadCommand {
    /// Create a new read command.
    pub fn new(settings: &Settings, args: ReadArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ReadArgs {
        &self.args
    }
}

impl Command for ReadCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut options = self.settings.viewer_options();
        if self.args.dark {
            options.theme = Theme::Dark;
        }
        let mut viewer = ViewerSession::load(&self.settings.open_store(), options);

        if let Some(n) = self.args.book {
            if n == 0 || viewer.select_book(n - 1).is_err() {
                ui.error(&format!(
                    "No book {} (library has {})",
                    n,
                    viewer.books().len()
                ));
                return Ok(CommandResult::failure(2));
            }
        }

        run_viewer(&mut viewer, ui)
    }
}

/// Run the reading loop until the user leaves the library.
pub fn run_viewer(viewer: &mut ViewerSession, ui: &mut dyn UserInterface) -> Result<CommandResult> {
    let theme = StorybookTheme::for_colors(ui.uses_colors());
    ui.show_header("My Library");

    loop {
        let keep_going = if viewer.current_book().is_some() {
            reading_step(viewer, ui, &theme)?;
            true
        } else {
            library_step(viewer, ui, &theme)?
        };
        if !keep_going {
            return Ok(CommandResult::success());
        }
    }
}

/// Show the shelf and let the reader pick. Returns `false` to leave.
fn library_step(
    viewer: &mut ViewerSession,
    ui: &mut dyn UserInterface,
    theme: &StorybookTheme,
) -> Result<bool> {
    if viewer.books().is_empty() {
        ui.message("No books yet. Ask a grown-up to make one!");
        return Ok(false);
    }

    let mut options = Vec::with_capacity(viewer.books().len() + 2);
    for (i, book) in viewer.books().iter().enumerate() {
        ui.message(&book_line(i, book, theme));
        options.push(PromptOption::new(
            (i + 1).to_string(),
            book.display_title().to_string(),
        ));
    }
    options.push(PromptOption::new("theme", theme_toggle_label(viewer.theme())));
    options.push(PromptOption::new("quit", "Quit"));

    let prompt = Prompt::select("library_choice", "Pick a book", options).with_default("quit");
    let answer = ui.prompt(&prompt)?.as_string();

    match answer.as_str() {
        "quit" => Ok(false),
        "theme" => {
            viewer.toggle_theme();
            Ok(true)
        }
        other => {
            let picked = other
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(|i| viewer.select_book(i));
            match picked {
                Some(Ok(())) => {}
                _ => ui.warning(&format!("No book '{}'", other)),
            }
            Ok(true)
        }
    }
}

fn theme_toggle_label(theme: Theme) -> &'static str {
    if theme.is_dark() {
        "Light mode"
    } else {
        "Dark mode"
    }
}

/// Show the open book and handle one reader action.
fn reading_step(
    viewer: &mut ViewerSession,
    ui: &mut dyn UserInterface,
    theme: &StorybookTheme,
) -> Result<()> {
    let lines = match viewer.view() {
        View::Cover(book) => render_cover(book, theme, viewer.theme()),
        View::Pages { spread, last, .. } => render_spread(&spread, last, theme, viewer.theme()),
        View::Library(_) => Vec::new(),
    };
    for line in lines {
        ui.message(&line);
    }

    let mut options = Vec::new();
    if viewer.can_turn_forward() {
        options.push(PromptOption::new("next", "Next ▶"));
    }
    if viewer.can_turn_backward() {
        options.push(PromptOption::new("prev", "◀ Back"));
    }
    options.push(PromptOption::new("theme", theme_toggle_label(viewer.theme())));
    options.push(PromptOption::new("close", "Back to library"));

    let prompt = Prompt::select("viewer_action", "Turn the page", options).with_default("close");
    let answer = ui.prompt(&prompt)?.as_string();

    match answer.as_str() {
        "next" => turn(viewer, TurnDirection::Forward, ui),
        "prev" => turn(viewer, TurnDirection::Backward, ui),
        "theme" => {
            viewer.toggle_theme();
        }
        "close" => viewer.close_book(),
        other => ui.warning(&format!("Unknown action '{}'", other)),
    }
    Ok(())
}

/// Start a turn, wait out the animation, and land on the next spread.
fn turn(viewer: &mut ViewerSession, direction: TurnDirection, ui: &mut dyn UserInterface) {
    match viewer.turn(direction, Instant::now()) {
        TurnOutcome::Started => {
            std::thread::sleep(viewer.page_turn_delay());
            if !viewer.tick(Instant::now()) {
                viewer.settle();
            }
        }
        TurnOutcome::Rejected(TurnRejection::AtEnd) => ui.message("That was the last page."),
        TurnOutcome::Rejected(TurnRejection::AtCover) => ui.message("This is the cover."),
        TurnOutcome::Rejected(reason) => {
            tracing::debug!("Turn ignored: {:?}", reason);
        }
    }
}
