//! Shared display helpers for books and pages.
//!
//! These helpers are used by `edit`, `read`, and `list` to render books
//! consistently. They return plain lines; callers hand them to the UI.

use crate::book::{Book, Page};
use crate::editor::EditorSession;
use crate::media::describe_data_uri;
use crate::store::KeyValueBackend;
use crate::ui::StorybookTheme;
use crate::viewer::{Spread, Theme};

/// Human-readable byte count.
pub fn format_size(bytes: usize) -> String {
    match bytes {
        b if b < 1024 => format!("{} B", b),
        b if b < 1024 * 1024 => format!("{:.1} KB", b as f64 / 1024.0),
        b => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
    }
}

/// Short description of a page image.
pub fn image_label(image: &str) -> String {
    if image.is_empty() {
        return "no image".to_string();
    }
    match describe_data_uri(image) {
        Some((mime, size)) => format!("{}, {}", mime, format_size(size)),
        None => "linked image".to_string(),
    }
}

fn page_count_label(count: usize) -> String {
    if count == 1 {
        "1 page".to_string()
    } else {
        format!("{} pages", count)
    }
}

/// One line in a book listing: number, title, cover, and length.
pub fn book_line(index: usize, book: &Book, theme: &StorybookTheme) -> String {
    format!(
        "  {}. {} {} {}",
        index + 1,
        theme.highlight.apply_to(book.display_title()),
        theme.format_swatch(&book.cover_color),
        theme.dim.apply_to(format!("· {}", page_count_label(book.page_count()))),
    )
}

/// Status block for the editor: where we are and what the page holds.
pub fn editor_status<B: KeyValueBackend>(
    session: &EditorSession<B>,
    theme: &StorybookTheme,
) -> Vec<String> {
    let book_label = if session.is_new_book() {
        format!("New book ({} saved)", session.books().len())
    } else {
        session.book_label()
    };
    let title = if session.draft_title().is_empty() {
        "(untitled)"
    } else {
        session.draft_title()
    };
    let page = session.current_page();
    let mut lines = vec![
        format!(
            "{} {} {}",
            theme.highlight.apply_to(book_label),
            theme.dim.apply_to("·"),
            title
        ),
        format!("  Cover: {}", theme.format_swatch(session.draft_cover_color())),
        format!("  {}", theme.highlight.apply_to(session.page_label())),
    ];
    lines.extend(page_body(page, theme, "    "));
    if session.has_unsaved_changes() {
        lines.push(format!("  {}", theme.warning.apply_to("Unsaved changes")));
    }
    lines
}

fn page_body(page: &Page, theme: &StorybookTheme, indent: &str) -> Vec<String> {
    let mut lines: Vec<String> = if page.text.is_empty() {
        vec![format!("{}{}", indent, theme.dim.apply_to("(no text)"))]
    } else {
        page.text
            .lines()
            .map(|line| format!("{}{}", indent, line))
            .collect()
    };
    if page.has_image() {
        lines.push(format!(
            "{}{}",
            indent,
            theme.dim.apply_to(format!("[{}]", image_label(&page.image)))
        ));
    }
    lines
}

/// The closed book.
pub fn render_cover(book: &Book, theme: &StorybookTheme, reading: Theme) -> Vec<String> {
    let page = theme.page(reading);
    vec![
        String::new(),
        format!("  {}", theme.format_swatch(&book.cover_color)),
        format!("  {}", page.apply_to(theme.highlight.apply_to(book.display_title()))),
        format!("  {}", theme.dim.apply_to(page_count_label(book.page_count()))),
        String::new(),
    ]
}

/// Two facing pages, or one at the end of the book.
pub fn render_spread(
    spread: &Spread<'_>,
    last: bool,
    theme: &StorybookTheme,
    reading: Theme,
) -> Vec<String> {
    let style = theme.page(reading);
    let mut lines = vec![String::new()];

    lines.push(format!("  {}", theme.dim.apply_to(format!("Page {}", spread.index + 1))));
    for line in page_body(spread.left, theme, "    ") {
        lines.push(format!("{}", style.apply_to(line)));
    }

    if let Some(right) = spread.right {
        lines.push(format!(
            "  {}",
            theme.dim.apply_to(format!("Page {}", spread.index + 2))
        ));
        for line in page_body(right, theme, "    ") {
            lines.push(format!("{}", style.apply_to(line)));
        }
    }

    if last {
        lines.push(String::new());
        lines.push(format!("  {}", theme.highlight.apply_to("The End")));
    }
    lines.push(String::new());
    lines
}
