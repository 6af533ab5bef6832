//! Visual theme and styling.

use console::Style;

use crate::book::CoverColor;
use crate::viewer::Theme;

/// Storybook's visual theme.
#[derive(Debug, Clone)]
pub struct StorybookTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (yellow bold).
    pub header: Style,
    /// Page text on the light reading theme.
    pub page_light: Style,
    /// Page text on the dark reading theme.
    pub page_dark: Style,
    /// Whether cover swatches are colored.
    colored: bool,
}

impl Default for StorybookTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl StorybookTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().yellow(),
            page_light: Style::new().black().on_white(),
            page_dark: Style::new().white().on_black(),
            colored: true,
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            page_light: Style::new(),
            page_dark: Style::new(),
            colored: false,
        }
    }

    /// Colored theme or plain theme.
    pub fn for_colors(colors: bool) -> Self {
        if colors {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Page style for a reading theme.
    pub fn page(&self, theme: Theme) -> &Style {
        match theme {
            Theme::Light => &self.page_light,
            Theme::Dark => &self.page_dark,
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("📖"),
            self.highlight.apply_to(title)
        )
    }

    /// A small block in the cover color, followed by its hex value.
    pub fn format_swatch(&self, color: &CoverColor) -> String {
        match (self.colored, color.rgb()) {
            (true, Some((r, g, b))) => format!(
                "{} {}",
                Style::new().color256(ansi256(r, g, b)).apply_to("■■"),
                color
            ),
            _ => format!("[{}]", color),
        }
    }
}

/// Nearest entry in the 6x6x6 ANSI color cube.
fn ansi256(r: u8, g: u8, b: u8) -> u8 {
    let level = |c: u8| ((c as u16 * 5 + 127) / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
