//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Storybook - make picture books and read them.
#[derive(Debug, Parser)]
#[command(name = "storybook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides <config dir>/storybook/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the library (overrides the settings file)
    #[arg(long, global = true, env = "STORYBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create and edit books (default if no command specified)
    Edit(EditArgs),

    /// Read books
    Read(ReadArgs),

    /// List saved books
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Commands {
    /// Whether this command asks questions and should get a terminal UI.
    pub fn wants_terminal(&self) -> bool {
        match self {
            Self::Edit(args) => !args.non_interactive,
            Self::Read(args) => !args.non_interactive,
            Self::List(_) | Self::Completions(_) => false,
        }
    }
}

/// Arguments for the `edit` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EditArgs {
    /// Start on this book (1-based)
    #[arg(short, long, value_name = "N")]
    pub book: Option<usize>,

    /// Start with a new, unsaved book
    #[arg(long, conflicts_with = "book")]
    pub new: bool,

    /// Take answers from STORYBOOK_PROMPT_* variables and defaults
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `read` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ReadArgs {
    /// Open this book right away (1-based)
    #[arg(short, long, value_name = "N")]
    pub book: Option<usize>,

    /// Start in dark mode
    #[arg(long)]
    pub dark: bool,

    /// Take answers from STORYBOOK_PROMPT_* variables and defaults
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Print the library summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
