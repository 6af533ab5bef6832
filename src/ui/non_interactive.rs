//! Non-interactive UI for scripted and headless runs.
//!
//! Prompt answers come from `STORYBOOK_PROMPT_<KEY>` environment variables.
//! For select prompts the value is a comma-separated list consumed one entry
//! per prompt, so a whole editing session can be scripted:
//!
//! ```text
//! STORYBOOK_PROMPT_EDITOR_ACTION=title,save,quit
//! STORYBOOK_PROMPT_BOOK_TITLE="The Moon"
//! ```
//!
//! Once a list runs out, or when no variable is set, the prompt's default is
//! used.

use std::collections::HashMap;

use crate::error::{Result, StorybookError};

use super::{
    scripted_result, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface,
};

const ENV_PREFIX: &str = "STORYBOOK_PROMPT_";

/// UI implementation for non-interactive mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
    consumed: HashMap<String, usize>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI reading answers from the environment.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
            consumed: HashMap::new(),
        }
    }

    fn scripted_answer(&mut self, prompt: &Prompt) -> Option<String> {
        let env_key = format!("{}{}", ENV_PREFIX, prompt.key.to_uppercase());
        let value = self.env_overrides.get(&env_key)?;

        if !matches!(prompt.prompt_type, PromptType::Select { .. }) {
            return Some(value.clone());
        }

        let position = self.consumed.entry(env_key).or_insert(0);
        let answer = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .nth(*position)?;
        *position += 1;
        Some(answer.to_string())
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        if let Some(answer) = self.scripted_answer(prompt) {
            tracing::debug!("Scripted answer for '{}': {}", prompt.key, answer);
            return Ok(scripted_result(&prompt.prompt_type, &answer));
        }

        if let Some(default) = &prompt.default {
            return Ok(scripted_result(&prompt.prompt_type, default));
        }

        Err(StorybookError::PromptUnavailable {
            key: prompt.key.clone(),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints only its final line.
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }
}
