//! Recording UI for tests.
//!
//! `MockUI` answers prompts from scripted responses and records everything
//! the editor or viewer shows, so command loops can be driven end to end
//! without a terminal.
//!
//! # Example
//!
//! ```
//! use storybook::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("book_title", "The Moon");
//!
//! let answer = ui.prompt(&Prompt::input("book_title", "Title")).unwrap();
//! assert_eq!(answer.as_string(), "The Moon");
//!
//! ui.success("Saved");
//! assert!(ui.has_success("Saved"));
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::error::Result;

use super::{
    scripted_result, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface,
};

/// How a spinner started through [`MockUI`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

/// One spinner run: its start label and how it finished, if it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinnerRecord {
    pub label: String,
    pub outcome: Option<(SpinnerStatus, String)>,
}

type SpinnerLog = Rc<RefCell<Vec<SpinnerRecord>>>;

/// Scripted, recording [`UserInterface`].
///
/// Answers come from a per-key queue first (`queue_prompt_responses`), then a
/// fixed response (`set_prompt_response`), then the prompt's own default.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: SpinnerLog,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
    offered: HashMap<String, Vec<String>>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every prompt with `key` using `response`.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Answer successive prompts with `key` from `responses`, in order.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Keys of every prompt shown, in order.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Option values of the most recent select prompt with `key`.
    pub fn offered_options(&self, key: &str) -> Option<&[String]> {
        self.offered.get(key).map(Vec::as_slice)
    }

    /// Every spinner started so far.
    pub fn spinners(&self) -> Vec<SpinnerRecord> {
        self.spinners.borrow().clone()
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        OutputMode::Normal
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());
        if let PromptType::Select { options } = &prompt.prompt_type {
            let values = options.iter().map(|o| o.value.clone()).collect();
            self.offered.insert(prompt.key.clone(), values);
        }

        let queued = self
            .prompt_queues
            .get_mut(&prompt.key)
            .and_then(|queue| queue.pop_front());

        let answer = queued
            .or_else(|| self.prompt_responses.get(&prompt.key).cloned())
            .or_else(|| prompt.default.clone())
            .unwrap_or_default();

        Ok(scripted_result(&prompt.prompt_type, &answer))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let mut log = self.spinners.borrow_mut();
        log.push(SpinnerRecord {
            label: message.to_string(),
            outcome: None,
        });
        Box::new(MockSpinner {
            log: Rc::clone(&self.spinners),
            slot: log.len() - 1,
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner handed out by [`MockUI`]; writes its outcome back to the UI's log.
#[derive(Debug)]
pub struct MockSpinner {
    log: SpinnerLog,
    slot: usize,
}

impl MockSpinner {
    fn record(&self, status: SpinnerStatus, msg: &str) {
        if let Some(entry) = self.log.borrow_mut().get_mut(self.slot) {
            entry.outcome = Some((status, msg.to_string()));
        }
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        if let Some(entry) = self.log.borrow_mut().get_mut(self.slot) {
            entry.label = msg.to_string();
        }
    }

    fn finish_success(&mut self, msg: &str) {
        self.record(SpinnerStatus::Success, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.record(SpinnerStatus::Error, msg);
    }
}
