//! Interactive prompts
//!
//! Commands receive a `Prompt` so they can be driven by a scripted fake in tests.

use crate::error::PromptError;
use colored::Colorize;
use dialoguer::Input;
use std::io;

/// Extra presentation for [`Prompt::ask`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AskOptions<'a> {
    /// Returned when the answer is empty; also pre-filled in the terminal
    pub default_value: Option<&'a str>,
    /// Shown dimmed after the question
    pub hint: Option<&'a str>,
}

impl<'a> AskOptions<'a> {
    pub fn hint(hint: &'a str) -> Self {
        Self {
            hint: Some(hint),
            ..Default::default()
        }
    }

    pub fn default_value(value: &'a str) -> Self {
        Self {
            default_value: Some(value),
            ..Default::default()
        }
    }
}

/// Source of user answers
pub trait Prompt {
    /// Ask for free text; the answer is trimmed and falls back to the default when empty
    fn ask(&mut self, question: &str, options: AskOptions<'_>) -> Result<String, PromptError>;

    /// Ask a yes/no question; only `y` (any case) counts as yes
    fn confirm(&mut self, question: &str) -> Result<bool, PromptError>;
}

/// Trim an answer and apply the default
pub fn normalize_answer(answer: &str, default_value: Option<&str>) -> String {
    match answer.trim() {
        "" => default_value.unwrap_or_default().to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// True iff the answer is `y` ignoring case
pub fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y")
}

fn map_dialoguer_err(e: dialoguer::Error) -> PromptError {
    let e: io::Error = e.into();
    match e.kind() {
        io::ErrorKind::Interrupted => PromptError::Cancelled,
        _ => PromptError::Io(e),
    }
}

/// Prompt reading from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompt {
    color: bool,
}

impl TerminalPrompt {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn label(&self, question: &str, suffix: Option<&str>) -> String {
        match (suffix, self.color) {
            (Some(suffix), true) => format!("{} {}", question.cyan(), format!("({})", suffix).dimmed()),
            (Some(suffix), false) => format!("{} ({})", question, suffix),
            (None, true) => question.cyan().to_string(),
            (None, false) => question.to_string(),
        }
    }

    fn read_line(&self, label: String, initial: Option<&str>) -> Result<String, PromptError> {
        let mut input = Input::<String>::new().with_prompt(label).allow_empty(true);
        if let Some(initial) = initial {
            input = input.with_initial_text(initial);
        }
        input.interact_text().map_err(map_dialoguer_err)
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, question: &str, options: AskOptions<'_>) -> Result<String, PromptError> {
        let answer = self.read_line(self.label(question, options.hint), options.default_value)?;
        Ok(normalize_answer(&answer, options.default_value))
    }

    fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        let answer = self.read_line(self.label(question, Some("y/n")), None)?;
        Ok(is_yes(&answer))
    }
}
