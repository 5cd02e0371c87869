//! Line input for the chat loop and the wizard.
//!
//! Interactive terminals go through the raw-mode line editor so Ctrl+C and
//! Ctrl+D are observed at the prompt boundary; piped stdin is read line by
//! line.

use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::utils::line_editor::{prompt_line_editor, LineEditOutcome, LineEditorOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Line(String),
    EndOfInput,
    Interrupted,
}

#[derive(Debug)]
pub struct PromptError {
    message: String,
}

impl PromptError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PromptError {}

impl From<io::Error> for PromptError {
    fn from(err: io::Error) -> Self {
        PromptError::new(err.to_string())
    }
}

pub trait Prompter {
    fn read_line(&mut self, prompt: &str, placeholder: Option<&str>) -> Result<PromptInput, PromptError>;
}

#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str, placeholder: Option<&str>) -> Result<PromptInput, PromptError> {
        if io::stdin().is_terminal() && io::stdout().is_terminal() {
            let options = LineEditorOptions {
                initial_text: String::new(),
                placeholder: placeholder.map(str::to_string),
            };
            let outcome = prompt_line_editor(prompt, &options)
                .map_err(|err| PromptError::new(err.to_string()))?;
            return Ok(match outcome {
                LineEditOutcome::Submit(line) => PromptInput::Line(line),
                LineEditOutcome::Interrupted => PromptInput::Interrupted,
                LineEditOutcome::EndOfInput | LineEditOutcome::Continue { .. } => {
                    PromptInput::EndOfInput
                }
            });
        }

        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(PromptInput::EndOfInput);
        }
        Ok(PromptInput::Line(
            line.trim_end_matches(['\n', '\r']).to_string(),
        ))
    }
}
