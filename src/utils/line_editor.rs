//! Single-line raw-mode terminal editor used by the chat prompt and the wizard.

use crate::utils::input::sanitize_text_input;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::fmt;
use std::io::{self, Write};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEditorState {
    pub text: String,
    pub cursor: usize,
}

impl LineEditorState {
    pub fn with_text(text: String) -> Self {
        let cursor = text.chars().count();
        Self { text, cursor }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineEditorOptions {
    pub initial_text: String,
    /// Dim hint shown while the line is empty.
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEditAction {
    Insert(char),
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveStart,
    MoveEnd,
    DeleteToEnd,
    DeleteWord,
    ClearAll,
    Paste(String),
    Submit,
    Interrupt,
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEditOutcome {
    Continue { redraw: bool },
    Submit(String),
    Interrupted,
    EndOfInput,
}

#[derive(Debug, Clone)]
pub struct LineEditorError {
    message: String,
}

impl LineEditorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for LineEditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LineEditorError {}

/// Read one line in raw mode. Returns the terminal outcome: a submitted line,
/// an interrupt (Ctrl+C) or end of input (Ctrl+D on an empty line).
pub fn prompt_line_editor(
    prompt: &str,
    options: &LineEditorOptions,
) -> Result<LineEditOutcome, LineEditorError> {
    enable_raw_mode().map_err(|err| LineEditorError::new(err.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, event::EnableBracketedPaste)
        .map_err(|err| LineEditorError::new(err.to_string()))?;

    let result = (|| -> Result<LineEditOutcome, LineEditorError> {
        let mut state = LineEditorState::with_text(options.initial_text.clone());
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                redraw_line(prompt, &state, options)
                    .map_err(|err| LineEditorError::new(err.to_string()))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|err| LineEditorError::new(err.to_string()))?
            {
                continue;
            }

            let action = match event::read().map_err(|err| LineEditorError::new(err.to_string()))? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    map_key_event_to_action(&key, &state)
                }
                Event::Paste(text) => Some(LineEditAction::Paste(sanitize_text_input(&text))),
                _ => None,
            };

            if let Some(action) = action {
                match apply_line_edit_action(&mut state, action) {
                    LineEditOutcome::Continue { redraw } => needs_redraw = redraw,
                    outcome => break Ok(outcome),
                }
            }
        }
    })();

    let disable_raw_result =
        disable_raw_mode().map_err(|err| LineEditorError::new(err.to_string()));
    let disable_paste_result = execute!(stdout, event::DisableBracketedPaste)
        .map_err(|err| LineEditorError::new(err.to_string()));
    println!();

    let mut final_result = result;
    if let Err(err) = disable_raw_result {
        if final_result.is_ok() {
            final_result = Err(err);
        }
    }
    if let Err(err) = disable_paste_result {
        if final_result.is_ok() {
            final_result = Err(err);
        }
    }
    final_result
}

fn redraw_line(prompt: &str, state: &LineEditorState, options: &LineEditorOptions) -> io::Result<()> {
    let prompt_width = UnicodeWidthStr::width(prompt);

    match (&options.placeholder, state.text.is_empty()) {
        (Some(placeholder), true) => {
            print!("\r\x1b[K{prompt}\x1b[2m{placeholder}\x1b[0m");
        }
        _ => {
            print!("\r\x1b[K{}{}", prompt, state.text);
        }
    }

    let prefix: String = state.text.chars().take(state.cursor).collect();
    let cursor_columns = prompt_width + UnicodeWidthStr::width(prefix.as_str());
    if cursor_columns > 0 {
        print!("\r\x1b[{cursor_columns}C");
    } else {
        print!("\r");
    }

    io::stdout().flush()
}

pub fn map_key_event_to_action(key: &event::KeyEvent, state: &LineEditorState) -> Option<LineEditAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => Some(LineEditAction::Submit),
        KeyCode::Backspace => Some(LineEditAction::Backspace),
        KeyCode::Delete => Some(LineEditAction::Delete),
        KeyCode::Left => Some(LineEditAction::MoveLeft),
        KeyCode::Right => Some(LineEditAction::MoveRight),
        KeyCode::Home => Some(LineEditAction::MoveStart),
        KeyCode::End => Some(LineEditAction::MoveEnd),
        KeyCode::Char('c') if ctrl => Some(LineEditAction::Interrupt),
        KeyCode::Char('d') if ctrl => {
            if state.text.is_empty() {
                Some(LineEditAction::EndOfInput)
            } else {
                Some(LineEditAction::Delete)
            }
        }
        KeyCode::Char('a') if ctrl => Some(LineEditAction::MoveStart),
        KeyCode::Char('e') if ctrl => Some(LineEditAction::MoveEnd),
        KeyCode::Char('k') if ctrl => Some(LineEditAction::DeleteToEnd),
        KeyCode::Char('w') if ctrl => Some(LineEditAction::DeleteWord),
        KeyCode::Char('u') if ctrl => Some(LineEditAction::ClearAll),
        KeyCode::Char(c) if !ctrl => {
            if c == '\n' || c == '\r' {
                Some(LineEditAction::Submit)
            } else {
                Some(LineEditAction::Insert(c))
            }
        }
        _ => None,
    }
}

pub fn apply_line_edit_action(state: &mut LineEditorState, action: LineEditAction) -> LineEditOutcome {
    match action {
        LineEditAction::Insert(c) => {
            insert_char_at_cursor(&mut state.text, state.cursor, c);
            state.cursor += 1;
            LineEditOutcome::Continue { redraw: true }
        }
        LineEditAction::Backspace => {
            if remove_char_before_cursor(&mut state.text, state.cursor) {
                state.cursor -= 1;
                LineEditOutcome::Continue { redraw: true }
            } else {
                LineEditOutcome::Continue { redraw: false }
            }
        }
        LineEditAction::Delete => LineEditOutcome::Continue {
            redraw: remove_char_at_cursor(&mut state.text, state.cursor),
        },
        LineEditAction::MoveLeft => {
            if state.cursor > 0 {
                state.cursor -= 1;
                LineEditOutcome::Continue { redraw: true }
            } else {
                LineEditOutcome::Continue { redraw: false }
            }
        }
        LineEditAction::MoveRight => {
            if state.cursor < state.text.chars().count() {
                state.cursor += 1;
                LineEditOutcome::Continue { redraw: true }
            } else {
                LineEditOutcome::Continue { redraw: false }
            }
        }
        LineEditAction::MoveStart => {
            let moved = state.cursor != 0;
            state.cursor = 0;
            LineEditOutcome::Continue { redraw: moved }
        }
        LineEditAction::MoveEnd => {
            let end = state.text.chars().count();
            let moved = state.cursor != end;
            state.cursor = end;
            LineEditOutcome::Continue { redraw: moved }
        }
        LineEditAction::DeleteToEnd => {
            let byte_idx = char_to_byte_index(&state.text, state.cursor);
            if byte_idx >= state.text.len() {
                LineEditOutcome::Continue { redraw: false }
            } else {
                state.text.truncate(byte_idx);
                LineEditOutcome::Continue { redraw: true }
            }
        }
        LineEditAction::DeleteWord => {
            if state.cursor == 0 {
                LineEditOutcome::Continue { redraw: false }
            } else {
                state.cursor = delete_word_before_cursor(&mut state.text, state.cursor);
                LineEditOutcome::Continue { redraw: true }
            }
        }
        LineEditAction::ClearAll => {
            if state.text.is_empty() {
                LineEditOutcome::Continue { redraw: false }
            } else {
                state.text.clear();
                state.cursor = 0;
                LineEditOutcome::Continue { redraw: true }
            }
        }
        LineEditAction::Paste(text) => {
            let before_newline = text.split('\n').next().unwrap_or("");
            if !before_newline.is_empty() {
                insert_str_at_cursor(&mut state.text, state.cursor, before_newline);
                state.cursor += before_newline.chars().count();
            }
            if text.contains('\n') {
                LineEditOutcome::Submit(state.text.clone())
            } else {
                LineEditOutcome::Continue {
                    redraw: !before_newline.is_empty(),
                }
            }
        }
        LineEditAction::Submit => LineEditOutcome::Submit(state.text.clone()),
        LineEditAction::Interrupt => LineEditOutcome::Interrupted,
        LineEditAction::EndOfInput => LineEditOutcome::EndOfInput,
    }
}

fn insert_char_at_cursor(input: &mut String, cursor: usize, c: char) {
    let byte_idx = char_to_byte_index(input, cursor);
    input.insert(byte_idx, c);
}

fn insert_str_at_cursor(input: &mut String, cursor: usize, text: &str) {
    let byte_idx = char_to_byte_index(input, cursor);
    input.insert_str(byte_idx, text);
}

fn remove_char_before_cursor(input: &mut String, cursor: usize) -> bool {
    if cursor == 0 {
        return false;
    }
    let end = char_to_byte_index(input, cursor);
    let start = char_to_byte_index(input, cursor - 1);
    input.replace_range(start..end, "");
    true
}

fn remove_char_at_cursor(input: &mut String, cursor: usize) -> bool {
    let start = char_to_byte_index(input, cursor);
    if start >= input.len() {
        return false;
    }
    let end = char_to_byte_index(input, cursor + 1);
    input.replace_range(start..end, "");
    true
}

fn delete_word_before_cursor(input: &mut String, cursor: usize) -> usize {
    let mut chars: Vec<char> = input.chars().collect();
    let mut idx = cursor.min(chars.len());
    while idx > 0 && chars[idx - 1] == ' ' {
        idx -= 1;
    }
    while idx > 0 && chars[idx - 1] != ' ' {
        idx -= 1;
    }
    chars.drain(idx..cursor.min(chars.len()));
    *input = chars.into_iter().collect();
    idx
}

fn char_to_byte_index(input: &str, char_index: usize) -> usize {
    input
        .char_indices()
        .nth(char_index)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn insert_and_move_cursor() {
        let mut state = LineEditorState::with_text(String::new());
        assert_eq!(
            apply_line_edit_action(&mut state, LineEditAction::Insert('a')),
            LineEditOutcome::Continue { redraw: true }
        );
        apply_line_edit_action(&mut state, LineEditAction::MoveLeft);
        apply_line_edit_action(&mut state, LineEditAction::Insert('b'));
        assert_eq!(state.text, "ba");
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn delete_word_stops_at_previous_space() {
        let mut state = LineEditorState::with_text("build a journey".to_string());
        apply_line_edit_action(&mut state, LineEditAction::DeleteWord);
        assert_eq!(state.text, "build a ");
        assert_eq!(state.cursor, 8);
    }

    #[test]
    fn paste_with_newline_submits_first_line() {
        let mut state = LineEditorState::with_text("zip ".to_string());
        let outcome =
            apply_line_edit_action(&mut state, LineEditAction::Paste("10023\n10024".to_string()));
        assert_eq!(outcome, LineEditOutcome::Submit("zip 10023".to_string()));
    }

    #[test]
    fn ctrl_c_interrupts_and_ctrl_d_ends_only_on_empty_line() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);

        let empty = LineEditorState::with_text(String::new());
        assert_eq!(
            map_key_event_to_action(&ctrl_c, &empty),
            Some(LineEditAction::Interrupt)
        );
        assert_eq!(
            map_key_event_to_action(&ctrl_d, &empty),
            Some(LineEditAction::EndOfInput)
        );

        let typed = LineEditorState::with_text("hi".to_string());
        assert_eq!(
            map_key_event_to_action(&ctrl_d, &typed),
            Some(LineEditAction::Delete)
        );
    }

    #[test]
    fn multibyte_text_edits_by_char() {
        let mut state = LineEditorState::with_text("café".to_string());
        apply_line_edit_action(&mut state, LineEditAction::Backspace);
        assert_eq!(state.text, "caf");
        assert_eq!(state.cursor, 3);
    }
}
