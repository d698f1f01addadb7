//! Input resolution for the console client.
//!
//! One terminal read per call: either a line of free text or, when the
//! previous reply carried choices, a selection from those choices.

use std::io;

use dialoguer::Select;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::{Error, Result};
use crate::types::PendingSelection;

/// Prompt shown when reading free text.
const FREE_TEXT_PROMPT: &str = "Your input -> ";

/// Obtains the next user input.
///
/// `read` blocks for exactly one terminal interaction. `Ok(None)` means the
/// session produced no more input (end of input, or the user backed out of a
/// selection); it is not an error.
pub trait InputSource {
    /// Reads the next input.
    ///
    /// With a pending selection, the ordered choices are presented and the
    /// chosen entry's payload is returned. Without one, a line of free text
    /// is read and returned trimmed.
    fn read(&mut self, pending: Option<&PendingSelection>) -> Result<Option<String>>;
}

/// Terminal-backed input source.
///
/// Free text goes through rustyline (with history); selections go through a
/// dialoguer select menu.
pub struct TerminalInput {
    editor: DefaultEditor,
    use_color: bool,
}

impl TerminalInput {
    /// Creates a new terminal input source.
    pub fn new(use_color: bool) -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| {
            Error::io("failed to initialize line editor", io::Error::other(e))
        })?;
        Ok(Self { editor, use_color })
    }

    fn read_free_text(&mut self) -> Result<Option<String>> {
        match self.editor.readline(FREE_TEXT_PROMPT) {
            Ok(line) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    let _ = self.editor.add_history_entry(&line);
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(Error::io("failed to read input", io::Error::other(err))),
        }
    }

    fn read_selection(&mut self, pending: &PendingSelection) -> Result<Option<String>> {
        let labels: Vec<&str> = pending.choices.iter().map(|c| c.label.as_str()).collect();
        // The theme has to outlive the Select borrowing it.
        let colorful = ColorfulTheme::default();
        let theme: &dyn Theme = if self.use_color { &colorful } else { &SimpleTheme };
        let selection = Select::with_theme(theme)
            .with_prompt(&pending.prompt)
            .items(&labels)
            .default(0)
            .interact_opt();

        match selection {
            Ok(Some(idx)) => Ok(Some(pending.choices[idx].payload.clone())),
            Ok(None) => Ok(None),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(dialoguer::Error::IO(e)) => Err(Error::io("failed to read selection", e)),
        }
    }
}

impl InputSource for TerminalInput {
    fn read(&mut self, pending: Option<&PendingSelection>) -> Result<Option<String>> {
        match pending {
            Some(pending) if !pending.choices.is_empty() => self.read_selection(pending),
            _ => self.read_free_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructs_with_and_without_color() {
        assert!(TerminalInput::new(true).is_ok());
        assert!(TerminalInput::new(false).is_ok());
    }
}
