use crate::command::Prompt;
use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::collections::VecDeque;

/// Interactive input backed by a `rustyline` editor with history.
pub struct EditorPrompt {
    editor: DefaultEditor,
}

impl EditorPrompt {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new().context("failed to start line editor")?,
        })
    }
}

impl Prompt for EditorPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Memory-backed input that replays a fixed list of lines.
///
/// Every prompt shown is kept so callers can check what was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    lines: VecDeque<String>,
    shown: Vec<String>,
}

impl ScriptedPrompt {
    /// Create a prompt that answers with `lines`, in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            shown: Vec::new(),
        }
    }

    /// Prompts shown so far.
    pub fn shown(&self) -> &[String] {
        &self.shown
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.shown.push(prompt.to_owned());
        Ok(self.lines.pop_front())
    }
}
