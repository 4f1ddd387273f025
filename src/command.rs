use crate::session::Session;
use anyhow::Result;
use std::io::Write;

/// Numeric menu choice as typed by the user.
pub type Choice = u32;

/// Source of user input lines.
///
/// Implementors typically wrap an interactive line editor; tests use a scripted
/// queue of lines (see [`crate::ScriptedPrompt`]).
pub trait Prompt {
    /// Show `prompt` and read one line without its terminator.
    ///
    /// Returns `Ok(None)` once input is exhausted or the user interrupts.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Object-safe trait for any menu action that can be executed by the planner.
///
/// This is implemented by the built-in menu actions via a blanket impl.
pub trait ExecutableAction {
    /// Executes the action.
    fn execute(
        self: Box<Self>,
        input: &mut dyn Prompt,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()>;
}

/// Factory that tries to create an action from a menu choice and its inline arguments.
///
/// Returns `None` when the factory doesn't own `choice`.
pub trait ActionFactory {
    /// The number the user types to select this action.
    fn choice(&self) -> Choice;

    /// Menu line text, e.g. "Print Course List.".
    fn label(&self) -> &'static str;

    /// Attempt to create an action instance for the provided choice and arguments.
    fn try_create(&self, choice: Choice, args: &[&str]) -> Option<Box<dyn ExecutableAction>>;
}
