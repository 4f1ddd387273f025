use crate::actions::load_and_report;
use crate::command::{ActionFactory, Choice, Prompt};
use crate::io_adapters::EditorPrompt;
use crate::session::Session;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Factory allows creating instances of ExecutableAction.
///
/// Only supports the menu actions defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Menu-driven course planner.
///
/// The planner owns a [`Session`] and a list of [`ActionFactory`] objects that
/// are queried to create an action from the number the user typed. See
/// [`Default`] for the menu included out of the box.
///
/// Example
/// ```
/// use course_planner::{Planner, ScriptedPrompt};
/// let mut planner = Planner::default();
/// let mut input = ScriptedPrompt::new(["2", "9"]);
/// let mut out = Vec::new();
/// planner.run_session(&mut input, &mut out).unwrap();
/// let out = String::from_utf8(out).unwrap();
/// assert!(out.contains("No course data loaded"));
/// ```
pub struct Planner {
    session: Session,
    actions: Vec<Box<dyn ActionFactory>>,
}

impl Planner {
    /// Create a planner with a custom set of action factories.
    pub fn new(actions: Vec<Box<dyn ActionFactory>>) -> Self {
        Self {
            session: Session::new(),
            actions,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Load a catalog file before the menu loop starts, printing the outcome.
    pub fn preload(&mut self, path: &Path, stdout: &mut dyn Write) -> Result<()> {
        load_and_report(path, stdout, &mut self.session)
    }

    /// Print the menu lines in the order the factories were registered.
    pub fn write_menu(&self, stdout: &mut dyn Write) -> Result<()> {
        writeln!(stdout)?;
        for action in &self.actions {
            writeln!(stdout, "{}. {}", action.choice(), action.label())?;
        }
        Ok(())
    }

    /// Handle one line typed at the menu prompt.
    ///
    /// The first word selects the action; any further words are passed to it as
    /// inline arguments.
    pub fn dispatch(
        &mut self,
        line: &str,
        input: &mut dyn Prompt,
        stdout: &mut dyn Write,
    ) -> Result<()> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((first, args)) = words.split_first() else {
            return Ok(());
        };

        let number: i64 = match first.parse() {
            Ok(n) => n,
            Err(_) => {
                writeln!(stdout, "Invalid input. Please enter a number.")?;
                return Ok(());
            }
        };

        let action = Choice::try_from(number).ok().and_then(|choice| {
            self.actions
                .iter()
                .find_map(|factory| factory.try_create(choice, args))
        });
        match action {
            Some(action) => {
                debug!(choice = number, "dispatching menu action");
                action.execute(input, stdout, &mut self.session)
            }
            None => {
                writeln!(stdout, "{} is not a valid option.", number)?;
                Ok(())
            }
        }
    }

    /// Run the menu loop until the user exits or input runs out.
    pub fn run_session(&mut self, input: &mut dyn Prompt, stdout: &mut dyn Write) -> Result<()> {
        writeln!(stdout, "Welcome to the course planner.")?;
        while !self.session.should_exit {
            self.write_menu(stdout)?;
            stdout.flush()?;
            let line = input
                .read_line("What would you like to do? ")
                .context("failed to read menu choice")?;
            match line {
                Some(line) => self.dispatch(&line, input, stdout)?,
                None => {
                    debug!("menu input closed");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Interactive Read-Eval-Print Loop on the terminal.
    pub fn repl(&mut self) -> Result<()> {
        let mut input = EditorPrompt::new()?;
        let mut stdout = std::io::stdout();
        self.run_session(&mut input, &mut stdout)
    }
}

impl Default for Planner {
    /// Create a planner with the standard menu:
    /// load, list, course and exit.
    fn default() -> Self {
        use crate::actions::*;
        Self::new(vec![
            Box::new(Factory::<LoadData>::default()),
            Box::new(Factory::<PrintList>::default()),
            Box::new(Factory::<PrintCourse>::default()),
            Box::new(Factory::<Exit>::default()),
        ])
    }
}
