use crate::catalog::CatalogError;
use crate::command::{ActionFactory, Choice, ExecutableAction, Prompt};
use crate::planner::Factory;
use crate::record::CourseRecord;
use crate::session::Session;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Menu actions known to the planner at compile time.
///
/// Inline arguments typed after the menu number are parsed with the [`argh`]
/// crate (`FromArgs`); an action prompts for anything that was not supplied.
pub(crate) trait MenuAction: Sized + FromArgs {
    /// Number the user types to select the action.
    fn choice() -> Choice;

    /// Short name used in usage messages, e.g. "load".
    fn name() -> &'static str;

    /// Text of the menu line.
    fn label() -> &'static str;

    /// Executes the action using the provided input, output and session.
    fn execute(
        self,
        input: &mut dyn Prompt,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()>;
}

impl<T: MenuAction> ExecutableAction for T {
    fn execute(
        self: Box<Self>,
        input: &mut dyn Prompt,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()> {
        match <T as MenuAction>::execute(*self, input, stdout, session) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(action = T::name(), error = %e, "menu action failed");
                writeln!(stdout, "Error: {:#}", e)?;
                Ok(())
            }
        }
    }
}

struct InvalidArgs {
    output: String,
}

impl ExecutableAction for InvalidArgs {
    fn execute(
        self: Box<Self>,
        _input: &mut dyn Prompt,
        stdout: &mut dyn Write,
        _session: &mut Session,
    ) -> Result<()> {
        writeln!(stdout, "{}", self.output.trim_end())?;
        Ok(())
    }
}

impl<T: MenuAction + 'static> ActionFactory for Factory<T> {
    fn choice(&self) -> Choice {
        T::choice()
    }

    fn label(&self) -> &'static str {
        T::label()
    }

    fn try_create(&self, choice: Choice, args: &[&str]) -> Option<Box<dyn ExecutableAction>> {
        if choice != T::choice() {
            return None;
        }
        Some(match T::from_args(&[T::name()], args) {
            Ok(action) => Box::new(action),
            Err(EarlyExit { output, .. }) => Box::new(InvalidArgs { output }),
        })
    }
}

/// Read an answer for `prompt`, ending the session when input runs out.
fn ask(input: &mut dyn Prompt, prompt: &str, session: &mut Session) -> Result<Option<String>> {
    let answer = input.read_line(prompt)?;
    if answer.is_none() {
        debug!("input closed while prompting");
        session.request_exit();
    }
    Ok(answer)
}

/// Load `path` into the session's catalog and print the outcome.
pub(crate) fn load_and_report(
    path: &Path,
    stdout: &mut dyn Write,
    session: &mut Session,
) -> Result<()> {
    match session.catalog.load_path(path) {
        Ok(report) => {
            for rejected in &report.rejected {
                writeln!(
                    stdout,
                    "Error: Invalid course entry. (line {}: {})",
                    rejected.line_number, rejected.reason
                )?;
            }
            writeln!(stdout, "Courses loaded successfully.")?;
        }
        Err(CatalogError::SourceUnavailable { .. }) => {
            writeln!(stdout, "Error: Could not open file: {}", path.display())?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn write_course(stdout: &mut dyn Write, course: &CourseRecord) -> Result<()> {
    writeln!(stdout, "{}", course)?;
    if course.prerequisites().is_empty() {
        writeln!(stdout, "Prerequisites: None")?;
    } else {
        writeln!(stdout, "Prerequisites: {}", course.prerequisites().join(" "))?;
    }
    Ok(())
}

#[derive(FromArgs)]
/// Load course data from a comma-separated file into the catalog.
pub struct LoadData {
    #[argh(positional, greedy)]
    /// file to load. Prompted for when omitted.
    pub path: Vec<String>,
}

impl MenuAction for LoadData {
    fn choice() -> Choice {
        1
    }

    fn name() -> &'static str {
        "load"
    }

    fn label() -> &'static str {
        "Load Data Structure."
    }

    fn execute(
        self,
        input: &mut dyn Prompt,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()> {
        let path = if self.path.is_empty() {
            match ask(input, "Enter file name to load: ", session)? {
                Some(path) => path,
                None => return Ok(()),
            }
        } else {
            self.path.join(" ")
        };
        load_and_report(Path::new(path.trim()), stdout, session)
    }
}

#[derive(FromArgs)]
/// Print every loaded course ordered by course number.
pub struct PrintList {}

impl MenuAction for PrintList {
    fn choice() -> Choice {
        2
    }

    fn name() -> &'static str {
        "list"
    }

    fn label() -> &'static str {
        "Print Course List."
    }

    fn execute(
        self,
        _input: &mut dyn Prompt,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()> {
        match session.catalog.list_sorted() {
            Ok(courses) => {
                writeln!(stdout, "\nHere is a sample schedule:")?;
                for course in courses {
                    writeln!(stdout, "{}", course)?;
                }
            }
            Err(CatalogError::EmptyCatalog) => {
                writeln!(stdout, "Error: No course data loaded. Please load data first.")?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// Print one course with its prerequisites.
pub struct PrintCourse {
    #[argh(positional)]
    /// course number, any case. Prompted for when omitted.
    pub course: Option<String>,
}

impl MenuAction for PrintCourse {
    fn choice() -> Choice {
        3
    }

    fn name() -> &'static str {
        "course"
    }

    fn label() -> &'static str {
        "Print Course."
    }

    fn execute(
        self,
        input: &mut dyn Prompt,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()> {
        let query = match self.course {
            Some(course) => course,
            None => match ask(input, "What course do you want to know about? ", session)? {
                Some(course) => course,
                None => return Ok(()),
            },
        };
        match session.catalog.lookup(query.trim()) {
            Some(course) => write_course(stdout, course),
            None => {
                writeln!(stdout, "Course not found.")?;
                Ok(())
            }
        }
    }
}

#[derive(FromArgs)]
/// Leave the course planner.
pub struct Exit {}

impl MenuAction for Exit {
    fn choice() -> Choice {
        9
    }

    fn name() -> &'static str {
        "exit"
    }

    fn label() -> &'static str {
        "Exit"
    }

    fn execute(
        self,
        _input: &mut dyn Prompt,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<()> {
        writeln!(stdout, "Thank you for using the course planner!")?;
        session.request_exit();
        Ok(())
    }
}
