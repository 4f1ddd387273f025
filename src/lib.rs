//! A small interactive course planner.
//!
//! Course data is read from a comma-separated text file, one course per line
//! (`number,title[,prerequisite...]`), into a [`Catalog`] keyed by the course
//! number in uppercase. The catalog can then list every course in order or show
//! a single course with its prerequisites.
//!
//! The menu-driven front end is [`Planner`], which dispatches numbered choices
//! to pluggable actions. The [`record`] and [`catalog`] modules can be used on
//! their own without the menu.

mod actions;
pub mod catalog;
pub mod command;
mod io_adapters;
pub mod logging;
mod planner;
pub mod record;
pub mod session;

pub use catalog::{Catalog, CatalogError, CatalogState, LoadReport, RejectedLine};
pub use io_adapters::{EditorPrompt, ScriptedPrompt};
pub use record::{CourseRecord, RejectionReason, normalize, parse_record};

/// Just a convenient re-export of the interactive menu runner.
///
/// See [`Planner`] for the high-level API and examples.
pub use planner::Planner;
