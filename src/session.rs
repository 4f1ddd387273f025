use crate::catalog::Catalog;

/// Mutable state shared by the menu actions of one planner run.
///
/// The session contains:
/// - `catalog`: the courses loaded so far.
/// - `should_exit`: a flag the menu loop checks to know when to terminate.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub catalog: Catalog,
    pub should_exit: bool,
}

impl Session {
    /// Start a session with an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the menu loop to stop after the current action.
    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }
}
