//! Parsing of a single catalog line into a [`CourseRecord`].
//!
//! A line has the shape `number,title[,prerequisite...]`. Fields are separated by
//! a bare comma; there is no quoting, so a comma can never be part of a title.

use std::fmt;
use thiserror::Error;

/// Field separator of the catalog format.
pub const FIELD_SEPARATOR: char = ',';

/// Map a course number to its canonical (ASCII uppercase) form.
///
/// Every identifier is passed through this function before it is stored or
/// compared, which is what makes lookups case-insensitive. Non-ASCII characters
/// are left as they are.
pub fn normalize(identifier: &str) -> String {
    identifier.to_ascii_uppercase()
}

/// One entry of the course catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    identifier: String,
    title: String,
    prerequisites: Vec<String>,
}

impl CourseRecord {
    /// Build a record, normalizing the identifier and every prerequisite.
    ///
    /// The title is kept verbatim.
    pub fn new<I, S>(identifier: &str, title: impl Into<String>, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            identifier: normalize(identifier),
            title: title.into(),
            prerequisites: prerequisites
                .into_iter()
                .map(|p| normalize(p.as_ref()))
                .collect(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Prerequisite identifiers in the order they appeared in the source line.
    ///
    /// These may name courses that are not present in the catalog.
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }
}

impl fmt::Display for CourseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.identifier, self.title)
    }
}

/// Why a non-blank line could not be turned into a [`CourseRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionReason {
    /// The line lacks a course number or a title.
    #[error("expected at least a course number and a title, found {found} field(s)")]
    TooFewFields { found: usize },
    /// The course number field is present but blank.
    #[error("course number is empty")]
    EmptyIdentifier,
}

/// Parse one line of the catalog format.
///
/// Returns `Ok(None)` for a blank (empty or whitespace-only) line, which callers
/// skip without reporting. A trailing separator does not start a new field, so
/// `"CS101,"` has a single field and is rejected. Prerequisite fields that are
/// empty or contain only whitespace (`"CS200,DS, ,CS101"`) are dropped.
pub fn parse_record(line: &str) -> Result<Option<CourseRecord>, RejectionReason> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split_terminator(FIELD_SEPARATOR).collect();
    if fields.len() < 2 {
        return Err(RejectionReason::TooFewFields {
            found: fields.len(),
        });
    }
    if fields[0].trim().is_empty() {
        return Err(RejectionReason::EmptyIdentifier);
    }

    let prerequisites = fields[2..].iter().filter(|p| !p.trim().is_empty());
    Ok(Some(CourseRecord::new(fields[0], fields[1], prerequisites)))
}
