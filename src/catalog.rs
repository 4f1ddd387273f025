//! In-memory course catalog keyed by normalized course number.

use crate::record::{CourseRecord, RejectionReason, normalize, parse_record};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failures of catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The load source could not be opened or read. Nothing was loaded from it.
    #[error("could not read course data from {origin}: {source}")]
    SourceUnavailable {
        origin: String,
        #[source]
        source: io::Error,
    },
    /// Listing was requested before any course was loaded.
    #[error("no course data loaded")]
    EmptyCatalog,
}

/// Observable state of a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    Empty,
    Populated,
}

/// A non-blank line that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based position of the line in its source.
    pub line_number: usize,
    /// The line exactly as it was read, without its terminator.
    pub content: String,
    pub reason: RejectionReason,
}

/// Summary of a single load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records inserted or replaced.
    pub loaded: usize,
    /// Blank lines that were ignored.
    pub skipped_blank: usize,
    /// Malformed lines, in source order.
    pub rejected: Vec<RejectedLine>,
}

impl LoadReport {
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Mapping from normalized course number to [`CourseRecord`].
///
/// Keys are unique: loading a record whose number is already present replaces
/// the previous record. Successive loads merge into the same catalog.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    courses: HashMap<String, CourseRecord>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Records are never removed, so once populated a catalog stays populated.
    pub fn state(&self) -> CatalogState {
        if self.courses.is_empty() {
            CatalogState::Empty
        } else {
            CatalogState::Populated
        }
    }

    /// Insert a record, replacing any record with the same number.
    ///
    /// Returns the replaced record, if there was one.
    pub fn insert(&mut self, record: CourseRecord) -> Option<CourseRecord> {
        let key = record.identifier().to_owned();
        let previous = self.courses.insert(key, record);
        if let Some(old) = &previous {
            debug!(course = old.identifier(), "replaced existing course");
        }
        previous
    }

    /// Parse and load every line of `lines`.
    ///
    /// Malformed lines are recorded in the returned report and do not stop the
    /// load; blank lines are skipped.
    pub fn load_lines<I, S>(&mut self, lines: I) -> LoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = LoadReport::default();
        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            match parse_record(line) {
                Ok(Some(record)) => {
                    debug!(course = record.identifier(), "loaded course");
                    self.insert(record);
                    report.loaded += 1;
                }
                Ok(None) => report.skipped_blank += 1,
                Err(reason) => {
                    warn!(line = index + 1, %reason, "rejected course entry");
                    report.rejected.push(RejectedLine {
                        line_number: index + 1,
                        content: line.to_owned(),
                        reason,
                    });
                }
            }
        }
        report
    }

    /// Load course data from a buffered reader.
    ///
    /// The whole source is read before anything is inserted, so a read error
    /// leaves the catalog exactly as it was. `origin` names the source in errors.
    /// Each line is decoded on its own; bytes that are not valid UTF-8 are
    /// replaced with U+FFFD instead of failing the load.
    pub fn load_reader<R: BufRead>(
        &mut self,
        reader: R,
        origin: &str,
    ) -> Result<LoadReport, CatalogError> {
        let mut lines = Vec::new();
        for raw in reader.split(b'\n') {
            let mut raw = raw.map_err(|source| {
                warn!(origin, error = %source, "failed to read course data");
                CatalogError::SourceUnavailable {
                    origin: origin.to_owned(),
                    source,
                }
            })?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            lines.push(String::from_utf8_lossy(&raw).into_owned());
        }

        let report = self.load_lines(&lines);
        info!(
            origin,
            loaded = report.loaded,
            rejected = report.rejected.len(),
            total = self.len(),
            "course data loaded"
        );
        Ok(report)
    }

    /// Load course data from the file at `path`.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, CatalogError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|source| {
            warn!(origin = %origin, error = %source, "failed to open course data");
            CatalogError::SourceUnavailable {
                origin: origin.clone(),
                source,
            }
        })?;
        self.load_reader(BufReader::new(file), &origin)
    }

    /// All courses ordered by course number.
    pub fn list_sorted(&self) -> Result<Vec<&CourseRecord>, CatalogError> {
        if self.courses.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        let mut courses: Vec<&CourseRecord> = self.courses.values().collect();
        courses.sort_by(|a, b| a.identifier().cmp(b.identifier()));
        Ok(courses)
    }

    /// Find a course by number, ignoring case.
    pub fn lookup(&self, query: &str) -> Option<&CourseRecord> {
        self.courses.get(&normalize(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Read, Write};

    fn identifiers(catalog: &Catalog) -> Vec<&str> {
        catalog
            .list_sorted()
            .unwrap()
            .into_iter()
            .map(|c| c.identifier())
            .collect()
    }

    #[test]
    fn test_new_catalog_is_empty() {
        let catalog = Catalog::new();
        assert_eq!(catalog.state(), CatalogState::Empty);
        assert!(matches!(
            catalog.list_sorted(),
            Err(CatalogError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_load_normalizes_fields() {
        let mut catalog = Catalog::new();
        let report = catalog.load_lines(["cs101,Intro to CS,cs50"]);
        assert_eq!(report.loaded, 1);

        let record = catalog.lookup("CS101").unwrap();
        assert_eq!(record.identifier(), "CS101");
        assert_eq!(record.title(), "Intro to CS");
        assert_eq!(record.prerequisites(), ["CS50"]);
        assert_eq!(catalog.state(), CatalogState::Populated);
    }

    #[test]
    fn test_malformed_line_is_reported_and_skipped() {
        let mut catalog = Catalog::new();
        let report = catalog.load_lines(["CS101", "", "MA201,Calculus"]);

        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped_blank, 1);
        assert_eq!(
            report.rejected,
            vec![RejectedLine {
                line_number: 1,
                content: "CS101".to_string(),
                reason: RejectionReason::TooFewFields { found: 1 },
            }]
        );
        assert!(catalog.lookup("CS101").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_identifier_last_write_wins() {
        let mut catalog = Catalog::new();
        catalog.load_lines(["CS101,Title A"]);
        catalog.load_lines(["cs101,Title B"]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("CS101").unwrap().title(), "Title B");
    }

    #[test]
    fn test_duplicate_within_one_load() {
        let mut catalog = Catalog::new();
        let report = catalog.load_lines(["CS101,Title A,MA100", "cs101,Title B"]);

        assert_eq!(report.loaded, 2);
        assert_eq!(catalog.len(), 1);
        let record = catalog.lookup("cs101").unwrap();
        assert_eq!(record.title(), "Title B");
        assert!(record.prerequisites().is_empty());
    }

    #[test]
    fn test_list_sorted_orders_by_identifier() {
        let mut catalog = Catalog::new();
        catalog.load_lines(["CS101,Intro", "cs050,Basics", "MA201,Calculus"]);
        assert_eq!(identifiers(&catalog), vec!["CS050", "CS101", "MA201"]);
        // listing is repeatable and does not change the catalog
        assert_eq!(identifiers(&catalog), vec!["CS050", "CS101", "MA201"]);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let mut catalog = Catalog::new();
        catalog.load_lines(["CS101,Intro to CS"]);
        assert_eq!(catalog.lookup("cs101"), catalog.lookup("CS101"));
        assert!(catalog.lookup("cS101").is_some());
    }

    #[test]
    fn test_lookup_unknown_is_absent() {
        let mut catalog = Catalog::new();
        assert!(catalog.lookup("CS999").is_none());
        catalog.load_lines(["CS101,Intro to CS"]);
        assert!(catalog.lookup("CS999").is_none());
    }

    #[test]
    fn test_dangling_prerequisites_are_kept() {
        let mut catalog = Catalog::new();
        catalog.load_lines(["CS300,Algorithms,CS200"]);
        assert_eq!(catalog.lookup("cs300").unwrap().prerequisites(), ["CS200"]);
        assert!(catalog.lookup("CS200").is_none());
    }

    #[test]
    fn test_stays_populated_after_empty_load() {
        let mut catalog = Catalog::new();
        catalog.load_lines(["CS101,Intro"]);
        let report = catalog.load_lines(["bad line", ""]);
        assert_eq!(report.loaded, 0);
        assert_eq!(catalog.state(), CatalogState::Populated);
    }

    #[test]
    fn test_load_only_bad_lines_stays_empty() {
        let mut catalog = Catalog::new();
        catalog.load_lines(["nothing here", "   "]);
        assert_eq!(catalog.state(), CatalogState::Empty);
    }

    #[test]
    fn test_load_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "CSCI100,Introduction to Computer Science\r\n\
             CSCI200,Data Structures,CSCI101\r\n\
             \r\n\
             MATH201,Discrete Mathematics\r\n"
        )
        .unwrap();

        let mut catalog = Catalog::new();
        let report = catalog.load_path(file.path()).unwrap();
        assert_eq!(report.loaded, 3);
        assert_eq!(report.skipped_blank, 1);
        assert!(!report.has_rejections());
        assert_eq!(identifiers(&catalog), vec!["CSCI100", "CSCI200", "MATH201"]);
        assert_eq!(
            catalog.lookup("csci200").unwrap().prerequisites(),
            ["CSCI101"]
        );
    }

    #[test]
    fn test_missing_file_leaves_catalog_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::new();
        catalog.load_lines(["CS101,Intro", "MA201,Calculus"]);

        let err = catalog.load_path(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::SourceUnavailable { .. }));
        assert_eq!(identifiers(&catalog), vec!["CS101", "MA201"]);
        assert_eq!(catalog.lookup("CS101").unwrap().title(), "Intro");
    }

    /// Yields some valid data, then fails.
    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::other("device went away")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_invalid_utf8_line_does_not_abort_load() {
        let mut catalog = Catalog::new();
        let data = Cursor::new(b"CS101,Intro\nMA201,Caf\xE9\r\nPH100,Physics\n".to_vec());
        let report = catalog.load_reader(data, "latin1.csv").unwrap();

        assert_eq!(report.loaded, 3);
        assert!(!report.has_rejections());
        assert_eq!(identifiers(&catalog), vec!["CS101", "MA201", "PH100"]);
        assert_eq!(catalog.lookup("ma201").unwrap().title(), "Caf\u{FFFD}");
    }

    #[test]
    fn test_read_error_mid_source_commits_nothing() {
        let mut catalog = Catalog::new();
        catalog.load_lines(["CS101,Intro"]);

        let reader = BufReader::new(FailingReader {
            data: Cursor::new(b"MA201,Calculus\nPH100,Physics\n".to_vec()),
        });
        let err = catalog.load_reader(reader, "flaky").unwrap_err();

        assert!(matches!(err, CatalogError::SourceUnavailable { ref origin, .. } if origin == "flaky"));
        assert_eq!(identifiers(&catalog), vec!["CS101"]);
    }
}
