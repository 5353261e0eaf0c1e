//! Course catalog service
//!
//! Owns the course store, loads catalog sources into it and answers
//! list and detail queries with prerequisite titles resolved.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Course, CourseCatalog, CourseCode, CourseStore, SkippedLine};
use crate::infrastructure::traits::FileSystem;

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Course lines accepted from the source (duplicates counted each time)
    pub records: usize,
    /// Distinct courses in the store after the load
    pub courses: usize,
    /// Lines rejected as malformed
    pub skipped: Vec<SkippedLine>,
}

/// A prerequisite code with its title when the course is in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteRef {
    pub code: CourseCode,
    pub title: Option<String>,
}

impl fmt::Display for PrerequisiteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{} ({})", self.code, title),
            None => write!(f, "{}", self.code),
        }
    }
}

/// Course details for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetail {
    pub code: CourseCode,
    pub title: String,
    pub prerequisites: Vec<PrerequisiteRef>,
}

/// Service holding the session's course store.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    store: CourseStore,
}

impl CatalogService {
    /// Create a service with an empty store.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            store: CourseStore::new(),
        }
    }

    /// Replace the catalog with the courses in `path`.
    ///
    /// The whole source is read before the store is touched: if it cannot be
    /// read the previous catalog stays in place. Bytes that are not valid UTF-8
    /// are replaced with U+FFFD instead of rejecting the file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self, path: &Path) -> ApplicationResult<LoadReport> {
        let bytes = self.fs.read(path).or_unreadable(path)?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!("{}: invalid UTF-8 replaced", path.display());
        }
        let report = self.load_content(&content);
        info!(
            "loaded {} courses from {} ({} skipped)",
            report.courses,
            path.display(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Replace the catalog with the courses parsed from `content`.
    pub fn load_content(&mut self, content: &str) -> LoadReport {
        let catalog = CourseCatalog::parse(content);
        for skipped in &catalog.skipped {
            warn!("line {}: {}", skipped.line_number, skipped.reason);
        }

        self.store.clear();
        let records = catalog.courses.len();
        for course in catalog.courses {
            self.store.insert(course);
        }
        debug!("store depth after load: {}", self.store.depth());

        LoadReport {
            records,
            courses: self.store.len(),
            skipped: catalog.skipped,
        }
    }

    pub fn store(&self) -> &CourseStore {
        &self.store
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Courses in ascending code order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> + '_ {
        self.store.iter()
    }

    /// Look up a course by user input (trimmed and upper-cased first).
    ///
    /// Blank input is a `DomainError::EmptyCourseCode`, not a missing course.
    #[instrument(level = "debug", skip(self))]
    pub fn find(&self, code: &str) -> ApplicationResult<&Course> {
        let code = CourseCode::new(code)?;
        self.store
            .search(code.as_str())
            .ok_or_else(|| ApplicationError::CourseNotFound(code.to_string()))
    }

    /// Course details with each prerequisite resolved against the catalog.
    pub fn describe(&self, code: &str) -> ApplicationResult<CourseDetail> {
        let course = self.find(code)?;
        let prerequisites = course
            .prerequisites
            .iter()
            .map(|prereq| PrerequisiteRef {
                code: prereq.clone(),
                title: self.store.search(prereq.as_str()).map(|c| c.title.clone()),
            })
            .collect();

        Ok(CourseDetail {
            code: course.code.clone(),
            title: course.title.clone(),
            prerequisites,
        })
    }
}
