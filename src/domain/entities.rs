//! Domain entities: course records and the catalog source format

use std::fmt;

use tracing::{debug, instrument};

use crate::domain::error::DomainError;

/// Normalized course identifier, e.g. `CSCI300`.
///
/// Always trimmed, ASCII upper-cased and non-empty, so it can be used
/// directly as a store key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseCode(String);

impl CourseCode {
    /// Normalize `raw` into a course code.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let normalized = normalize_code(raw);
        if normalized.is_empty() {
            return Err(DomainError::EmptyCourseCode);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CourseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonical form of user or file supplied course codes: trimmed and upper-cased.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// A single course in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Unique key
    pub code: CourseCode,
    /// Display title, arbitrary text
    pub title: String,
    /// Prerequisite codes in source order (not checked against the catalog)
    pub prerequisites: Vec<CourseCode>,
}

impl Course {
    pub fn new(code: CourseCode, title: impl Into<String>, prerequisites: Vec<CourseCode>) -> Self {
        Self {
            code,
            title: title.into(),
            prerequisites,
        }
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.code, self.title)
    }
}

/// A source line that did not yield a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source
    pub line_number: usize,
    /// Why the line was rejected
    pub reason: String,
}

/// Result of parsing a catalog source: the courses in file order plus rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseCatalog {
    pub courses: Vec<Course>,
    pub skipped: Vec<SkippedLine>,
}

impl CourseCatalog {
    /// Parse catalog content.
    ///
    /// Each non-empty line is `CODE,TITLE[,PREREQ]*`. Blank lines are ignored,
    /// malformed lines are collected in `skipped` instead of aborting the parse.
    /// A leading byte order mark is dropped.
    #[instrument(level = "debug", skip(content), fields(bytes = content.len()))]
    pub fn parse(content: &str) -> Self {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
        let mut catalog = Self::default();

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match parse_course_line(trimmed) {
                Ok(course) => catalog.courses.push(course),
                Err(e) => {
                    debug!("skipping line {}: {}", idx + 1, e);
                    catalog.skipped.push(SkippedLine {
                        line_number: idx + 1,
                        reason: e.to_string(),
                    });
                }
            }
        }

        catalog
    }
}

/// Parse a single `CODE,TITLE[,PREREQ]*` line into a course.
///
/// A trailing comma does not open an extra field, so `CSCI100,` has one field
/// and is rejected. Empty prerequisite fields are dropped.
pub fn parse_course_line(line: &str) -> Result<Course, DomainError> {
    let mut fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }

    if fields.len() < 2 {
        return Err(DomainError::MalformedLine {
            line: line.to_string(),
            reason: format!("expected at least 2 fields, found {}", fields.len()),
        });
    }

    let code = CourseCode::new(fields[0]).map_err(|e| DomainError::MalformedLine {
        line: line.to_string(),
        reason: e.to_string(),
    })?;
    let title = strip_quotes(fields[1]);
    let prerequisites = fields[2..]
        .iter()
        .filter_map(|f| CourseCode::new(f).ok())
        .collect();

    Ok(Course::new(code, title, prerequisites))
}

/// Strip one pair of surrounding double quotes.
fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        return s[1..s.len() - 1].trim();
    }
    s
}
