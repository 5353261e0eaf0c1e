//! Interactive course planner menu
//!
//! Runs over any `BufRead`/`Write` pair: stdin/stdout in the binary,
//! in-memory buffers in tests. Output is plain text.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{CatalogService, CourseDetail};
use crate::application::ApplicationError;
use crate::config::Settings;
use crate::domain::expand_env_vars;
use crate::infrastructure::{InfraError, InfraResult};

pub const GREETING: &str = "Welcome to the course planner.";
pub const FAREWELL: &str = "Thank you for using the course planner!";
pub const LOAD_FIRST: &str = "Error: Please load data first (Option 1).";

const MENU: [&str; 4] = [
    "1. Load Data Structure.",
    "2. Print Course List.",
    "3. Print Course.",
    "9. Exit",
];

/// `CODE, TITLE` followed by the prerequisite line.
pub fn format_course_detail(detail: &CourseDetail) -> [String; 2] {
    let prerequisites = if detail.prerequisites.is_empty() {
        "None".to_string()
    } else {
        detail.prerequisites.iter().join(", ")
    };
    [
        format!("{}, {}", detail.code, detail.title),
        format!("Prerequisites: {}", prerequisites),
    ]
}

/// One interactive planner session. Owns the catalog for its lifetime.
pub struct Session<R, W> {
    catalog: CatalogService,
    settings: Arc<Settings>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(catalog: CatalogService, settings: Arc<Settings>, input: R, output: W) -> Self {
        Self {
            catalog,
            settings,
            input,
            output,
        }
    }

    /// Consume the session, returning the writer (for inspecting test output).
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the user exits or input ends.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> InfraResult<()> {
        self.say(GREETING)?;

        loop {
            for line in MENU {
                self.say(line)?;
            }
            let Some(choice) = self.prompt("What would you like to do?")? else {
                debug!("input closed");
                return Ok(());
            };

            let flow = match choice.parse::<u32>() {
                Ok(1) => self.load_data()?,
                Ok(2) => self.print_course_list()?,
                Ok(3) => self.print_course()?,
                Ok(9) => {
                    self.say(FAREWELL)?;
                    ControlFlow::Break(())
                }
                _ => {
                    self.say(format!("{} is not a valid option.", choice))?;
                    ControlFlow::Continue(())
                }
            };

            if flow.is_break() {
                return Ok(());
            }
        }
    }

    /// Load a course file and report the outcome. A failed load keeps the prior catalog.
    pub fn load_file(&mut self, path: &Path) -> InfraResult<()> {
        match self.catalog.load(path) {
            Ok(report) => {
                self.say("File loaded successfully.")?;
                self.say(format!("Loaded {} courses.", report.courses))?;
                if !report.skipped.is_empty() {
                    self.say(format!(
                        "Skipped {} malformed line(s): {}.",
                        report.skipped.len(),
                        report.skipped.iter().map(|s| s.line_number).join(", ")
                    ))?;
                }
            }
            Err(ApplicationError::SourceUnreadable { .. }) => {
                self.say(format!("Error: could not open file \"{}\".", path.display()))?;
            }
            Err(e) => self.say(format!("Error: {}", e))?,
        }
        Ok(())
    }

    fn load_data(&mut self) -> InfraResult<ControlFlow<()>> {
        let Some(name) = self.prompt("Enter the file name:")? else {
            return Ok(ControlFlow::Break(()));
        };

        let path = if name.is_empty() {
            match self.settings.data_file.clone() {
                Some(default) => default,
                None => {
                    self.say("Error: file name cannot be empty.")?;
                    return Ok(ControlFlow::Continue(()));
                }
            }
        } else {
            PathBuf::from(expand_env_vars(&name))
        };

        self.load_file(&path)?;
        Ok(ControlFlow::Continue(()))
    }

    fn print_course_list(&mut self) -> InfraResult<ControlFlow<()>> {
        if self.catalog.is_empty() {
            self.say(LOAD_FIRST)?;
            return Ok(ControlFlow::Continue(()));
        }

        writeln!(self.output, "{}", self.settings.list_header).map_err(write_err)?;
        for course in self.catalog.courses() {
            writeln!(self.output, "{}", course).map_err(write_err)?;
        }
        Ok(ControlFlow::Continue(()))
    }

    fn print_course(&mut self) -> InfraResult<ControlFlow<()>> {
        if self.catalog.is_empty() {
            self.say(LOAD_FIRST)?;
            return Ok(ControlFlow::Continue(()));
        }

        let Some(code) = self.prompt("What course do you want to know about?")? else {
            return Ok(ControlFlow::Break(()));
        };

        match self.catalog.describe(&code) {
            Ok(detail) => {
                for line in format_course_detail(&detail) {
                    self.say(line)?;
                }
            }
            Err(ApplicationError::CourseNotFound(normalized)) => {
                self.say(format!("Course not found: {}", normalized))?;
            }
            Err(e) => self.say(format!("Error: {}", e))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Print `msg` and read one trimmed line. `None` when input is exhausted.
    fn prompt(&mut self, msg: &str) -> InfraResult<Option<String>> {
        write!(self.output, "{} ", msg).map_err(write_err)?;
        self.output.flush().map_err(write_err)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| InfraError::io("read session input", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, msg: impl AsRef<str>) -> InfraResult<()> {
        writeln!(self.output, "{}", msg.as_ref()).map_err(write_err)
    }
}

fn write_err(e: std::io::Error) -> InfraError {
    InfraError::io("write session output", e)
}
