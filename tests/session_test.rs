//! Tests for the interactive planner session, driven through in-memory I/O

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use courseplan::application::services::CatalogService;
use courseplan::cli::session::{FAREWELL, GREETING, LOAD_FIRST};
use courseplan::cli::Session;
use courseplan::config::Settings;
use courseplan::infrastructure::traits::RealFileSystem;
use courseplan::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const SAMPLE: &str = "tests/resources/abcu_courses.csv";
const MALFORMED: &str = "tests/resources/malformed_courses.csv";

/// Run a session over `input` and return everything it printed.
fn run_session_with(settings: Settings, input: &str) -> String {
    let catalog = CatalogService::new(Arc::new(RealFileSystem));
    let mut session = Session::new(
        catalog,
        Arc::new(settings),
        Cursor::new(input.to_string()),
        Vec::new(),
    );
    session.run().expect("session runs");
    String::from_utf8(session.into_output()).expect("utf8 output")
}

fn run_session(input: &str) -> String {
    run_session_with(Settings::default(), input)
}

#[test]
fn given_exit_choice_then_greets_and_says_goodbye() {
    let out = run_session("9\n");

    assert!(out.starts_with(GREETING));
    assert!(out.contains("1. Load Data Structure."));
    assert!(out.contains("9. Exit"));
    assert!(out.trim_end().ends_with(FAREWELL));
}

#[test]
fn given_closed_input_then_session_ends_without_farewell() {
    let out = run_session("");

    assert!(out.starts_with(GREETING));
    assert!(!out.contains(FAREWELL));
}

#[test]
fn given_invalid_choices_then_reports_each() {
    let out = run_session("abc\n7\n9\n");

    assert!(out.contains("abc is not a valid option."));
    assert!(out.contains("7 is not a valid option."));
}

#[test]
fn given_no_data_when_listing_or_showing_then_asks_to_load_first() {
    let out = run_session("2\n3\n9\n");

    assert_eq!(out.matches(LOAD_FIRST).count(), 2);
}

#[test]
fn given_loaded_catalog_when_listing_then_prints_sorted_schedule() {
    let out = run_session(&format!("1\n{}\n2\n9\n", SAMPLE));

    assert!(out.contains("File loaded successfully."));
    assert!(out.contains("Loaded 8 courses."));
    let header = out.find("Here is a sample schedule:").expect("header printed");
    let listing: Vec<&str> = out[header..]
        .lines()
        .skip(1)
        .take(8)
        .collect();
    assert_eq!(
        listing,
        vec![
            "CSCI100, Introduction to Computer Science",
            "CSCI101, Introduction to Programming in C++",
            "CSCI200, Data Structures",
            "CSCI300, Introduction to Algorithms",
            "CSCI301, Advanced Programming in C++",
            "CSCI350, Operating Systems",
            "CSCI400, Large Software Development",
            "MATH201, Discrete Mathematics",
        ]
    );
}

#[test]
fn given_loaded_catalog_when_showing_course_then_prints_prerequisite_titles() {
    let out = run_session(&format!("1\n{}\n3\ncsci300\n9\n", SAMPLE));

    assert!(out.contains("CSCI300, Introduction to Algorithms\n"));
    assert!(out.contains(
        "Prerequisites: CSCI200 (Data Structures), MATH201 (Discrete Mathematics)\n"
    ));
}

#[test]
fn given_course_without_prerequisites_when_showing_then_prints_none() {
    let out = run_session(&format!("1\n{}\n3\nMATH201\n9\n", SAMPLE));

    assert!(out.contains("MATH201, Discrete Mathematics\nPrerequisites: None\n"));
}

#[test]
fn given_malformed_source_when_showing_then_uses_surviving_courses() {
    let out = run_session(&format!("1\n{}\n3\nCSCI101\n9\n", MALFORMED));
    // CSCI101 is not in that file
    assert!(out.contains("Course not found: CSCI101"));

    let out = run_session(&format!("1\n{}\n3\nCSCI200\n9\n", MALFORMED));
    assert!(out.contains("Prerequisites: CSCI100 (Intro to CS (revised))"));
    assert!(out.contains("Skipped 2 malformed line(s): 3, 5."));
}

#[test]
fn given_prerequisite_missing_from_catalog_when_showing_then_prints_bare_code() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("partial.csv");
    std::fs::write(&path, "CSCI200,Data Structures,CSCI100\n").unwrap();

    let out = run_session(&format!("1\n{}\n3\nCSCI200\n9\n", path.display()));

    assert!(out.contains("CSCI200, Data Structures\nPrerequisites: CSCI100\n"));
}

#[test]
fn given_blank_course_code_when_showing_then_reports_empty_code() {
    let out = run_session(&format!("1\n{}\n3\n   \n9\n", SAMPLE));

    assert!(out.contains("Error: course code must not be empty"));
    assert!(!out.contains("Course not found"));
}

#[test]
fn given_unknown_course_when_showing_then_reports_not_found() {
    let out = run_session(&format!("1\n{}\n3\n engl101 \n9\n", SAMPLE));

    assert!(out.contains("Course not found: ENGL101"));
}

#[test]
fn given_empty_file_name_without_default_when_loading_then_reports_error() {
    let out = run_session("1\n\n9\n");

    assert!(out.contains("Error: file name cannot be empty."));
}

#[test]
fn given_empty_file_name_with_configured_default_when_loading_then_uses_it() {
    let settings = Settings {
        data_file: Some(PathBuf::from(SAMPLE)),
        list_header: "Courses:".to_string(),
    };

    let out = run_session_with(settings, "1\n\n2\n9\n");

    assert!(out.contains("File loaded successfully."));
    assert!(out.contains("Courses:\nCSCI100, Introduction to Computer Science\n"));
}

#[test]
fn given_missing_file_after_successful_load_then_keeps_prior_data() {
    let out = run_session(&format!("1\n{}\n1\nnope.csv\n3\nCSCI100\n9\n", SAMPLE));

    assert!(out.contains("Error: could not open file \"nope.csv\"."));
    assert!(out.contains("CSCI100, Introduction to Computer Science"));
    assert!(!out.contains(LOAD_FIRST));
}
