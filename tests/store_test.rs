//! Tests for the ordered course store

use rstest::{fixture, rstest};

use courseplan::domain::{Course, CourseCode, CourseStore};
use courseplan::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn course(code: &str, title: &str, prereqs: &[&str]) -> Course {
    Course::new(
        CourseCode::new(code).unwrap(),
        title,
        prereqs.iter().map(|p| CourseCode::new(p).unwrap()).collect(),
    )
}

fn codes(store: &CourseStore) -> Vec<String> {
    store.iter().map(|c| c.code.to_string()).collect()
}

#[fixture]
fn three_courses() -> CourseStore {
    let mut store = CourseStore::new();
    store.insert(course("CSCI200", "Foundations", &[]));
    store.insert(course("CSCI300", "Algorithms", &["CSCI200"]));
    store.insert(course("MATH201", "Discrete Math", &[]));
    store
}

// ============================================================
// Empty store
// ============================================================

#[test]
fn given_new_store_then_is_empty() {
    let store = CourseStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.depth(), 0);
    assert!(store.search("CSCI100").is_none());
    assert_eq!(store.iter().count(), 0);
}

#[test]
fn given_empty_store_when_clearing_twice_then_stays_empty() {
    let mut store = CourseStore::default();
    store.clear();
    store.clear();
    assert!(store.is_empty());
}

// ============================================================
// Insert / search / traversal
// ============================================================

#[rstest]
fn given_three_courses_when_traversing_then_yields_ascending_codes(three_courses: CourseStore) {
    assert_eq!(codes(&three_courses), vec!["CSCI200", "CSCI300", "MATH201"]);
}

#[rstest]
fn given_three_courses_when_searching_existing_code_then_returns_record(three_courses: CourseStore) {
    let found = three_courses.search("CSCI300").expect("CSCI300 stored");
    assert_eq!(found.title, "Algorithms");
    assert_eq!(found.prerequisites, vec![CourseCode::new("CSCI200").unwrap()]);
}

#[rstest]
fn given_three_courses_when_searching_missing_code_then_returns_none(three_courses: CourseStore) {
    assert!(three_courses.search("ENGL101").is_none());
    // search does not normalize: keys are already upper-case
    assert!(three_courses.search("csci300").is_none());
}

#[test]
fn given_duplicate_code_when_inserting_then_replaces_record() {
    let mut store = CourseStore::new();
    store.insert(course("CSCI300", "Algorithms I", &[]));
    store.insert(course("CSCI300", "Algorithms II", &["MATH201"]));

    let found = store.search("CSCI300").unwrap();
    assert_eq!(found.title, "Algorithms II");
    assert_eq!(found.prerequisites, vec![CourseCode::new("MATH201").unwrap()]);
    assert_eq!(store.len(), 1);
    assert_eq!(store.iter().count(), 1);
}

#[test]
fn given_duplicate_of_inner_node_when_inserting_then_keeps_shape() {
    let mut store = CourseStore::new();
    for code in ["M", "F", "T", "A", "H"] {
        store.insert(course(code, code, &[]));
    }
    let depth_before = store.depth();

    store.insert(course("F", "replaced", &[]));

    assert_eq!(store.depth(), depth_before);
    assert_eq!(store.search("F").unwrap().title, "replaced");
    assert_eq!(codes(&store), vec!["A", "F", "H", "M", "T"]);
}

#[rstest]
fn given_populated_store_when_clearing_then_visits_nothing(mut three_courses: CourseStore) {
    three_courses.clear();

    assert!(three_courses.is_empty());
    let mut visited = 0;
    three_courses.for_each_in_order(|_| visited += 1);
    assert_eq!(visited, 0);
}

#[rstest]
fn given_cleared_store_when_reinserting_then_works_again(mut three_courses: CourseStore) {
    three_courses.clear();
    three_courses.insert(course("ENGL101", "Composition", &[]));

    assert_eq!(codes(&three_courses), vec!["ENGL101"]);
    assert!(three_courses.search("CSCI200").is_none());
}

#[rstest]
fn given_three_courses_when_visiting_in_order_then_sees_each_once(three_courses: CourseStore) {
    let mut seen = Vec::new();
    three_courses.for_each_in_order(|c| seen.push(c.code.to_string()));
    assert_eq!(seen, vec!["CSCI200", "CSCI300", "MATH201"]);

    let via_into_iter: Vec<&str> = (&three_courses).into_iter().map(|c| c.title.as_str()).collect();
    assert_eq!(via_into_iter, vec!["Foundations", "Algorithms", "Discrete Math"]);
}

// ============================================================
// Ordering details
// ============================================================

#[test]
fn given_codes_differing_in_digits_when_traversing_then_orders_lexicographically() {
    let mut store = CourseStore::new();
    for code in ["CSCI100", "CSCI20", "CSCI3", "CSCI1000"] {
        store.insert(course(code, code, &[]));
    }
    assert_eq!(codes(&store), vec!["CSCI100", "CSCI1000", "CSCI20", "CSCI3"]);
}

// ============================================================
// Shape
// ============================================================

#[rstest]
#[case::sorted(&["A", "B", "C", "D", "E"], 5)]
#[case::reverse(&["E", "D", "C", "B", "A"], 5)]
#[case::balanced(&["D", "B", "F", "A", "C", "E", "G"], 3)]
#[case::single(&["A"], 1)]
fn given_insertion_order_when_measuring_depth_then_reflects_unbalanced_shape(
    #[case] order: &[&str],
    #[case] expected: usize,
) {
    let mut store = CourseStore::new();
    for code in order {
        store.insert(course(code, code, &[]));
    }
    assert_eq!(store.depth(), expected);
}

#[test]
fn given_long_sorted_input_when_traversing_then_does_not_overflow_stack() {
    let mut store = CourseStore::new();
    let n = 20_000;
    for i in 0..n {
        store.insert(course(&format!("C{:06}", i), "x", &[]));
    }

    assert_eq!(store.len(), n);
    assert_eq!(store.depth(), n);
    assert_eq!(store.iter().count(), n);
    assert!(store.search(&format!("C{:06}", n - 1)).is_some());
}

#[test]
fn given_small_tree_when_rendering_then_marks_children_sides() {
    let mut store = CourseStore::new();
    store.insert(course("CSCI300", "Algorithms", &[]));
    store.insert(course("CSCI200", "Foundations", &[]));
    store.insert(course("MATH201", "Discrete Math", &[]));

    let rendered = store.to_tree_string().to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "CSCI300");
    assert!(lines[1].ends_with("L CSCI200"), "got {:?}", lines[1]);
    assert!(lines[2].ends_with("R MATH201"), "got {:?}", lines[2]);
}

#[test]
fn given_empty_store_when_rendering_then_says_empty() {
    let store = CourseStore::new();
    assert_eq!(store.to_tree_string().to_string().trim(), "Empty tree");
}
