use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use hintscan_scanner::{exclusion_set, scan, AnnotationPolicy};

#[test]
fn scan_aggregates_in_file_then_source_order() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("a.py"),
        "def one(x):\n    def two(y):\n        pass\n",
    )
    .unwrap();
    fs::write(temp.path().join("b.py"), "def three(z: int) -> int:\n    return z\n").unwrap();

    let result = scan(
        temp.path(),
        &exclusion_set(Vec::<String>::new()),
        false,
        AnnotationPolicy::BareName,
    )
    .unwrap();

    assert_eq!(result.files_scanned, 2);
    let names: Vec<_> = result.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["one", "two", "three"]);

    // three is fully annotated; only one and two are at risk
    let at_risk: Vec<_> = result.at_risk().iter().map(|f| f.name.clone()).collect();
    assert_eq!(at_risk, vec!["one", "two"]);
}

#[test]
fn parse_failures_are_skipped_and_recorded() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("good.py"), "def ok(a: int) -> int:\n    return a\n").unwrap();
    fs::write(temp.path().join("broken.py"), "def broken(:\n").unwrap();

    let result = scan(
        temp.path(),
        &exclusion_set(Vec::<String>::new()),
        false,
        AnnotationPolicy::BareName,
    )
    .unwrap();

    assert_eq!(result.files_scanned, 1);
    assert_eq!(result.skipped.len(), 1);
    assert!(result.skipped[0].path.ends_with("broken.py"));
    assert_eq!(result.functions.len(), 1);
    assert_eq!(result.functions[0].name, "ok");
}

#[test]
fn missing_root_yields_empty_result() {
    let temp = tempdir().unwrap();
    let result = scan(
        &temp.path().join("nowhere"),
        &exclusion_set(Vec::<String>::new()),
        false,
        AnnotationPolicy::BareName,
    )
    .unwrap();

    assert_eq!(result.files_scanned, 0);
    assert!(result.functions.is_empty());
    assert_eq!(result.health_score(), 100);
}

#[test]
fn excluded_directories_never_contribute_functions() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("venv")).unwrap();
    fs::write(temp.path().join("venv/vendored.py"), "def hidden(a):\n    pass\n").unwrap();
    fs::write(temp.path().join("app.py"), "def visible(a):\n    pass\n").unwrap();

    let result = scan(
        temp.path(),
        &exclusion_set(Vec::<String>::new()),
        false,
        AnnotationPolicy::BareName,
    )
    .unwrap();

    assert_eq!(result.files_scanned, 1);
    assert_eq!(result.functions.len(), 1);
    assert_eq!(result.functions[0].name, "visible");
}
