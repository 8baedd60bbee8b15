use std::path::Path;

use pretty_assertions::assert_eq;

use hintscan_patcher::{
    apply_hints, build_patch, AnnotationPolicy, FunctionDescriptor, HintMap,
};

fn extract(source: &str) -> Vec<FunctionDescriptor> {
    let mut extractor =
        hintscan_analyzer::SignatureExtractor::new(AnnotationPolicy::BareName).unwrap();
    extractor.parse_source(source, Path::new("test.py")).unwrap()
}

fn hints(entries: &[(&str, &str)]) -> HintMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn multiline_signature_collapses_to_one_line() {
    let source = "def f(\n    a,\n    b,\n):\n    return a + b\n";
    let descriptors = extract(source);
    let h = hints(&[("a", "int"), ("b", "int"), ("return", "int")]);

    let patch = build_patch(&descriptors[0], &h, source, AnnotationPolicy::BareName).unwrap();
    assert_eq!(
        patch.patched_source,
        "def f(a: int, b: int) -> int:\n    return a + b\n"
    );
}

#[test]
fn only_the_header_span_changes() {
    let source = "# leading comment\n\ndef f(\n    a,\n):\n    # body comment\n    return a\n\n# trailing comment\n";
    let descriptors = extract(source);
    let h = hints(&[("a", "int"), ("return", "int")]);

    let patch = build_patch(&descriptors[0], &h, source, AnnotationPolicy::BareName).unwrap();
    let before: Vec<&str> = source.lines().collect();
    let after: Vec<&str> = patch.patched_source.lines().collect();

    // original lines 0-1 and 5.. map to patched lines 0-1 and 3..
    assert_eq!(&after[..2], &before[..2]);
    assert_eq!(after[2], "def f(a: int) -> int:");
    assert_eq!(&after[3..], &before[5..]);
}

#[test]
fn repatching_is_idempotent() {
    let source = "def f(\n    a,\n    b,\n):\n    return a + b\n";
    let h = hints(&[("a", "int"), ("b", "int"), ("return", "int")]);

    let first = {
        let descriptors = extract(source);
        build_patch(&descriptors[0], &h, source, AnnotationPolicy::BareName).unwrap()
    };
    let second = {
        let descriptors = extract(&first.patched_source);
        build_patch(
            &descriptors[0],
            &h,
            &first.patched_source,
            AnnotationPolicy::BareName,
        )
        .unwrap()
    };
    let third = {
        let descriptors = extract(&second.patched_source);
        build_patch(
            &descriptors[0],
            &h,
            &second.patched_source,
            AnnotationPolicy::BareName,
        )
        .unwrap()
    };

    assert_eq!(second.patched_source, first.patched_source);
    assert_eq!(third.patched_source, second.patched_source);
}

#[test]
fn sequential_patching_of_one_file_loses_no_edit() {
    let source = "def first(\n    a,\n):\n    return a\n\n\ndef second(b):\n    return b\n";
    let descriptors = extract(source);
    assert_eq!(descriptors.len(), 2);

    let jobs: Vec<(FunctionDescriptor, HintMap)> = vec![
        (
            descriptors[0].clone(),
            hints(&[("a", "int"), ("return", "int")]),
        ),
        (
            descriptors[1].clone(),
            hints(&[("b", "str"), ("return", "str")]),
        ),
    ];

    let patch = apply_hints(source, Path::new("test.py"), &jobs, AnnotationPolicy::BareName)
        .unwrap();
    assert_eq!(
        patch.patched_source,
        "def first(a: int) -> int:\n    return a\n\n\ndef second(b: str) -> str:\n    return b\n"
    );
}

#[test]
fn nested_function_and_parent_patch_together() {
    let source = "def outer(a):\n    def inner(b):\n        return b\n    return inner(a)\n";
    let descriptors = extract(source);

    let jobs: Vec<(FunctionDescriptor, HintMap)> = vec![
        (
            descriptors[0].clone(),
            hints(&[("a", "int"), ("return", "int")]),
        ),
        (
            descriptors[1].clone(),
            hints(&[("b", "int"), ("return", "int")]),
        ),
    ];

    let patch = apply_hints(source, Path::new("test.py"), &jobs, AnnotationPolicy::BareName)
        .unwrap();
    assert_eq!(
        patch.patched_source,
        "def outer(a: int) -> int:\n    def inner(b: int) -> int:\n        return b\n    return inner(a)\n"
    );
}

#[test]
fn stale_line_numbers_yield_noop() {
    let source = "def f(a):\n    pass\n";
    let descriptor = FunctionDescriptor {
        name: "f".to_string(),
        path: Path::new("test.py").to_path_buf(),
        line: 99,
        has_return_annotation: false,
        missing_params: vec!["a".to_string()],
    };
    let patch = build_patch(
        &descriptor,
        &hints(&[("a", "int")]),
        source,
        AnnotationPolicy::BareName,
    )
    .unwrap();
    assert!(patch.is_noop());
}
