#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use std::fs;

use xmlchain::test_utils::*;

#[test]
fn script_builds_books_example() {
    assert_eq!(run_script(BOOKS_SCRIPT).unwrap(), BOOKS_XML);
}

#[test]
fn script_matches_chaining_api() {
    let script = parse_script(BOOKS_SCRIPT).expect("valid script");
    let built = script.build(BuilderConfig::default()).expect("builds");
    let chained = books_document().expect("builds");
    assert_eq!(built.to_xml().unwrap(), chained.to_xml().unwrap());
}

#[test]
fn script_root_attributes() {
    let xml = run_script("root shelf floor=2 open=true").unwrap();
    assert_eq!(xml, r#"<shelf floor="2" open="true"/>"#);
}

#[test]
fn script_custom_format() {
    let format = FormatConfig {
        indent_spaces: 1,
        ..FormatConfig::default()
    };
    let xml = run_script_with("root r\na.b", &BuilderConfig::default(), &format).unwrap();
    assert_eq!(xml, "<r>\n <a>\n  <b/>\n </a>\n</r>");
}

#[test]
fn script_reports_bad_name_with_line() {
    let err = run_script("root r\n\nok\nbad-start.-x").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidName { .. }));
    assert!(err.to_string().contains("line 4"), "{err}");
}

#[test]
fn file_read_error() {
    let result = build_file("nonexistent_script.xc");
    assert!(result.is_err(), "Expected error when reading missing file");

    let err = result.unwrap_err();
    match err.kind() {
        ErrorKind::Io(_) => { /* expected */ }
        other => panic!("Expected IO error, got {:?}", other),
    }
    assert!(err.message().contains("nonexistent_script.xc"));
}

#[test]
fn build_file_from_disk() {
    let temp_path = tmp_file_path("books.xc");
    let temp_path_str = temp_path.to_str().expect("valid path");

    fs::write(temp_path_str, BOOKS_SCRIPT).expect("Failed to write script");
    let xml = build_file(temp_path_str).expect("Failed to build script");
    assert_eq!(xml, BOOKS_XML);

    let _ = fs::remove_file(temp_path);
}
