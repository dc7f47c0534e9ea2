//! Immutable tree snapshots and region edits through the public API.

use js_patcher::{
    extract_text, replace_text, EditOperation, EditorSettings, LineSeparator, Literal, Location,
    Position, RegionError, SourceTree,
};

#[test]
fn region_examples() {
    let text = "const a = sample_text";
    let pl = Location::new(Position::new(1, 13), Position::new(1, 15));
    assert_eq!(extract_text(text, &pl).unwrap(), "pl");

    let sa = Location::new(Position::new(1, 11), Position::new(1, 13));
    assert_eq!(replace_text(text, &sa, "im").unwrap(), "const a = simple_text");
}

#[test]
fn region_fixture_from_json() {
    let text = "let a = 1;\nlet b = 2;\nlet c = 3;\n";
    let location: Location = serde_json::from_str(
        r#"{"start": {"line": 1, "column": 8}, "end": {"line": 3, "column": 4}}"#,
    )
    .unwrap();
    assert_eq!(extract_text(text, &location).unwrap(), "1;\nlet b = 2;\nlet ");
    assert_eq!(replace_text(text, &location, "0; ").unwrap(), "let a = 0; c = 3;\n");
}

#[test]
fn region_out_of_range() {
    let location = Location::new(Position::new(4, 0), Position::new(4, 1));
    assert!(matches!(
        extract_text("one\ntwo", &location),
        Err(RegionError::LineOutOfRange { line: 4, .. })
    ));
}

#[test]
fn snapshots_are_independent() {
    let first = SourceTree::parse("const config = {mode: 'dev'};\n").unwrap();
    let second = first
        .apply(&EditOperation::ReplaceObjectItem {
            object: "config".to_string(),
            key: "mode".to_string(),
            value: Literal::from("prod"),
        })
        .unwrap();

    assert_eq!(first.source(), "const config = {mode: 'dev'};\n");
    assert_eq!(second.source(), "const config = {mode: \"prod\"};\n");
    assert_eq!(
        second.first_declaration("config").unwrap().value_text(),
        Some("{mode: \"prod\"}")
    );
}

#[test]
fn crlf_tree_uses_configured_separator() {
    let settings = EditorSettings::default().with_line_separator(LineSeparator::CrLf);
    let tree = SourceTree::parse_with("const a = 1;\r\nconst b = 2;\r\n", settings).unwrap();

    let location = Location::new(Position::new(2, 10), Position::new(2, 11));
    assert_eq!(tree.extract(&location).unwrap(), "2");

    let tree = tree
        .apply(&EditOperation::DeclareAttachment {
            name: "z".to_string(),
        })
        .unwrap()
        .apply(&EditOperation::InsertDeclaration {
            anchor: "b".to_string(),
            name: "mid".to_string(),
            kind: Default::default(),
            init: Some("a + 1".to_string()),
        })
        .unwrap();
    assert_eq!(
        tree.to_source(),
        "const a = 1;\r\nconst mid = a + 1;\r\nconst b = 2;\r\n"
    );
}
