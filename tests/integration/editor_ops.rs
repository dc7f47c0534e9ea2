//! Structural edits on realistic module sources.

use super::init_logging;
use js_patcher::{
    add_attachment, append_array_element, insert_array_element, insert_declaration_before,
    insert_object_item, remove_array_element, remove_declaration, remove_object_item,
    ContainerKind, EditorError,
};

const MODULE: &str = r#"'use strict';

// Attachment points for the base mesh.
const MESH_ATTACHMENTS = [
    {id: "something", value: "DUMMY", loc: "DUMMY"},
];

/* rendering options */
const options = {
    'antialias': true,
    shadows: false, // expensive
    quality: "high",
};

function draw() {
    const options = {local: 1};
    return options;
}
"#;

#[test]
fn add_attachment_leaves_everything_else_untouched() {
    init_logging();

    let output = add_attachment(MODULE, "handle", &[0.5, 1.0]).unwrap();
    let expected = MODULE.replace(
        "    {id: \"something\", value: \"DUMMY\", loc: \"DUMMY\"},\n",
        "    {id: \"something\", value: \"DUMMY\", loc: \"DUMMY\"},\n    {id: \"handle\", value: handle, loc: [0.5, 1]},\n",
    );
    assert_eq!(output, expected);
}

#[test]
fn declaration_inserted_before_collection_keeps_comment_above() {
    let output = insert_declaration_before(MODULE, "MESH_ATTACHMENTS", "handle").unwrap();
    assert!(output.contains(
        "// Attachment points for the base mesh.\nconst handle = null;\nconst MESH_ATTACHMENTS = ["
    ));
    assert_eq!(output.len(), MODULE.len() + "const handle = null;\n".len());
}

#[test]
fn first_declaration_in_document_order_wins() {
    let output = remove_object_item(MODULE, "options", "local").unwrap();
    // the inner `options` is shadowed by the top-level one, which has no `local`
    assert_eq!(output, MODULE);

    let output = insert_object_item(MODULE, "options", "dpr", 2).unwrap();
    assert!(output.contains("    quality: \"high\",\n    dpr: 2,\n};"));
    assert!(output.contains("const options = {local: 1};"));
}

#[test]
fn quoted_and_bare_keys_are_equivalent() {
    let output = remove_object_item(MODULE, "options", "antialias").unwrap();
    assert!(output.contains("const options = {\n    shadows: false, // expensive\n"));
    assert!(!output.contains("antialias"));

    let output = remove_object_item(MODULE, "options", "shadows").unwrap();
    assert!(output.contains("    'antialias': true,\n    quality: \"high\",\n"));
    assert!(!output.contains("expensive"));
}

#[test]
fn append_then_remove_restores_empty_array() {
    let source = "let queue = [];\n";
    let appended = append_array_element(source, "queue", "{job: 1}").unwrap();
    assert_eq!(appended, "let queue = [{job: 1}];\n");
    assert_eq!(remove_array_element(&appended, "queue", 0).unwrap(), source);
}

#[test]
fn insert_at_len_matches_append() {
    let source = "var xs = [\n  'a',\n  'b'\n];";
    assert_eq!(
        insert_array_element(source, "xs", 2, "'c'").unwrap(),
        append_array_element(source, "xs", "'c'").unwrap()
    );
    assert_eq!(
        append_array_element(source, "xs", "'c'").unwrap(),
        "var xs = [\n  'a',\n  'b',\n  'c'\n];"
    );
}

#[test]
fn remove_declaration_inside_function_body() {
    let source = "function f() {\n  let a = 1;\n  let b = 2;\n  return a;\n}\n";
    assert_eq!(
        remove_declaration(source, "b").unwrap(),
        "function f() {\n  let a = 1;\n  return a;\n}\n"
    );
}

#[test]
fn type_mismatch_reports_found_kind() {
    let err = remove_array_element(MODULE, "options", 0).unwrap_err();
    assert_eq!(
        err,
        EditorError::TypeMismatch {
            name: "options".to_string(),
            expected: ContainerKind::Array,
            found: "object".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "'options' is initialized with object, expected an array"
    );
}
