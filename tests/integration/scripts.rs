//! Edit scripts loaded from TOML and JSON, applied to a source text.

use super::init_logging;
use js_patcher::{
    apply_script, load_from_json_str, load_from_str, ConfigError, EditorError, StepResult,
};

const SCENE: &str = "import {Mesh} from './mesh.js';\n\nconst MESH_ATTACHMENTS = [];\nconst lights = ['key', 'fill', 'rim'];\nconst camera = {fov: 45, near: 0.1};\n";

const SCRIPT: &str = r#"
[meta]
name = "scene-setup"
description = "wire the weapon attachment and trim the rig"

[[edits]]
id = "declare-weapon"
operation = { type = "declare-attachment", name = "weapon" }

[[edits]]
id = "attach-weapon"
operation = { type = "add-attachment", id = "weapon", loc = [3, 4.5] }

[[edits]]
id = "drop-rim"
operation = { type = "remove-array-element", array = "lights", index = 2 }

[[edits]]
id = "prepend-ambient"
operation = { type = "insert-array-element", array = "lights", index = 0, element = "'ambient'" }

[[edits]]
id = "far-plane"
operation = { type = "insert-object-item", object = "camera", key = "far", value = 1000 }

[[edits]]
id = "camera-label"
operation = { type = "insert-object-item", object = "camera", key = "label", value = "main" }
"#;

#[test]
fn toml_script_end_to_end() {
    init_logging();

    let script = load_from_str(SCRIPT).unwrap();
    let output = apply_script(SCENE, &script).unwrap();

    assert_eq!(
        output.text,
        "import {Mesh} from './mesh.js';\n\nconst weapon = null;\nconst MESH_ATTACHMENTS = [{id: \"weapon\", value: weapon, loc: [3, 4.5]}];\nconst lights = ['ambient', 'key', 'fill'];\nconst camera = {fov: 45, near: 0.1, far: 1000, label: \"main\"};\n"
    );
    assert!(output.steps.iter().all(|step| *step == StepResult::Applied));
}

#[test]
fn strict_json_script_fails_on_missing_target() {
    let script = load_from_json_str(
        r#"{
            "meta": {"name": "strict"},
            "settings": {"require_target": true},
            "edits": [
                {"id": "ok", "operation": {"type": "remove-declaration", "name": "camera"}},
                {"id": "gone", "operation": {"type": "remove-object-item", "object": "camera", "key": "fov"}}
            ]
        }"#,
    )
    .unwrap();

    let err = apply_script(SCENE, &script).unwrap_err();
    assert_eq!(err.step, 1);
    assert_eq!(err.id.as_deref(), Some("gone"));
    assert!(matches!(err.source, EditorError::TargetNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "edit 'gone' failed: no declaration named 'camera'"
    );
}

#[test]
fn lenient_script_reports_unchanged_steps() {
    let script = load_from_str(
        r#"
[[edits]]
operation = { type = "remove-declaration", name = "missing" }

[[edits]]
operation = { type = "replace-text", location = { start = { line = 4, column = 0 }, end = { line = 4, column = 5 } }, text = "let" }
"#,
    )
    .unwrap();

    let output = apply_script(SCENE, &script).unwrap();
    assert_eq!(output.steps, vec![StepResult::Unchanged, StepResult::Applied]);
    assert!(output.text.contains("\nlet lights = ['key', 'fill', 'rim'];\n"));
}

#[test]
fn invalid_expression_aborts_script() {
    let script = load_from_str(
        r#"
[[edits]]
id = "broken"
operation = { type = "append-array-element", array = "lights", element = "'a' +" }
"#,
    )
    .unwrap();

    let err = apply_script(SCENE, &script).unwrap_err();
    assert!(matches!(err.source, EditorError::Parse(_)));
}

#[test]
fn malformed_script_is_rejected_on_load() {
    assert!(matches!(
        load_from_str("[[edits]]\noperation = { type = \"remove-declaration\" }\n"),
        Err(ConfigError::Toml { .. })
    ));
    assert!(matches!(
        load_from_json_str("{\"edits\": []}"),
        Err(ConfigError::Validation { .. })
    ));
}
