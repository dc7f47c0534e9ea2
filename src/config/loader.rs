use crate::config::schema::{EditScript, ValidationError};
use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    Toml {
        source: toml_edit::de::Error,
    },
    Json {
        source: serde_json::Error,
    },
    Validation {
        name: Option<String>,
        source: ValidationError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Toml { source } => {
                write!(f, "failed to parse edit script TOML: {}", source)
            }
            ConfigError::Json { source } => {
                write!(f, "failed to parse edit script JSON: {}", source)
            }
            ConfigError::Validation { name, source } => match name {
                Some(name) => write!(f, "invalid edit script ({}): {}", name, source),
                None => write!(f, "invalid edit script: {}", source),
            },
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Toml { source } => Some(source),
            ConfigError::Json { source } => Some(source),
            ConfigError::Validation { source, .. } => Some(source),
        }
    }
}

pub fn load_from_str(input: &str) -> Result<EditScript, ConfigError> {
    let script: EditScript =
        toml_edit::de::from_str(input).map_err(|source| ConfigError::Toml { source })?;
    validated(script)
}

pub fn load_from_json_str(input: &str) -> Result<EditScript, ConfigError> {
    let script: EditScript =
        serde_json::from_str(input).map_err(|source| ConfigError::Json { source })?;
    validated(script)
}

fn validated(script: EditScript) -> Result<EditScript, ConfigError> {
    script.validate().map_err(|source| ConfigError::Validation {
        name: Some(script.meta.name.clone()).filter(|name| !name.is_empty()),
        source,
    })?;
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LineSeparator, ValidationIssue};
    use crate::editor::EditOperation;
    use crate::region::{Location, Position};
    use crate::ts::DeclarationKind;

    #[test]
    fn loads_toml_script() {
        let script = load_from_str(
            r#"
[meta]
name = "mesh-setup"
description = "register the handle attachment"

[settings]
line_separator = "crlf"
require_target = true

[[edits]]
id = "declare"
operation = { type = "declare-attachment", name = "handle" }

[[edits]]
[edits.operation]
type = "insert-declaration"
anchor = "config"
name = "limits"
kind = "let"
init = "[1, 2]"

[[edits]]
operation = { type = "add-attachment", id = "handle", loc = [1.0, 2.5] }
"#,
        )
        .unwrap();

        assert_eq!(script.meta.name, "mesh-setup");
        assert_eq!(script.settings.line_separator, LineSeparator::CrLf);
        assert!(script.settings.require_target);
        assert_eq!(script.edits.len(), 3);
        assert_eq!(script.edits[0].id.as_deref(), Some("declare"));
        assert_eq!(
            script.edits[1].operation,
            EditOperation::InsertDeclaration {
                anchor: "config".to_string(),
                name: "limits".to_string(),
                kind: DeclarationKind::Let,
                init: Some("[1, 2]".to_string()),
            }
        );
        assert_eq!(
            script.edits[2].operation,
            EditOperation::AddAttachment {
                id: "handle".to_string(),
                loc: vec![1.0, 2.5],
            }
        );
    }

    #[test]
    fn loads_json_script_with_defaults() {
        let script = load_from_json_str(
            r#"{
                "edits": [
                    {"operation": {"type": "replace-text",
                        "location": {"start": {"line": 1, "column": 0}, "end": {"line": 1, "column": 5}},
                        "text": "let"}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.settings.line_separator, LineSeparator::Lf);
        assert!(!script.settings.require_target);
        assert_eq!(
            script.edits[0].operation,
            EditOperation::ReplaceText {
                location: Location::new(Position::new(1, 0), Position::new(1, 5)),
                text: "let".to_string(),
            }
        );
    }

    #[test]
    fn unknown_operation_type_is_parse_error() {
        let err = load_from_str(
            r#"
[[edits]]
operation = { type = "rename-declaration", name = "a" }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn empty_script_fails_validation() {
        let err = load_from_str("[meta]\nname = \"nothing\"\n").unwrap_err();
        match err {
            ConfigError::Validation { name, source } => {
                assert_eq!(name.as_deref(), Some("nothing"));
                assert_eq!(source.issues, vec![ValidationIssue::EmptyEditList]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_key_fails_validation() {
        let err = load_from_json_str(
            r#"{"edits": [{"id": "drop", "operation": {"type": "remove-object-item", "object": "obj", "key": ""}}]}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid edit script: edit 'drop' missing required field 'operation.key'"
        );
    }
}
