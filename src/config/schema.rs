use crate::config::settings::EditorSettings;
use crate::editor::EditOperation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered batch of edits applied to one source text.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct EditScript {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub settings: EditorSettings,
    #[serde(default)]
    pub edits: Vec<EditStep>,
}

impl EditScript {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.edits.is_empty() {
            issues.push(ValidationIssue::EmptyEditList);
        }

        for (step, edit) in self.edits.iter().enumerate() {
            let mut require = |field: &'static str, value: &str| {
                if value.trim().is_empty() {
                    issues.push(ValidationIssue::MissingField {
                        step,
                        id: edit.id.clone(),
                        field,
                    });
                }
            };

            match &edit.operation {
                EditOperation::InsertDeclaration {
                    anchor, name, init, ..
                } => {
                    require("operation.anchor", anchor);
                    require("operation.name", name);
                    if let Some(init) = init {
                        require("operation.init", init);
                    }
                }
                EditOperation::RemoveDeclaration { name } => require("operation.name", name),
                EditOperation::InsertArrayElement { array, element, .. }
                | EditOperation::AppendArrayElement { array, element } => {
                    require("operation.array", array);
                    require("operation.element", element);
                }
                EditOperation::RemoveArrayElement { array, .. } => {
                    require("operation.array", array)
                }
                EditOperation::InsertObjectItem { object, key, .. }
                | EditOperation::ReplaceObjectItem { object, key, .. }
                | EditOperation::RemoveObjectItem { object, key } => {
                    require("operation.object", object);
                    require("operation.key", key);
                }
                EditOperation::AddAttachment { id, .. } => require("operation.id", id),
                EditOperation::DeclareAttachment { name } => require("operation.name", name),
                EditOperation::ReplaceText { location, .. } => {
                    if location.end < location.start {
                        issues.push(ValidationIssue::InvalidCombo {
                            step,
                            id: edit.id.clone(),
                            message: format!("location end {} precedes start {}", location.end, location.start),
                        });
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EditStep {
    #[serde(default)]
    pub id: Option<String>,
    pub operation: EditOperation,
}

impl EditStep {
    /// `id` if the step has one, otherwise its 1-based position.
    pub fn label(&self, step: usize) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("#{}", step + 1))
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyEditList,
    MissingField {
        step: usize,
        id: Option<String>,
        field: &'static str,
    },
    InvalidCombo {
        step: usize,
        id: Option<String>,
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyEditList => write!(f, "edit script contains no edits"),
            ValidationIssue::MissingField { step, id, field } => match id {
                Some(id) => write!(f, "edit '{id}' missing required field '{field}'"),
                None => write!(f, "edit #{} missing required field '{field}'", step + 1),
            },
            ValidationIssue::InvalidCombo { step, id, message } => match id {
                Some(id) => write!(f, "edit '{id}' has invalid configuration: {message}"),
                None => write!(f, "edit #{} has invalid configuration: {message}", step + 1),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(operation: EditOperation) -> EditStep {
        EditStep {
            id: None,
            operation,
        }
    }

    #[test]
    fn empty_script_is_invalid() {
        let err = EditScript::default().validate().unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::EmptyEditList]);
    }

    #[test]
    fn blank_fields_are_reported_per_step() {
        let script = EditScript {
            edits: vec![
                step(EditOperation::RemoveDeclaration {
                    name: "ok".to_string(),
                }),
                step(EditOperation::AppendArrayElement {
                    array: "arr".to_string(),
                    element: "  ".to_string(),
                }),
            ],
            ..EditScript::default()
        };
        let err = script.validate().unwrap_err();
        assert_eq!(
            err.issues,
            vec![ValidationIssue::MissingField {
                step: 1,
                id: None,
                field: "operation.element",
            }]
        );
        assert_eq!(
            err.to_string(),
            "edit #2 missing required field 'operation.element'"
        );
    }

    #[test]
    fn label_prefers_id() {
        let mut edit = step(EditOperation::DeclareAttachment {
            name: "x".to_string(),
        });
        assert_eq!(edit.label(0), "#1");
        edit.id = Some("declare-x".to_string());
        assert_eq!(edit.label(0), "declare-x");
    }
}
