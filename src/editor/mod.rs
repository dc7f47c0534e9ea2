//! Structural edits addressed by declaration name.
//!
//! Every operation parses the source, walks to the first declarator bound to
//! the target name, computes byte-span [`Edit`]s against the original text and
//! applies them. Nothing outside those spans is re-printed, so untouched code
//! keeps its exact formatting. The result is re-parsed before it is returned;
//! an edit that would leave a syntax error fails instead.
//!
//! A name that resolves to nothing leaves the source unchanged unless
//! [`EditorSettings::require_target`] is set.

pub mod attachments;
mod container;
mod declarations;
pub mod errors;
pub mod literal;

pub use attachments::{attachment_entry, ATTACHMENTS};
pub use errors::{ContainerKind, EditorError};
pub use literal::Literal;

use crate::config::EditorSettings;
use crate::edit::Edit;
use crate::pool;
use crate::region::{self, Location};
use crate::ts::validator;
use crate::ts::{find_declarator, DeclarationKind, Declarator};
use container::{replace_entry_value, Container};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tree_sitter::Node;

/// One edit, as data. Scripts and [`crate::SourceTree::apply`] run these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EditOperation {
    InsertDeclaration {
        anchor: String,
        name: String,
        #[serde(default)]
        kind: DeclarationKind,
        /// Initializer expression; `null` when absent.
        #[serde(default)]
        init: Option<String>,
    },
    RemoveDeclaration {
        name: String,
    },
    InsertArrayElement {
        array: String,
        index: usize,
        element: String,
    },
    AppendArrayElement {
        array: String,
        element: String,
    },
    RemoveArrayElement {
        array: String,
        index: usize,
    },
    InsertObjectItem {
        object: String,
        key: String,
        value: Literal,
    },
    ReplaceObjectItem {
        object: String,
        key: String,
        value: Literal,
    },
    RemoveObjectItem {
        object: String,
        key: String,
    },
    AddAttachment {
        id: String,
        #[serde(default)]
        loc: Vec<f64>,
    },
    DeclareAttachment {
        name: String,
    },
    ReplaceText {
        location: Location,
        text: String,
    },
}

/// Structural editor carrying the settings every operation runs with.
#[derive(Debug, Clone, Copy, Default)]
pub struct Editor {
    settings: EditorSettings,
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> EditorSettings {
        self.settings
    }

    /// Run one [`EditOperation`] against `source`.
    pub fn apply(&self, source: &str, operation: &EditOperation) -> Result<String, EditorError> {
        match operation {
            EditOperation::InsertDeclaration {
                anchor,
                name,
                kind,
                init,
            } => self.insert_declaration_before_with(
                source,
                anchor,
                name,
                *kind,
                init.as_deref().unwrap_or("null"),
            ),
            EditOperation::RemoveDeclaration { name } => self.remove_declaration(source, name),
            EditOperation::InsertArrayElement {
                array,
                index,
                element,
            } => self.insert_array_element(source, array, *index, element),
            EditOperation::AppendArrayElement { array, element } => {
                self.append_array_element(source, array, element)
            }
            EditOperation::RemoveArrayElement { array, index } => {
                self.remove_array_element(source, array, *index)
            }
            EditOperation::InsertObjectItem { object, key, value } => {
                self.insert_object_item(source, object, key, value.clone())
            }
            EditOperation::ReplaceObjectItem { object, key, value } => {
                self.replace_object_item(source, object, key, value.clone())
            }
            EditOperation::RemoveObjectItem { object, key } => {
                self.remove_object_item(source, object, key)
            }
            EditOperation::AddAttachment { id, loc } => self.add_attachment(source, id, loc),
            EditOperation::DeclareAttachment { name } => self.declare_attachment(source, name),
            EditOperation::ReplaceText { location, text } => Ok(region::replace_text_with(
                source,
                location,
                text,
                self.settings.line_separator,
            )?),
        }
    }

    /// Insert `const <new_name> = null;` before the declaration of `anchor`.
    pub fn insert_declaration_before(
        &self,
        source: &str,
        anchor: &str,
        new_name: &str,
    ) -> Result<String, EditorError> {
        self.insert_declaration_before_with(source, anchor, new_name, DeclarationKind::Const, "null")
    }

    /// Insert `<kind> <new_name> = <init>;` before the declaration of `anchor`.
    pub fn insert_declaration_before_with(
        &self,
        source: &str,
        anchor: &str,
        new_name: &str,
        kind: DeclarationKind,
        init: &str,
    ) -> Result<String, EditorError> {
        let init = self.expression(init)?;
        let statement = format!("{kind} {new_name} = {init};");
        let separator = self.settings.line_separator;

        self.edit_declarator(source, anchor, |declarator| {
            Ok(vec![declarations::insert_before(
                source, declarator, &statement, separator,
            )])
        })
    }

    /// Remove the declarator bound to `name`, and its statement if it was the
    /// statement's only declarator.
    pub fn remove_declaration(&self, source: &str, name: &str) -> Result<String, EditorError> {
        self.edit_declarator(source, name, |declarator| {
            Ok(declarations::remove(source, declarator))
        })
    }

    /// Insert `element_text` at `index` of the array bound to `array_name`.
    /// Any index is accepted while the array is empty. As with
    /// [`Editor::remove_array_element`], holes are not counted.
    pub fn insert_array_element(
        &self,
        source: &str,
        array_name: &str,
        index: usize,
        element_text: &str,
    ) -> Result<String, EditorError> {
        self.insert_element(source, array_name, Some(index), element_text)
    }

    /// Append `element_text` to the array bound to `array_name`.
    pub fn append_array_element(
        &self,
        source: &str,
        array_name: &str,
        element_text: &str,
    ) -> Result<String, EditorError> {
        self.insert_element(source, array_name, None, element_text)
    }

    fn insert_element(
        &self,
        source: &str,
        array_name: &str,
        index: Option<usize>,
        element_text: &str,
    ) -> Result<String, EditorError> {
        let element = self.expression(element_text)?;

        self.edit_declarator(source, array_name, |declarator| {
            let array = Container::new(container_value(declarator, ContainerKind::Array)?);
            let index = index.unwrap_or(array.len());
            if index > array.len() && !array.is_empty() {
                return Err(EditorError::IndexOutOfRange {
                    name: array_name.to_string(),
                    index,
                    len: array.len(),
                });
            }
            Ok(vec![array.insert(source, index, &element)])
        })
    }

    /// Remove the element at `index` of the array bound to `array_name`.
    /// The array literal itself always stays.
    ///
    /// Indices count written elements only: holes (`[1, , 2]`) are not
    /// slots, so index 1 there is `2`. Removing the last element also drops
    /// the holes before it.
    pub fn remove_array_element(
        &self,
        source: &str,
        array_name: &str,
        index: usize,
    ) -> Result<String, EditorError> {
        self.edit_declarator(source, array_name, |declarator| {
            let array = Container::new(container_value(declarator, ContainerKind::Array)?);
            if index >= array.len() {
                return Err(EditorError::IndexOutOfRange {
                    name: array_name.to_string(),
                    index,
                    len: array.len(),
                });
            }
            Ok(array.remove(source, index))
        })
    }

    /// Append `key: value` to the object bound to `object_name`. The key is
    /// written as given.
    pub fn insert_object_item(
        &self,
        source: &str,
        object_name: &str,
        key: &str,
        value: impl Into<Literal>,
    ) -> Result<String, EditorError> {
        let entry = format!("{key}: {}", value.into().to_js());

        self.edit_declarator(source, object_name, |declarator| {
            let object = Container::new(container_value(declarator, ContainerKind::Object)?);
            Ok(vec![object.insert(source, object.len(), &entry)])
        })
    }

    /// Replace the value of the first entry keyed `key`.
    pub fn replace_object_item(
        &self,
        source: &str,
        object_name: &str,
        key: &str,
        value: impl Into<Literal>,
    ) -> Result<String, EditorError> {
        let value = value.into().to_js();

        self.edit_declarator(source, object_name, |declarator| {
            let object = Container::new(container_value(declarator, ContainerKind::Object)?);
            match object.position_of_key(source, key).and_then(|idx| object.item(idx)) {
                Some(entry) => Ok(vec![replace_entry_value(source, entry, key, &value)]),
                None => self.unmatched_key(object_name, key),
            }
        })
    }

    /// Remove the first entry keyed `key`, whether the key is written as an
    /// identifier or a quoted string.
    pub fn remove_object_item(
        &self,
        source: &str,
        object_name: &str,
        key: &str,
    ) -> Result<String, EditorError> {
        self.edit_declarator(source, object_name, |declarator| {
            let object = Container::new(container_value(declarator, ContainerKind::Object)?);
            match object.position_of_key(source, key) {
                Some(idx) => Ok(object.remove(source, idx)),
                None => self.unmatched_key(object_name, key),
            }
        })
    }

    /// Parse `source`, hand the first declarator named `name` to `plan` and
    /// apply the edits it returns.
    fn edit_declarator<F>(&self, source: &str, name: &str, plan: F) -> Result<String, EditorError>
    where
        F: FnOnce(&Declarator<'_>) -> Result<Vec<Edit>, EditorError>,
    {
        pool::with_parser(|parser| {
            let parsed = parser.parse_with_source(source)?;
            validator::ensure_valid(&parsed)?;

            let Some(declarator) = find_declarator(parsed.root_node(), source, name) else {
                return self.unmatched(source, name);
            };

            let edits = plan(&declarator)?;
            if edits.is_empty() {
                return Ok(source.to_string());
            }

            let output = Edit::apply_batch(source, edits)?;
            let reparsed = parser.parse_with_source(&output)?;
            validator::ensure_valid(&reparsed).map_err(EditorError::InvalidResult)?;
            Ok(output)
        })?
    }

    fn unmatched(&self, source: &str, name: &str) -> Result<String, EditorError> {
        if self.settings.require_target {
            return Err(EditorError::TargetNotFound {
                name: name.to_string(),
            });
        }
        log::debug!("no declaration named '{name}', source left unchanged");
        Ok(source.to_string())
    }

    fn unmatched_key(&self, object_name: &str, key: &str) -> Result<Vec<Edit>, EditorError> {
        if self.settings.require_target {
            return Err(EditorError::KeyNotFound {
                name: object_name.to_string(),
                key: key.to_string(),
            });
        }
        log::debug!("object '{object_name}' has no key '{key}', source left unchanged");
        Ok(Vec::new())
    }

    /// Caller-supplied expression text, trimmed, with its line breaks in the
    /// configured separator. Validated before any tree is touched.
    fn expression<'a>(&self, text: &'a str) -> Result<Cow<'a, str>, EditorError> {
        let text = self.settings.line_separator.normalize(text.trim());
        validator::validate_expression(&text)?;
        Ok(text)
    }
}

fn container_value<'t>(
    declarator: &Declarator<'t>,
    expected: ContainerKind,
) -> Result<Node<'t>, EditorError> {
    match declarator.value() {
        Some(value) if value.kind() == expected.node_kind() => Ok(value),
        other => Err(EditorError::TypeMismatch {
            name: declarator.name().to_string(),
            expected,
            found: other.map_or_else(|| "no initializer".to_string(), |node| node.kind().to_string()),
        }),
    }
}

/// [`Editor::insert_declaration_before`] with default settings.
pub fn insert_declaration_before(
    source: &str,
    anchor: &str,
    new_name: &str,
) -> Result<String, EditorError> {
    Editor::default().insert_declaration_before(source, anchor, new_name)
}

/// [`Editor::remove_declaration`] with default settings.
pub fn remove_declaration(source: &str, name: &str) -> Result<String, EditorError> {
    Editor::default().remove_declaration(source, name)
}

/// [`Editor::insert_array_element`] with default settings.
pub fn insert_array_element(
    source: &str,
    array_name: &str,
    index: usize,
    element_text: &str,
) -> Result<String, EditorError> {
    Editor::default().insert_array_element(source, array_name, index, element_text)
}

/// [`Editor::append_array_element`] with default settings.
pub fn append_array_element(
    source: &str,
    array_name: &str,
    element_text: &str,
) -> Result<String, EditorError> {
    Editor::default().append_array_element(source, array_name, element_text)
}

/// [`Editor::remove_array_element`] with default settings.
pub fn remove_array_element(
    source: &str,
    array_name: &str,
    index: usize,
) -> Result<String, EditorError> {
    Editor::default().remove_array_element(source, array_name, index)
}

/// [`Editor::insert_object_item`] with default settings.
pub fn insert_object_item(
    source: &str,
    object_name: &str,
    key: &str,
    value: impl Into<Literal>,
) -> Result<String, EditorError> {
    Editor::default().insert_object_item(source, object_name, key, value)
}

/// [`Editor::replace_object_item`] with default settings.
pub fn replace_object_item(
    source: &str,
    object_name: &str,
    key: &str,
    value: impl Into<Literal>,
) -> Result<String, EditorError> {
    Editor::default().replace_object_item(source, object_name, key, value)
}

/// [`Editor::remove_object_item`] with default settings.
pub fn remove_object_item(source: &str, object_name: &str, key: &str) -> Result<String, EditorError> {
    Editor::default().remove_object_item(source, object_name, key)
}

/// [`Editor::add_attachment`] with default settings.
pub fn add_attachment(source: &str, id: &str, location: &[f64]) -> Result<String, EditorError> {
    Editor::default().add_attachment(source, id, location)
}
