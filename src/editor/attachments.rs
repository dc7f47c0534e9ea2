//! Mesh attachment actions built from the structural primitives.
//!
//! Each action renders the literal text it needs and hands it to a primitive
//! operation against the [`ATTACHMENTS`] collection.

use crate::editor::{Editor, EditorError, Literal};

/// Name of the array declaration holding every attachment entry.
pub const ATTACHMENTS: &str = "MESH_ATTACHMENTS";

/// `{id: "<id>", value: <id>, loc: [<location>]}`
pub fn attachment_entry(id: &str, location: &[f64]) -> String {
    let loc = location
        .iter()
        .map(|coordinate| Literal::Number(*coordinate).to_js())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{{id: {}, value: {id}, loc: [{loc}]}}",
        Literal::from(id).to_js()
    )
}

impl Editor {
    /// Append an attachment entry for the binding `id` to [`ATTACHMENTS`].
    pub fn add_attachment(
        &self,
        source: &str,
        id: &str,
        location: &[f64],
    ) -> Result<String, EditorError> {
        self.append_array_element(source, ATTACHMENTS, &attachment_entry(id, location))
    }

    /// Declare `const <name> = null;` right before [`ATTACHMENTS`], so the
    /// binding an attachment refers to exists ahead of the collection.
    pub fn declare_attachment(&self, source: &str, name: &str) -> Result<String, EditorError> {
        self.insert_declaration_before(source, ATTACHMENTS, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_text() {
        assert_eq!(
            attachment_entry("new_id", &[1.0, 2.0]),
            r#"{id: "new_id", value: new_id, loc: [1, 2]}"#
        );
        assert_eq!(
            attachment_entry("p", &[]),
            r#"{id: "p", value: p, loc: []}"#
        );
    }

    #[test]
    fn add_attachment_appends_entry() {
        let source = "const MESH_ATTACHMENTS = [\n    {id: \"something\", value: \"DUMMY\", loc: \"DUMMY\"},\n];";
        let output = Editor::default()
            .add_attachment(source, "new_id", &[1.0, 2.5])
            .unwrap();
        assert_eq!(
            output,
            "const MESH_ATTACHMENTS = [\n    {id: \"something\", value: \"DUMMY\", loc: \"DUMMY\"},\n    {id: \"new_id\", value: new_id, loc: [1, 2.5]},\n];"
        );
    }

    #[test]
    fn add_attachment_rejects_non_identifier_id() {
        let source = "const MESH_ATTACHMENTS = [];";
        let result = Editor::default().add_attachment(source, "not an id", &[0.0]);
        assert!(matches!(result, Err(EditorError::Parse(_))));
    }

    #[test]
    fn declare_attachment_goes_before_collection() {
        let source = "import x from 'y';\nconst MESH_ATTACHMENTS = [];\n";
        assert_eq!(
            Editor::default().declare_attachment(source, "handle").unwrap(),
            "import x from 'y';\nconst handle = null;\nconst MESH_ATTACHMENTS = [];\n"
        );
    }
}
