//! JS Patcher: formatting-preserving edits to JavaScript source
//!
//! Two layers, both working on plain source text:
//!
//! - [`region`] extracts and splices text by line/column [`Location`].
//! - [`editor`] inserts and removes declarations, array elements and object
//!   items, addressed by the name of the declaration that holds them.
//!
//! # Architecture
//!
//! All structural operations compile down to a single primitive: [`Edit`], a
//! verified byte-span replacement against the original text. The tree-sitter
//! tree is only used to find spans; it is never printed. Code outside the
//! edited spans is returned byte for byte, comments and whitespace included.
//!
//! [`SourceTree`] wraps a parsed source as an immutable value. Every edit
//! yields a new, re-parsed tree.
//!
//! # Example
//!
//! ```
//! use js_patcher::{append_array_element, remove_object_item};
//!
//! let source = "const arr = [1, 2]; // keep me\nconst obj = {'a': 1, b: 2};";
//! let source = append_array_element(source, "arr", "3").unwrap();
//! let source = remove_object_item(&source, "obj", "a").unwrap();
//! assert_eq!(source, "const arr = [1, 2, 3]; // keep me\nconst obj = {b: 2};");
//! ```

pub mod config;
pub mod edit;
pub mod editor;
pub mod pool;
pub mod region;
pub mod tree;
pub mod ts;

// Re-exports
pub use config::{
    apply_script, load_from_json_str, load_from_str, ConfigError, EditScript, EditStep,
    EditorSettings, LineSeparator, ScriptError, ScriptOutput, StepResult, LINE_SEPARATOR,
};
pub use edit::{Edit, EditError, EditVerification};
pub use editor::{
    add_attachment, append_array_element, insert_array_element, insert_declaration_before,
    insert_object_item, remove_array_element, remove_declaration, remove_object_item,
    replace_object_item, ContainerKind, EditOperation, Editor, EditorError, Literal,
};
pub use region::{extract_text, replace_text, LineIndex, Location, Position, RegionError};
pub use tree::SourceTree;
pub use ts::{DeclarationKind, Declarator, TreeSitterError};
