//! An immutable parsed source: the tree plus the exact text it came from.
//!
//! Every edit produces a new [`SourceTree`] parsed from freshly spliced text;
//! the tree is never patched in place, so node offsets never go stale.

use crate::config::EditorSettings;
use crate::editor::{EditOperation, Editor, EditorError};
use crate::pool;
use crate::region::{self, Location, RegionError};
use crate::ts::validator;
use crate::ts::{find_declarator, Declarator, TreeSitterError};
use std::fmt;
use tree_sitter::{Node, Tree};

#[derive(Debug, Clone)]
pub struct SourceTree {
    source: String,
    tree: Tree,
    settings: EditorSettings,
}

impl SourceTree {
    /// Parse with default settings. Source with syntax errors is rejected.
    pub fn parse(source: impl Into<String>) -> Result<Self, EditorError> {
        Self::parse_with(source, EditorSettings::default())
    }

    pub fn parse_with(
        source: impl Into<String>,
        settings: EditorSettings,
    ) -> Result<Self, EditorError> {
        let source = source.into();
        let tree = pool::with_parser(|parser| -> Result<Tree, TreeSitterError> {
            let parsed = parser.parse_with_source(&source)?;
            validator::ensure_valid(&parsed)?;
            Ok(parsed.tree)
        })??;
        Ok(Self {
            source,
            tree,
            settings,
        })
    }

    /// The text this tree was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    /// Render the tree back to text. Untouched nodes keep their original
    /// bytes, so this is exactly the source the tree was parsed from.
    pub fn to_source(&self) -> String {
        self.source.clone()
    }

    pub fn settings(&self) -> EditorSettings {
        self.settings
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Text covered by `location`.
    pub fn extract(&self, location: &Location) -> Result<&str, RegionError> {
        region::extract_text_with(&self.source, location, self.settings.line_separator)
    }

    /// Splice `new_text` over `location` and re-parse the result.
    pub fn replace_text(&self, location: &Location, new_text: &str) -> Result<Self, EditorError> {
        let spliced = region::replace_text_with(
            &self.source,
            location,
            new_text,
            self.settings.line_separator,
        )?;
        Self::parse_with(spliced, self.settings)
    }

    /// The first declarator bound to `name`, in document order.
    pub fn first_declaration(&self, name: &str) -> Option<Declarator<'_>> {
        find_declarator(self.tree.root_node(), &self.source, name)
    }

    /// Run a structural (or region) edit and re-parse the result.
    pub fn apply(&self, operation: &EditOperation) -> Result<Self, EditorError> {
        let output = Editor::new(self.settings).apply(&self.source, operation)?;
        Self::parse_with(output, self.settings)
    }
}

impl fmt::Display for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
