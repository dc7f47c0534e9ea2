use crate::config::LineSeparator;
use crate::region::{LineIndex, Location, RegionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tree_sitter::Node;

/// Keyword a declaration statement was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    #[default]
    Const,
    Let,
    Var,
}

impl DeclarationKind {
    pub fn keyword(self) -> &'static str {
        match self {
            DeclarationKind::Const => "const",
            DeclarationKind::Let => "let",
            DeclarationKind::Var => "var",
        }
    }

    fn of_statement(statement: Node<'_>, source: &str) -> Option<Self> {
        match statement.kind() {
            "variable_declaration" => Some(DeclarationKind::Var),
            "lexical_declaration" => match &source[statement.child(0)?.byte_range()] {
                "const" => Some(DeclarationKind::Const),
                "let" => Some(DeclarationKind::Let),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A located `name = value` binding and the statement that holds it.
#[derive(Debug, Clone, Copy)]
pub struct Declarator<'t> {
    node: Node<'t>,
    source: &'t str,
}

impl<'t> Declarator<'t> {
    /// The `variable_declarator` node.
    pub fn node(&self) -> Node<'t> {
        self.node
    }

    pub fn name(&self) -> &'t str {
        binding_name(self.node, self.source).unwrap_or_default()
    }

    /// The declaration statement (`lexical_declaration` or
    /// `variable_declaration`) the declarator belongs to.
    pub fn statement(&self) -> Option<Node<'t>> {
        self.node.parent()
    }

    /// The outermost node to treat as "the declaration" when inserting
    /// before or removing it: the statement, or its `export` wrapper.
    pub fn outer_statement(&self) -> Option<Node<'t>> {
        let statement = self.statement()?;
        match statement.parent() {
            Some(parent) if parent.kind() == "export_statement" => Some(parent),
            _ => Some(statement),
        }
    }

    pub fn kind(&self) -> Option<DeclarationKind> {
        DeclarationKind::of_statement(self.statement()?, self.source)
    }

    /// All declarators of the enclosing statement, in order.
    pub fn siblings(&self) -> Vec<Node<'t>> {
        let Some(statement) = self.statement() else {
            return vec![self.node];
        };
        let mut cursor = statement.walk();
        statement
            .named_children(&mut cursor)
            .filter(|node| node.kind() == "variable_declarator")
            .collect()
    }

    /// The initializer expression, if any.
    pub fn value(&self) -> Option<Node<'t>> {
        self.node.child_by_field_name("value")
    }

    /// Tree-sitter kind of the initializer (`array`, `object`, `number`, ...).
    pub fn value_kind(&self) -> Option<&'static str> {
        self.value().map(|node| node.kind())
    }

    pub fn value_text(&self) -> Option<&'t str> {
        self.value().map(|node| &self.source[node.byte_range()])
    }

    pub fn text(&self) -> &'t str {
        &self.source[self.node.byte_range()]
    }

    /// Line/column location of the whole declarator.
    pub fn location(&self, separator: LineSeparator) -> Result<Location, RegionError> {
        LineIndex::new(self.source, separator).location(self.node.byte_range())
    }

    /// Line/column location of the initializer, if any.
    pub fn value_location(
        &self,
        separator: LineSeparator,
    ) -> Result<Option<Location>, RegionError> {
        self.value()
            .map(|value| LineIndex::new(self.source, separator).location(value.byte_range()))
            .transpose()
    }
}

fn binding_name<'s>(declarator: Node<'_>, source: &'s str) -> Option<&'s str> {
    let name = declarator.child_by_field_name("name")?;
    (name.kind() == "identifier").then(|| &source[name.byte_range()])
}

/// Find the first declarator binding `name`, in document order.
///
/// Walks depth-first from `root` and stops at the first match without
/// descending any further; shadowing declarations in nested scopes are
/// never considered once an outer one has matched.
pub fn find_declarator<'t>(root: Node<'t>, source: &'t str, name: &str) -> Option<Declarator<'t>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.kind() == "variable_declarator" && binding_name(node, source) == Some(name) {
            return Some(Declarator { node, source });
        }

        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
