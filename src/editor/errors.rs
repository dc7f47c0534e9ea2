use crate::edit::EditError;
use crate::region::RegionError;
use crate::ts::TreeSitterError;
use std::fmt;
use thiserror::Error;

/// Container an operation expects a declaration's initializer to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Array,
    Object,
}

impl ContainerKind {
    /// Tree-sitter node kind of the container literal.
    pub fn node_kind(self) -> &'static str {
        match self {
            ContainerKind::Array => "array",
            ContainerKind::Object => "object",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Array => write!(f, "an array"),
            ContainerKind::Object => write!(f, "an object"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("parse failure: {0}")]
    Parse(#[from] TreeSitterError),

    #[error("location out of range: {0}")]
    Region(#[from] RegionError),

    #[error("edit failed: {0}")]
    Edit(#[from] EditError),

    #[error("no declaration named '{name}'")]
    TargetNotFound { name: String },

    #[error("object '{name}' has no key '{key}'")]
    KeyNotFound { name: String, key: String },

    #[error("index {index} is out of range for '{name}' ({len} elements)")]
    IndexOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },

    #[error("'{name}' is initialized with {found}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: ContainerKind,
        found: String,
    },

    #[error("edit produced invalid JavaScript: {0}")]
    InvalidResult(#[source] TreeSitterError),
}
