//! Tree-sitter integration for structural JavaScript queries.
//!
//! This module provides CST-based span location using tree-sitter. Every node
//! keeps its exact byte range, so edits computed from the tree can be applied
//! to the original text without losing comments or formatting.

pub mod errors;
pub mod locator;
pub mod parser;
pub mod validator;

pub use errors::TreeSitterError;
pub use locator::{find_declarator, DeclarationKind, Declarator};
pub use parser::{JsParser, ParsedSource};
pub use validator::validate_expression;
