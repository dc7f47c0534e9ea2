use crate::config::LineSeparator;
use crate::edit::Edit;
use crate::editor::container::{is_blank, last_on_line, remove_from_list};
use crate::ts::Declarator;
use std::ops::Range;
use tree_sitter::Node;

/// Insert `statement_text` right before the statement holding `anchor`.
///
/// When the anchor statement starts its line, the new statement gets its own
/// line with the anchor's indentation; otherwise it is joined with a space.
pub(crate) fn insert_before(
    source: &str,
    anchor: &Declarator<'_>,
    statement_text: &str,
    separator: LineSeparator,
) -> Edit {
    let statement = anchor.outer_statement().unwrap_or_else(|| anchor.node());
    let start = statement.start_byte();
    let line_start = source[..start].rfind('\n').map_or(0, |idx| idx + 1);
    let indent = &source[line_start..start];

    let joiner = if is_blank(indent) {
        format!("{}{indent}", separator.as_str())
    } else {
        " ".to_string()
    };
    Edit::insert(start, format!("{statement_text}{joiner}"))
}

/// Statement lists a declaration can be deleted from outright. Anywhere else
/// (a `for` initializer, the body of an `if`) a statement is required, so
/// the declaration is replaced with an empty one.
const STATEMENT_LISTS: &[&str] = &["program", "statement_block", "switch_case", "switch_default"];

/// Remove `declarator`; a sole declarator takes its whole statement with it.
pub(crate) fn remove(source: &str, declarator: &Declarator<'_>) -> Vec<Edit> {
    let siblings = declarator.siblings();
    if siblings.len() > 1 {
        let index = siblings
            .iter()
            .position(|node| node.id() == declarator.node().id())
            .unwrap_or_default();
        return remove_from_list(source, &siblings, index);
    }

    let statement = declarator.outer_statement().unwrap_or_else(|| declarator.node());
    let in_list = statement
        .parent()
        .map_or(true, |parent| STATEMENT_LISTS.contains(&parent.kind()));
    if !in_list {
        return vec![Edit::replace(source, statement.byte_range(), ";")];
    }
    vec![Edit::delete(source, statement_removal_range(source, statement))]
}

/// The statement, its same-line trailing comments, plus the blank run that
/// separates it from a neighbour, so the neighbours end up separated the
/// way the statement was.
fn statement_removal_range(source: &str, statement: Node<'_>) -> Range<usize> {
    let start = statement.start_byte();
    let last = last_on_line(statement);
    let end = last.end_byte();

    if let Some(next) = last.next_named_sibling() {
        if is_blank(&source[end..next.start_byte()]) {
            return start..next.start_byte();
        }
    }
    if let Some(prev) = statement.prev_sibling() {
        if is_blank(&source[prev.end_byte()..start]) {
            return prev.end_byte()..end;
        }
    }
    start..end
}
