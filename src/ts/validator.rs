use crate::pool::with_parser;
use crate::ts::errors::TreeSitterError;
use crate::ts::parser::{JsParser, ParsedSource};

/// Validate that `snippet` is exactly one JavaScript expression.
pub fn validate_expression(snippet: &str) -> Result<(), TreeSitterError> {
    with_parser(|parser| check_expression(parser, snippet))?
}

/// Fail with the first ERROR/MISSING node of an already parsed source.
pub(crate) fn ensure_valid(parsed: &ParsedSource<'_>) -> Result<(), TreeSitterError> {
    if !parsed.has_errors() {
        return Ok(());
    }

    let errors = parsed.error_nodes();
    let (line, column) = errors
        .first()
        .map(|e| (e.start_point.row + 1, e.start_point.column))
        .unwrap_or((1, 0));

    match errors.len() {
        0 | 1 => Err(TreeSitterError::SyntaxError {
            line,
            column,
            byte_start: errors.first().map_or(0, |e| e.byte_start),
            byte_end: errors.first().map_or(0, |e| e.byte_end),
        }),
        count => Err(TreeSitterError::MultipleSyntaxErrors {
            count,
            line,
            column,
        }),
    }
}

const EXPRESSION_PREFIX: &str = "(\n";
const EXPRESSION_SUFFIX: &str = "\n);";

/// The snippet is wrapped in parentheses on their own lines and accepted
/// only if the wrapper parses as a single statement whose parentheses are the
/// ones we added, holding one non-sequence expression. A trailing line
/// comment is rejected: the snippet is spliced in front of a `,` or bracket.
pub(crate) fn check_expression(parser: &mut JsParser, snippet: &str) -> Result<(), TreeSitterError> {
    let invalid = |reason: &str| TreeSitterError::InvalidExpression {
        snippet: snippet.to_string(),
        reason: reason.to_string(),
    };

    if snippet.trim().is_empty() {
        return Err(invalid("empty"));
    }

    let wrapped = format!("{EXPRESSION_PREFIX}{snippet}{EXPRESSION_SUFFIX}");
    let parsed = parser.parse_with_source(&wrapped)?;
    if parsed.has_errors() {
        return Err(invalid("syntax error"));
    }

    let root = parsed.root_node();
    let mut cursor = root.walk();
    let statements: Vec<_> = root
        .named_children(&mut cursor)
        .filter(|node| !node.is_extra())
        .collect();
    let [statement] = statements.as_slice() else {
        return Err(invalid("more than one statement"));
    };

    let parenthesized = statement
        .named_child(0)
        .filter(|node| node.kind() == "parenthesized_expression")
        .ok_or_else(|| invalid("not an expression"))?;

    let expected_end = wrapped.len() - EXPRESSION_SUFFIX.len() + 2;
    if parenthesized.start_byte() != 0 || parenthesized.end_byte() != expected_end {
        return Err(invalid("unbalanced parentheses"));
    }

    let mut inner = parenthesized.walk();
    let expression = parenthesized
        .named_children(&mut inner)
        .find(|node| !node.is_extra())
        .ok_or_else(|| invalid("not an expression"))?;
    if expression.kind() == "sequence_expression" {
        return Err(invalid("comma-separated expressions"));
    }

    let close = parenthesized.end_byte() - 1;
    if ends_in_line_comment(&wrapped[expression.end_byte()..close]) {
        return Err(invalid("ends in a line comment"));
    }

    Ok(())
}

/// `tail` holds only whitespace and comments; true if one of them is a `//`
/// comment, which would swallow whatever gets written after the snippet.
fn ends_in_line_comment(tail: &str) -> bool {
    let mut rest = tail.trim_start();
    loop {
        if rest.starts_with("//") {
            return true;
        }
        let Some(block) = rest.strip_prefix("/*") else {
            return false;
        };
        match block.find("*/") {
            Some(end) => rest = block[end + 2..].trim_start(),
            None => return false,
        }
    }
}
