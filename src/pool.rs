//! Thread-local parser pooling.
//!
//! Keeps one JavaScript parser per thread so repeated edits do not rebuild the
//! grammar. A pooled parser holds no document state between calls: every parse
//! starts from scratch.

use crate::ts::{JsParser, TreeSitterError};
use std::cell::RefCell;

thread_local! {
    static JS_PARSER: RefCell<Option<JsParser>> = const { RefCell::new(None) };
}

/// Execute function with pooled parser instance.
///
/// Must not be nested: the closure may not call back into `with_parser` (or
/// anything that does, such as [`crate::ts::validate_expression`]).
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use js_patcher::pool::with_parser;
///
/// let has_errors = with_parser(|parser| {
///     parser.parse_with_source("const a = 1;").map(|parsed| parsed.has_errors())
/// })??;
/// assert!(!has_errors);
/// # Ok(())
/// # }
/// ```
pub fn with_parser<F, R>(f: F) -> Result<R, TreeSitterError>
where
    F: FnOnce(&mut JsParser) -> R,
{
    JS_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(JsParser::new()?);
        }
        match slot.as_mut() {
            Some(parser) => Ok(f(parser)),
            None => Err(TreeSitterError::ParseFailed),
        }
    })
}
