//! Thread-local parser pooling.
//!
//! Keeps one TypeScript parser per thread so repeated fragment parsing does
//! not rebuild the parser and reload the grammar. Trees are never cached:
//! every call parses its input from scratch.

use crate::ts::{TreeSitterError, TypeScriptParser};
use std::cell::RefCell;

thread_local! {
    static TS_PARSER: RefCell<Option<TypeScriptParser>> = const { RefCell::new(None) };
}

/// Execute function with pooled parser instance.
///
/// On first call per thread, creates new parser. Subsequent calls reuse
/// the same parser instance.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use ts_explorer::pool::with_parser;
///
/// let has_errors = with_parser(|parser| {
///     parser
///         .parse_with_source("const a = 1;")
///         .map(|parsed| parsed.has_errors())
/// })??;
/// assert!(!has_errors);
/// # Ok(())
/// # }
/// ```
pub fn with_parser<F, R>(f: F) -> Result<R, TreeSitterError>
where
    F: FnOnce(&mut TypeScriptParser) -> R,
{
    TS_PARSER.with(|cell| {
        let mut opt = cell.borrow_mut();
        let parser = match opt.take() {
            Some(parser) => parser,
            None => TypeScriptParser::new()?,
        };
        Ok(f(opt.insert(parser)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pooled_parser_parses_repeatedly() {
        let first = with_parser(|parser| parser.parse("let a = 1;").is_ok()).unwrap();
        let second = with_parser(|parser| parser.parse("let b = 2;").is_ok()).unwrap();
        assert!(first && second);
    }
}
