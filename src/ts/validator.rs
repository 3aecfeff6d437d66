use crate::pool::with_parser;
use crate::ts::context::ParseContext;
use crate::ts::errors::TreeSitterError;
use crate::ts::parser::ErrorNode;

/// Validate that TypeScript source code has no syntax errors.
///
/// Returns Ok(()) if the code parses without ERROR or MISSING nodes.
pub fn validate_syntax(source: &str) -> Result<(), TreeSitterError> {
    let errors = with_parser(|parser| {
        parser
            .parse_with_source(source)
            .map(|parsed| parsed.error_nodes())
    })??;

    into_result(&errors)
}

/// Check if a fragment is valid once embedded in the given parse context.
pub fn validate_snippet(snippet: &str, context: ParseContext) -> Result<(), TreeSitterError> {
    validate_syntax(&context.embed(snippet))
}

fn into_result(errors: &[ErrorNode]) -> Result<(), TreeSitterError> {
    match errors {
        [] => Ok(()),
        [only] => Err(TreeSitterError::SyntaxError {
            line: only.line,
            column: only.column,
            byte_start: only.byte_start,
            byte_end: only.byte_end,
        }),
        many => Err(TreeSitterError::MultipleSyntaxErrors { count: many.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_valid_syntax() {
        let source = r#"
function main(): void {
    console.log("hello");
}
"#;
        assert!(validate_syntax(source).is_ok());
    }

    #[test]
    fn validate_invalid_syntax() {
        let source = "function main( { }";
        let result = validate_syntax(source);
        assert!(result.is_err());
    }

    #[test]
    fn single_error_reports_position() {
        let source = "let ok = 1;\nconst = 2;\n";
        match validate_syntax(source) {
            Err(TreeSitterError::SyntaxError { line, .. }) => assert_eq!(line, 2),
            Err(TreeSitterError::MultipleSyntaxErrors { count }) => assert!(count > 1),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn validate_type_snippet() {
        assert!(validate_snippet("Array<string>", ParseContext::TypeReference).is_ok());
        assert!(validate_snippet("{ a: number }", ParseContext::TypeReference).is_ok());
        assert!(validate_snippet("Array<", ParseContext::TypeReference).is_err());
    }

    #[test]
    fn validate_method_snippet() {
        assert!(validate_snippet("area(): number { return 1; }", ParseContext::Method).is_ok());
        assert!(validate_snippet("area(: number {", ParseContext::Method).is_err());
    }
}
