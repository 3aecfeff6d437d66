use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeSitterError {
    #[error("failed to set language for parser")]
    LanguageSet,

    #[error("failed to parse source code")]
    ParseFailed,

    #[error("syntax tree nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("syntax error at line {line}, column {column} (bytes {byte_start}..{byte_end})")]
    SyntaxError {
        line: usize,
        column: usize,
        byte_start: usize,
        byte_end: usize,
    },

    #[error("multiple syntax errors detected: {count} ERROR nodes")]
    MultipleSyntaxErrors { count: usize },
}
