//! Error types for the circuit language parser.

use thiserror::Error;

/// Errors that can occur during parsing. Lines and columns are one-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Lexer error (invalid token).
    #[error("Lexer error at line {line}, column {column}: {message}")]
    Lexer {
        line: usize,
        column: usize,
        message: String,
    },

    /// Unexpected token.
    #[error("Unexpected token at line {line}, column {column}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        line: usize,
        column: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    /// Parentheses or function calls nested too deeply.
    #[error("Expression nesting exceeds {limit} levels at line {line}")]
    NestingTooDeep { line: usize, limit: usize },
}

/// Result type for parsing operations.
pub type SyntaxResult<T> = Result<T, SyntaxError>;
