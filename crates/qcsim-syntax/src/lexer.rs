//! Lexer for the qcsim circuit language.

use logos::Logos;
use std::ops::Range;

/// Tokens of the circuit language.
///
/// Keywords (`measure`, `cnot`, `pi`, `sin`, ...) are lexed as identifiers and
/// told apart by the parser, so a variable may share a name with a gate.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    #[token("|0>")]
    KetZero,

    #[token("|1>")]
    KetOne,

    /// Real or imaginary (`i`-suffixed) literal. The text is read back from
    /// the span.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?i?")]
    Number,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[token("=")]
    Eq,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("^")]
    Caret,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,
}

impl Token {
    /// Node kind for an anonymous leaf holding this token.
    pub fn literal(&self) -> &'static str {
        match self {
            Token::KetZero => "|0>",
            Token::KetOne => "|1>",
            Token::Number => "number",
            Token::Identifier(_) => "identifier",
            Token::Eq => "=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Caret => "^",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Comma => ",",
            Token::Semicolon => ";",
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Identifier(s) => write!(f, "{s}"),
            other => write!(f, "{}", other.literal()),
        }
    }
}

/// A token with its byte span.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Range<usize>,
}

/// Tokenize a source string.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken, (Range<usize>, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        if let Ok(token) = result {
            tokens.push(Ok(SpannedToken { token, span }));
        } else {
            let slice = &source[span.clone()];
            tokens.push(Err((span, format!("Invalid token: '{slice}'"))));
        }
    }

    tokens
}
