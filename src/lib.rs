//! Lossless lexer and precedence-climbing parser for the Maho language.
//!
//! Source text goes through two stages: [`lex`] turns it into tokens that
//! carry their surrounding whitespace and comments as trivia, and [`parse`]
//! builds a [`SyntaxTree`] of statements and expressions. Neither stage
//! fails. Unknown characters become `BadToken`s, absent tokens become
//! `MissingToken`s, and both are reported as diagnostics next to a complete
//! tree.
//!
//! # Quick start
//!
//! ## Lex, parse, and print the tree
//!
//! ```
//! use maho_syntax::{SourceText, format_tree, lex, parse};
//!
//! let source = SourceText::new("int x = 1 + 2 * 3;");
//! let tokens = lex(&source);
//! let tree = parse(&tokens);
//! assert!(tree.diagnostics.is_empty());
//! assert_eq!(tree.full_text(), source.as_str());
//! assert!(format_tree(&tree).starts_with("VariableInitializationStatement"));
//! ```
//!
//! ## Strict parsing
//!
//! ```
//! use maho_syntax::{Error, SourceText, parse_str};
//!
//! let source = SourceText::new("x = 1");
//! let err = parse_str(&source).unwrap_err();
//! assert!(matches!(err, Error::Parse(_)));
//! assert_eq!(source.line_position(err.span().start).to_string(), "1:6");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod text;
pub mod token;

pub use ast::{AssignmentExpression, Expression, Statement, SyntaxTree};
pub use lexer::{LexError, LexErrorKind, lex, tokenize};
pub use parser::{ParseError, ParseErrorKind, parse};
pub use printer::{format_tokens, format_tree, full_text};
pub use text::{LinePosition, SourceText, TextLine, TextSpan};
pub use token::{SyntaxTrivia, SyntaxTriviaKind, Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer diagnostic.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser diagnostic.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    #[must_use]
    pub const fn span(&self) -> TextSpan {
        match self {
            Self::Lex(error) => error.span,
            Self::Parse(error) => error.span,
        }
    }
}

/// Every lexical and syntactic diagnostic of one parse, in source order.
#[must_use]
pub fn diagnostics(tokens: &[Token<'_>], tree: &SyntaxTree<'_>) -> Vec<Error> {
    let mut errors: Vec<Error> = lexer::errors(tokens)
        .into_iter()
        .map(Error::from)
        .chain(tree.diagnostics.iter().cloned().map(Error::from))
        .collect();
    errors.sort_by_key(|error| error.span().start);
    errors
}

/// Lex and parse a source text in one step, failing on the first
/// diagnostic.
pub fn parse_str(source: &SourceText) -> Result<SyntaxTree<'_>, Error> {
    let tokens = lex(source);
    if let Some(error) = lexer::errors(&tokens).into_iter().next() {
        return Err(error.into());
    }

    let tree = parse(&tokens);
    match tree.diagnostics.first() {
        Some(error) => Err(error.clone().into()),
        None => Ok(tree),
    }
}
