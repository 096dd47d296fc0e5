use std::fmt;

use crate::text::{SourceText, TextSpan, line_break_width};
use crate::token::{SyntaxTrivia, SyntaxTriviaKind, Token, TokenKind};

/// Classifies a lexer diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
    /// `/*` without a closing `*/`.
    UnterminatedComment,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {ch:?}")
            }
            Self::UnterminatedComment => {
                write!(f, "unterminated block comment")
            }
        }
    }
}

/// Diagnostic recovered from a lexed token stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {span}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: TextSpan,
}

/// Lex a source text into tokens terminated by one `EndToken`.
#[must_use]
pub fn lex(source: &SourceText) -> Vec<Token<'_>> {
    tokenize(source.as_str())
}

/// Lex a string into tokens terminated by one `EndToken`.
///
/// Never fails: characters that start no token become one-character
/// `BadToken`s. Every byte of `input` ends up in exactly one token or
/// trivia span.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).tokenize()
}

/// Collect the lexical diagnostics embedded in a token stream.
#[must_use]
pub fn errors(tokens: &[Token<'_>]) -> Vec<LexError> {
    let mut errors = Vec::new();
    for token in tokens {
        for trivia in token.leading_trivia.iter().chain(&token.trailing_trivia) {
            if trivia.kind == SyntaxTriviaKind::MultiLineComment && !is_closed_comment(trivia.text)
            {
                errors.push(LexError {
                    kind: LexErrorKind::UnterminatedComment,
                    span: trivia.span,
                });
            }
        }
        if token.kind == TokenKind::BadToken {
            let ch = token.value.chars().next().unwrap_or('\0');
            errors.push(LexError {
                kind: LexErrorKind::UnexpectedCharacter(ch),
                span: token.span,
            });
        }
    }
    errors.sort_by_key(|error| error.span.start);
    errors
}

fn is_closed_comment(text: &str) -> bool {
    text.len() >= 4 && text.ends_with("*/")
}

struct Lexer<'src> {
    input: &'src str,
    bytes: &'src [u8],
    pos: usize,
}

impl<'src> Lexer<'src> {
    const fn new(input: &'src str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn tokenize(mut self) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();

        loop {
            let leading_trivia = self.read_trivia();

            if self.pos >= self.bytes.len() {
                // Only a trivia-only input leaves anything for the sentinel.
                let mut end = Token::end(self.pos);
                end.leading_trivia = leading_trivia;
                tokens.push(end);
                break;
            }

            let start = self.pos;
            let kind = self.read_token();
            let span = TextSpan::from_bounds(start, self.pos);
            let trailing_trivia = self.read_trivia();

            tokens.push(Token {
                value: &self.input[span.range()],
                span,
                kind,
                leading_trivia,
                trailing_trivia,
            });
        }

        tracing::trace!(
            tokens = tokens.len(),
            bytes = self.bytes.len(),
            "lexed source"
        );
        tokens
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn eat_bytes_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.pos += 1;
        }
    }

    fn eat_chars_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_char().filter(|&ch| predicate(ch)) {
            self.pos += ch.len_utf8();
        }
    }

    /// Maximal run of trivia. Spaces and tabs group into one item; each
    /// line break and each comment is its own item.
    fn read_trivia(&mut self) -> Vec<SyntaxTrivia<'src>> {
        let mut trivia = Vec::new();

        loop {
            let start = self.pos;
            let kind = match (self.peek(), self.peek_at(1)) {
                (Some(b' ' | b'\t'), _) => {
                    self.eat_bytes_while(|b| b == b' ' || b == b'\t');
                    SyntaxTriviaKind::Whitespace
                }
                (Some(b'\r' | b'\n'), _) => {
                    self.pos += line_break_width(self.bytes, self.pos);
                    SyntaxTriviaKind::EndOfLine
                }
                (Some(b'/'), Some(b'/')) => {
                    self.eat_bytes_while(|b| b != b'\r' && b != b'\n');
                    SyntaxTriviaKind::SingleLineComment
                }
                (Some(b'/'), Some(b'*')) => {
                    self.read_block_comment();
                    SyntaxTriviaKind::MultiLineComment
                }
                _ => break,
            };

            trivia.push(SyntaxTrivia {
                text: &self.input[start..self.pos],
                kind,
                span: TextSpan::from_bounds(start, self.pos),
            });
        }

        trivia
    }

    fn read_block_comment(&mut self) {
        let body = self.pos + 2;
        self.pos = self.input[body..]
            .find("*/")
            .map_or(self.bytes.len(), |offset| body + offset + 2);
    }

    /// Whether the previous character belongs to an identifier or number, in
    /// which case a `.` is a plain `Dot` even before a digit.
    fn follows_word(&self) -> bool {
        self.input[..self.pos]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }

    /// Consume exactly one token and return its kind. Must not be called at
    /// end of input.
    fn read_token(&mut self) -> TokenKind {
        let Some(ch) = self.peek_char() else {
            return TokenKind::EndToken;
        };

        match ch {
            c if c.is_alphabetic() || c == '_' => {
                self.pos += c.len_utf8();
                self.eat_chars_while(|c| c.is_alphanumeric() || c == '_');
                TokenKind::Identifier
            }
            '0'..='9' => self.read_number(),
            '.' if self.peek_at(1).is_some_and(|b| b.is_ascii_digit())
                && !self.follows_word() =>
            {
                self.pos += 1;
                self.eat_bytes_while(|b| b.is_ascii_digit());
                TokenKind::Float
            }
            '"' | '\'' if self.read_quoted(ch) => {
                if ch == '"' {
                    TokenKind::String
                } else {
                    TokenKind::Char
                }
            }
            _ => {
                self.pos += ch.len_utf8();
                TokenKind::punctuation(ch).unwrap_or(TokenKind::BadToken)
            }
        }
    }

    fn read_number(&mut self) -> TokenKind {
        self.eat_bytes_while(|b| b.is_ascii_digit());

        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
            self.eat_bytes_while(|b| b.is_ascii_digit());
            TokenKind::Float
        } else {
            TokenKind::Integer
        }
    }

    /// Consume a quoted literal closed on the same line. Returns `false`
    /// and consumes nothing if there is no closing quote.
    fn read_quoted(&mut self, quote: char) -> bool {
        let quote = if quote == '"' { b'"' } else { b'\'' };
        let mut i = self.pos + 1;

        while let Some(&b) = self.bytes.get(i) {
            match b {
                b'\r' | b'\n' => return false,
                b'\\' => {
                    i += 1;
                    if matches!(self.bytes.get(i), Some(b'\r' | b'\n') | None) {
                        return false;
                    }
                    i += 1;
                }
                _ if b == quote => {
                    self.pos = i + 1;
                    return true;
                }
                _ => i += 1,
            }
        }

        false
    }
}
