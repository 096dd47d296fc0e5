use std::fmt;

use crate::ast::{AssignmentExpression, Expression, Statement, SyntaxTree};
use crate::text::TextSpan;
use crate::token::{Token, TokenKind};

/// Classifies a parser diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// None of the expected kinds was at the current position. The found
    /// token was consumed and replaced by a `MissingToken`.
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: TokenKind,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected ")?;
                for (i, kind) in expected.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{kind}")?;
                }
                write!(f, ", got {found}")
            }
        }
    }
}

/// Diagnostic recorded when the parser synthesizes a missing token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: TextSpan,
}

/// Parse a token stream into a syntax tree.
///
/// Never fails. Where an expected token is absent the parser consumes the
/// token it found, keeps it in the tree tagged `MissingToken`, and records a
/// [`ParseError`] in [`SyntaxTree::diagnostics`]. The stream should end in an
/// `EndToken`; reads past the end see the last token again.
#[must_use]
pub fn parse<'src>(tokens: &[Token<'src>]) -> SyntaxTree<'src> {
    Parser::new(tokens).parse()
}

const UNARY_PRECEDENCE: u8 = 6;

const LITERAL_KINDS: [TokenKind; 4] = [
    TokenKind::Integer,
    TokenKind::Float,
    TokenKind::String,
    TokenKind::Char,
];

/// Operators spelled with more than one token, longest first.
const COMPOUND_OPERATORS: [(&[TokenKind], TokenKind); 9] = [
    (
        &[
            TokenKind::LessThanSign,
            TokenKind::LessThanSign,
            TokenKind::LessThanSign,
        ],
        TokenKind::LessThanLessThanLessThan,
    ),
    (
        &[TokenKind::Equals, TokenKind::Equals],
        TokenKind::EqualsEquals,
    ),
    (
        &[TokenKind::ExclamationMark, TokenKind::Equals],
        TokenKind::ExclamationEquals,
    ),
    (
        &[TokenKind::LessThanSign, TokenKind::LessThanSign],
        TokenKind::LessThanLessThan,
    ),
    (
        &[TokenKind::GreaterThanSign, TokenKind::GreaterThanSign],
        TokenKind::GreaterThanGreaterThan,
    ),
    (
        &[TokenKind::LessThanSign, TokenKind::Equals],
        TokenKind::LessThanEquals,
    ),
    (
        &[TokenKind::GreaterThanSign, TokenKind::Equals],
        TokenKind::GreaterThanEquals,
    ),
    (
        &[TokenKind::Ampersand, TokenKind::Ampersand],
        TokenKind::AmpersandAmpersand,
    ),
    (
        &[TokenKind::VerticalBar, TokenKind::VerticalBar],
        TokenKind::VerticalBarVerticalBar,
    ),
];

const fn unary_precedence(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::Plus | TokenKind::Minus | TokenKind::ExclamationMark => UNARY_PRECEDENCE,
        _ => 0,
    }
}

const fn binary_precedence(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::Asterisk | TokenKind::ForwardSlash => 5,
        TokenKind::Plus | TokenKind::Minus => 4,
        TokenKind::EqualsEquals | TokenKind::ExclamationEquals => 3,
        TokenKind::AmpersandAmpersand => 2,
        TokenKind::VerticalBarVerticalBar => 1,
        _ => 0,
    }
}

struct Parser<'t, 'src> {
    tokens: &'t [Token<'src>],
    pos: usize,
    /// Stands in for the sentinel when the stream does not end in one.
    fallback: Token<'src>,
    diagnostics: Vec<ParseError>,
}

impl<'t, 'src> Parser<'t, 'src> {
    fn new(tokens: &'t [Token<'src>]) -> Self {
        let end = tokens.last().map_or(0, |token| token.full_span().end());
        Self {
            tokens,
            pos: 0,
            fallback: Token::end(end),
            diagnostics: Vec::new(),
        }
    }

    fn parse(mut self) -> SyntaxTree<'src> {
        let mut statements = Vec::new();

        while self.current().kind != TokenKind::EndToken {
            statements.push(self.parse_statement());
        }

        let end_of_file = self.match_kind(TokenKind::EndToken);

        tracing::trace!(
            statements = statements.len(),
            diagnostics = self.diagnostics.len(),
            "parsed token stream"
        );

        SyntaxTree {
            statements,
            end_of_file,
            diagnostics: self.diagnostics,
        }
    }

    fn peek(&self, offset: usize) -> &Token<'src> {
        self.tokens
            .get(self.pos + offset)
            .or_else(|| {
                self.tokens
                    .last()
                    .filter(|token| token.kind == TokenKind::EndToken)
            })
            .unwrap_or(&self.fallback)
    }

    fn current(&self) -> &Token<'src> {
        self.peek(0)
    }

    fn consume(&mut self) -> Token<'src> {
        let token = self.current().clone();
        self.pos += 1;
        token
    }

    /// Kind of the next token after the current one, skipping token-level
    /// trivia.
    fn next_significant_kind(&self) -> TokenKind {
        let mut offset = 1;
        while self.peek(offset).kind.is_trivia() {
            offset += 1;
        }
        self.peek(offset).kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> Token<'src> {
        self.match_any(&[kind])
    }

    /// Consume the current token. If its kind is not one of `kinds`, return
    /// it re-tagged as `MissingToken` and record a diagnostic.
    fn match_any(&mut self, kinds: &[TokenKind]) -> Token<'src> {
        let token = self.consume();
        if kinds.contains(&token.kind) {
            return token;
        }

        let error = ParseError {
            kind: ParseErrorKind::UnexpectedToken {
                expected: kinds.to_vec(),
                found: token.kind,
            },
            span: token.span,
        };
        tracing::debug!(%error, "synthesized missing token");
        self.diagnostics.push(error);
        token.into_missing()
    }

    /// The operator at the current position and the number of tokens it
    /// spans. Tokens only combine when no trivia separates them.
    fn current_operator(&self) -> (TokenKind, usize) {
        for (parts, kind) in COMPOUND_OPERATORS {
            if self.glued(parts.len())
                && parts
                    .iter()
                    .enumerate()
                    .all(|(offset, part)| self.peek(offset).kind == *part)
            {
                return (kind, parts.len());
            }
        }
        (self.current().kind, 1)
    }

    /// Whether the next `count` tokens touch with no trivia in between.
    fn glued(&self, count: usize) -> bool {
        (1..count).all(|offset| {
            let before = self.peek(offset - 1);
            let after = self.peek(offset);
            before.kind != TokenKind::EndToken
                && !before.has_trailing_trivia()
                && !after.has_leading_trivia()
        })
    }

    /// Consume the current operator, merging compound spellings into one
    /// token.
    fn take_operator(&mut self) -> Token<'src> {
        let (kind, width) = self.current_operator();
        if width == 1 {
            return self.consume();
        }

        let first = self.consume();
        let mut last_trailing = Vec::new();
        for _ in 1..width {
            last_trailing = self.consume().trailing_trivia;
        }

        let span = TextSpan::new(first.span.start, kind.text().map_or(0, str::len));
        Token {
            value: kind.text().unwrap_or_default(),
            span,
            kind,
            leading_trivia: first.leading_trivia,
            trailing_trivia: last_trailing,
        }
    }

    fn parse_statement(&mut self) -> Statement<'src> {
        match (self.current().kind, self.next_significant_kind()) {
            (TokenKind::LeftCurlyBrace, _) => self.parse_block_statement(),
            (TokenKind::Identifier, TokenKind::Identifier) => self.parse_variable_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_block_statement(&mut self) -> Statement<'src> {
        let open_brace = self.match_kind(TokenKind::LeftCurlyBrace);
        let mut statements = Vec::new();

        while !matches!(
            self.current().kind,
            TokenKind::RightCurlyBrace | TokenKind::EndToken
        ) {
            statements.push(self.parse_statement());
        }

        let close_brace = self.match_kind(TokenKind::RightCurlyBrace);
        Statement::Block {
            open_brace,
            statements,
            close_brace,
        }
    }

    fn parse_variable_statement(&mut self) -> Statement<'src> {
        let type_token = self.match_kind(TokenKind::Identifier);
        let identifier = self.match_kind(TokenKind::Identifier);

        if self.current_operator().0 != TokenKind::Equals {
            let semicolon = self.match_kind(TokenKind::Semicolon);
            return Statement::VariableDeclaration {
                type_token,
                identifier,
                semicolon,
            };
        }

        let equals = self.take_operator();
        let value = Box::new(self.parse_expression());
        let semicolon = self.match_kind(TokenKind::Semicolon);
        Statement::VariableInitialization {
            type_token,
            assignment: AssignmentExpression {
                identifier,
                equals,
                value,
            },
            semicolon,
        }
    }

    fn parse_expression_statement(&mut self) -> Statement<'src> {
        let expression = self.parse_expression();
        let semicolon = self.match_kind(TokenKind::Semicolon);
        Statement::Expression {
            expression,
            semicolon,
        }
    }

    fn parse_expression(&mut self) -> Expression<'src> {
        self.parse_binary(0)
    }

    /// Precedence climbing. Operators bind only if their precedence is above
    /// `min_precedence`, which makes equal precedences left-associative.
    fn parse_binary(&mut self, min_precedence: u8) -> Expression<'src> {
        let unary = unary_precedence(self.current_operator().0);

        let mut left = if unary != 0 && unary >= min_precedence {
            let operator = self.take_operator();
            let operand = Box::new(self.parse_binary(unary));
            Expression::Unary { operator, operand }
        } else {
            self.parse_primary()
        };

        loop {
            let precedence = binary_precedence(self.current_operator().0);
            if precedence == 0 || precedence <= min_precedence {
                break;
            }

            let operator = self.take_operator();
            let right = Box::new(self.parse_binary(precedence));
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right,
            };
        }

        left
    }

    fn parse_primary(&mut self) -> Expression<'src> {
        match self.current().kind {
            TokenKind::Identifier => {
                let identifier = self.consume();
                if self.current_operator().0 != TokenKind::Equals {
                    return Expression::Identifier(identifier);
                }
                let equals = self.take_operator();
                let value = Box::new(self.parse_expression());
                Expression::Assignment(AssignmentExpression {
                    identifier,
                    equals,
                    value,
                })
            }
            TokenKind::LeftParen => {
                let open_paren = self.consume();
                let expression = Box::new(self.parse_expression());
                let close_paren = self.match_kind(TokenKind::RightParen);
                Expression::Parenthesized {
                    open_paren,
                    expression,
                    close_paren,
                }
            }
            _ => Expression::Literal(self.match_any(&LITERAL_KINDS)),
        }
    }
}
