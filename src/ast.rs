//! Syntax nodes built by the parser.
//!
//! Nodes own their children and never point back to their parents. Every
//! token the parser consumes ends up in exactly one node, so walking a tree's
//! tokens in order reproduces the source.

use crate::parser::ParseError;
use crate::text::TextSpan;
use crate::token::Token;

/// Result of parsing one token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree<'src> {
    pub statements: Vec<Statement<'src>>,
    pub end_of_file: Token<'src>,
    pub diagnostics: Vec<ParseError>,
}

impl<'src> SyntaxTree<'src> {
    /// All tokens of the tree in source order, ending with the sentinel.
    #[must_use]
    pub fn tokens(&self) -> Vec<&Token<'src>> {
        let mut tokens = Vec::new();
        for statement in &self.statements {
            statement.visit_tokens(&mut |token| tokens.push(token));
        }
        tokens.push(&self.end_of_file);
        tokens
    }

    /// Source text rebuilt from the tree's tokens and trivia.
    #[must_use]
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        for token in self.tokens() {
            token.write_full_text(&mut out);
        }
        out
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// `name = value`, as an expression or as the tail of an initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentExpression<'src> {
    pub identifier: Token<'src>,
    pub equals: Token<'src>,
    pub value: Box<Expression<'src>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression<'src> {
    /// Integer, float, string, or char literal.
    Literal(Token<'src>),
    Identifier(Token<'src>),
    Assignment(AssignmentExpression<'src>),
    Binary {
        left: Box<Self>,
        operator: Token<'src>,
        right: Box<Self>,
    },
    Unary {
        operator: Token<'src>,
        operand: Box<Self>,
    },
    Parenthesized {
        open_paren: Token<'src>,
        expression: Box<Self>,
        close_paren: Token<'src>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'src> {
    /// `expression;`
    Expression {
        expression: Expression<'src>,
        semicolon: Token<'src>,
    },
    /// `{ statements }`
    Block {
        open_brace: Token<'src>,
        statements: Vec<Self>,
        close_brace: Token<'src>,
    },
    /// `Type name;`
    VariableDeclaration {
        type_token: Token<'src>,
        identifier: Token<'src>,
        semicolon: Token<'src>,
    },
    /// `Type name = value;`
    VariableInitialization {
        type_token: Token<'src>,
        assignment: AssignmentExpression<'src>,
        semicolon: Token<'src>,
    },
}

impl<'src> AssignmentExpression<'src> {
    pub fn visit_tokens<'a>(&'a self, visit: &mut impl FnMut(&'a Token<'src>)) {
        visit(&self.identifier);
        visit(&self.equals);
        self.value.visit_tokens(visit);
    }
}

impl<'src> Expression<'src> {
    /// Call `visit` on every token of the expression in source order.
    pub fn visit_tokens<'a>(&'a self, visit: &mut impl FnMut(&'a Token<'src>)) {
        match self {
            Self::Literal(token) | Self::Identifier(token) => visit(token),
            Self::Assignment(assignment) => assignment.visit_tokens(visit),
            Self::Binary {
                left,
                operator,
                right,
            } => {
                left.visit_tokens(visit);
                visit(operator);
                right.visit_tokens(visit);
            }
            Self::Unary { operator, operand } => {
                visit(operator);
                operand.visit_tokens(visit);
            }
            Self::Parenthesized {
                open_paren,
                expression,
                close_paren,
            } => {
                visit(open_paren);
                expression.visit_tokens(visit);
                visit(close_paren);
            }
        }
    }

    #[must_use]
    pub fn tokens(&self) -> Vec<&Token<'src>> {
        let mut tokens = Vec::new();
        self.visit_tokens(&mut |token| tokens.push(token));
        tokens
    }

    /// From the first token's start to the last token's end, trivia excluded.
    #[must_use]
    pub fn span(&self) -> TextSpan {
        span_of(&self.tokens())
    }
}

impl<'src> Statement<'src> {
    /// Call `visit` on every token of the statement in source order.
    pub fn visit_tokens<'a>(&'a self, visit: &mut impl FnMut(&'a Token<'src>)) {
        match self {
            Self::Expression {
                expression,
                semicolon,
            } => {
                expression.visit_tokens(visit);
                visit(semicolon);
            }
            Self::Block {
                open_brace,
                statements,
                close_brace,
            } => {
                visit(open_brace);
                for statement in statements {
                    statement.visit_tokens(visit);
                }
                visit(close_brace);
            }
            Self::VariableDeclaration {
                type_token,
                identifier,
                semicolon,
            } => {
                visit(type_token);
                visit(identifier);
                visit(semicolon);
            }
            Self::VariableInitialization {
                type_token,
                assignment,
                semicolon,
            } => {
                visit(type_token);
                assignment.visit_tokens(visit);
                visit(semicolon);
            }
        }
    }

    #[must_use]
    pub fn tokens(&self) -> Vec<&Token<'src>> {
        let mut tokens = Vec::new();
        self.visit_tokens(&mut |token| tokens.push(token));
        tokens
    }

    #[must_use]
    pub fn span(&self) -> TextSpan {
        span_of(&self.tokens())
    }
}

fn span_of(tokens: &[&Token<'_>]) -> TextSpan {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => TextSpan::from_bounds(first.span.start, last.span.end()),
        _ => TextSpan::default(),
    }
}
