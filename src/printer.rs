//! Text renderings of token streams and syntax trees.
//!
//! [`full_text`] and [`SyntaxTree::full_text`] reproduce the source exactly.
//! [`format_tokens`] and [`format_tree`] produce indented dumps meant for
//! people, one token or node per line.

use std::fmt::Write as _;

use crate::ast::{AssignmentExpression, Expression, Statement, SyntaxTree};
use crate::text::TextSpan;
use crate::token::{SyntaxTrivia, Token};

/// Rebuild the source text from a token stream.
#[must_use]
pub fn full_text(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.write_full_text(&mut out);
    }
    out
}

/// One line per token: kind, value, span, and any trivia.
#[must_use]
pub fn format_tokens(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        format_token(&mut out, token);
        if !token.leading_trivia.is_empty() {
            out.push_str(" leading=");
            format_trivia(&mut out, &token.leading_trivia);
        }
        if !token.trailing_trivia.is_empty() {
            out.push_str(" trailing=");
            format_trivia(&mut out, &token.trailing_trivia);
        }
        out.push('\n');
    }
    out
}

/// Indented dump of every node and token in the tree, sentinel last.
#[must_use]
pub fn format_tree(tree: &SyntaxTree<'_>) -> String {
    let mut out = String::new();
    for statement in &tree.statements {
        format_statement(&mut out, statement, 0);
    }
    format_labelled_token(&mut out, "end", &tree.end_of_file, 0);
    out
}

fn indent(out: &mut String, depth: usize) {
    out.push_str(&"  ".repeat(depth));
}

fn format_token(out: &mut String, token: &Token<'_>) {
    let _ = write!(out, "{:?} {:?} {}", token.kind, token.value, token.span);
}

fn format_trivia(out: &mut String, trivia: &[SyntaxTrivia<'_>]) {
    out.push('[');
    for (i, item) in trivia.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{:?} {:?}", item.kind, item.text);
    }
    out.push(']');
}

fn format_labelled_token(out: &mut String, label: &str, token: &Token<'_>, depth: usize) {
    indent(out, depth);
    out.push_str(label);
    out.push_str(": ");
    format_token(out, token);
    out.push('\n');
}

fn format_node_header(out: &mut String, name: &str, span: TextSpan, depth: usize) {
    indent(out, depth);
    let _ = writeln!(out, "{name} {span}");
}

fn format_statement(out: &mut String, statement: &Statement<'_>, depth: usize) {
    match statement {
        Statement::Expression {
            expression,
            semicolon,
        } => {
            format_node_header(out, "ExpressionStatement", statement.span(), depth);
            format_expression(out, expression, depth + 1);
            format_labelled_token(out, "semicolon", semicolon, depth + 1);
        }
        Statement::Block {
            open_brace,
            statements,
            close_brace,
        } => {
            format_node_header(out, "BlockStatement", statement.span(), depth);
            format_labelled_token(out, "open", open_brace, depth + 1);
            for inner in statements {
                format_statement(out, inner, depth + 1);
            }
            format_labelled_token(out, "close", close_brace, depth + 1);
        }
        Statement::VariableDeclaration {
            type_token,
            identifier,
            semicolon,
        } => {
            format_node_header(out, "VariableDeclarationStatement", statement.span(), depth);
            format_labelled_token(out, "type", type_token, depth + 1);
            format_labelled_token(out, "identifier", identifier, depth + 1);
            format_labelled_token(out, "semicolon", semicolon, depth + 1);
        }
        Statement::VariableInitialization {
            type_token,
            assignment,
            semicolon,
        } => {
            format_node_header(
                out,
                "VariableInitializationStatement",
                statement.span(),
                depth,
            );
            format_labelled_token(out, "type", type_token, depth + 1);
            format_assignment(out, assignment, depth + 1);
            format_labelled_token(out, "semicolon", semicolon, depth + 1);
        }
    }
}

fn format_assignment(out: &mut String, assignment: &AssignmentExpression<'_>, depth: usize) {
    let span = TextSpan::from_bounds(
        assignment.identifier.span.start,
        assignment.value.span().end(),
    );
    format_node_header(out, "AssignmentExpression", span, depth);
    format_labelled_token(out, "identifier", &assignment.identifier, depth + 1);
    format_labelled_token(out, "equals", &assignment.equals, depth + 1);
    format_expression(out, &assignment.value, depth + 1);
}

fn format_expression(out: &mut String, expression: &Expression<'_>, depth: usize) {
    match expression {
        Expression::Literal(token) => {
            format_labelled_token(out, "LiteralExpression", token, depth);
        }
        Expression::Identifier(token) => {
            format_labelled_token(out, "IdentifierExpression", token, depth);
        }
        Expression::Assignment(assignment) => format_assignment(out, assignment, depth),
        Expression::Binary {
            left,
            operator,
            right,
        } => {
            format_node_header(out, "BinaryExpression", expression.span(), depth);
            format_expression(out, left, depth + 1);
            format_labelled_token(out, "operator", operator, depth + 1);
            format_expression(out, right, depth + 1);
        }
        Expression::Unary { operator, operand } => {
            format_node_header(out, "UnaryExpression", expression.span(), depth);
            format_labelled_token(out, "operator", operator, depth + 1);
            format_expression(out, operand, depth + 1);
        }
        Expression::Parenthesized {
            open_paren,
            expression: inner,
            close_paren,
        } => {
            format_node_header(out, "ParenthesizedExpression", expression.span(), depth);
            format_labelled_token(out, "open", open_paren, depth + 1);
            format_expression(out, inner, depth + 1);
            format_labelled_token(out, "close", close_paren, depth + 1);
        }
    }
}
