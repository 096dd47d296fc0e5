#![allow(dead_code)]

use maho_syntax::{Expression, Statement, SyntaxTree, Token, TextSpan, full_text, parse, tokenize};

/// Assert that both the token stream and the tree rebuild `input` exactly.
pub fn roundtrip(input: &str) {
    let tokens = tokenize(input);
    let output = full_text(&tokens);
    assert_eq!(
        output, input,
        "token round-trip mismatch:\n--- expected ---\n{input:?}\n--- got ---\n{output:?}"
    );

    let tree = parse(&tokens);
    let output = tree.full_text();
    assert_eq!(
        output, input,
        "tree round-trip mismatch:\n--- expected ---\n{input:?}\n--- got ---\n{output:?}"
    );
}

/// Every span (trivia and token) of a stream, in stream order.
pub fn all_spans(tokens: &[Token<'_>]) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    for token in tokens {
        spans.extend(token.leading_trivia.iter().map(|t| t.span));
        if !token.span.is_empty() {
            spans.push(token.span);
        }
        spans.extend(token.trailing_trivia.iter().map(|t| t.span));
    }
    spans
}

/// Check that spans tile `[0, len)` with no gap or overlap.
pub fn assert_partition(tokens: &[Token<'_>], len: usize) {
    let mut expected_start = 0;
    for span in all_spans(tokens) {
        assert_eq!(
            span.start, expected_start,
            "gap or overlap at {expected_start}: next span is {span}"
        );
        expected_start = span.end();
    }
    assert_eq!(expected_start, len, "spans stop short of the input");
}

/// Parse input that must hold exactly one expression statement.
pub fn parse_expression(input: &str) -> (SyntaxTree<'_>, String) {
    let tree = parse(&tokenize(input));
    let rendered = match &tree.statements[..] {
        [Statement::Expression { expression, .. }] => shape(expression),
        other => panic!("expected one expression statement, got {other:?}"),
    };
    (tree, rendered)
}

/// Fully parenthesized rendering of an expression's structure.
pub fn shape(expression: &Expression<'_>) -> String {
    match expression {
        Expression::Literal(token) | Expression::Identifier(token) => token.value.to_string(),
        Expression::Assignment(assignment) => {
            format!(
                "({} = {})",
                assignment.identifier.value,
                shape(&assignment.value)
            )
        }
        Expression::Binary {
            left,
            operator,
            right,
        } => format!("({} {} {})", shape(left), operator.value, shape(right)),
        Expression::Unary { operator, operand } => {
            format!("({}{})", operator.value, shape(operand))
        }
        Expression::Parenthesized { expression, .. } => format!("[{}]", shape(expression)),
    }
}
