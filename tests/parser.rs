//! Parser behaviour: precedence, statement forms, and recovery.

mod common;

use common::{parse_expression, shape};
use maho_syntax::{
    Error, Expression, ParseErrorKind, SourceText, Statement, TokenKind, diagnostics, parse,
    parse_str, tokenize,
};

// -----------------------------------------------------------
// Precedence and associativity.
// -----------------------------------------------------------

#[test]
fn parse_multiplication_before_addition() {
    let (tree, rendered) = parse_expression("1+2*3;");
    assert_eq!(rendered, "(1 + (2 * 3))");
    let [Statement::Expression { expression, .. }] = &tree.statements[..] else {
        unreachable!();
    };
    let Expression::Binary {
        operator, right, ..
    } = expression
    else {
        panic!("expected binary expression");
    };
    assert_eq!(operator.kind, TokenKind::Plus);
    assert!(matches!(
        &**right,
        Expression::Binary { operator, .. } if operator.kind == TokenKind::Asterisk
    ));
}

#[test]
fn parse_left_associative_subtraction() {
    let (_, rendered) = parse_expression("1-2-3;");
    assert_eq!(rendered, "((1 - 2) - 3)");
}

#[test]
fn parse_left_associative_division() {
    let (_, rendered) = parse_expression("8 / 4 / 2;");
    assert_eq!(rendered, "((8 / 4) / 2)");
}

#[test]
fn parse_mixed_levels() {
    let (_, rendered) = parse_expression("a * b + c * d;");
    assert_eq!(rendered, "((a * b) + (c * d))");
}

#[test]
fn parse_equality_below_arithmetic() {
    let (_, rendered) = parse_expression("a + 1 == b - 2;");
    assert_eq!(rendered, "((a + 1) == (b - 2))");
}

#[test]
fn parse_or_below_and() {
    let (_, rendered) = parse_expression("a && b || c && d;");
    assert_eq!(rendered, "((a && b) || (c && d))");
}

#[test]
fn parse_not_equals() {
    let (tree, rendered) = parse_expression("!a != b;");
    assert_eq!(rendered, "((!a) != b)");
    assert!(tree.diagnostics.is_empty());
}

#[test]
fn parse_parenthesized() {
    let (_, rendered) = parse_expression("-(1 + 2) * 3;");
    assert_eq!(rendered, "((-[(1 + 2)]) * 3)");
}

// -----------------------------------------------------------
// Compound operators and trivia.
// -----------------------------------------------------------

#[test]
fn parse_less_equals_ends_expression() {
    let tokens = tokenize("a<=b");
    let tree = parse(&tokens);
    let Statement::Expression {
        expression,
        semicolon,
    } = &tree.statements[0]
    else {
        panic!("expected expression statement");
    };
    // `<=` is not a binary operator, so the statement ends at it.
    assert!(matches!(expression, Expression::Identifier(t) if t.value == "a"));
    assert_eq!(semicolon.kind, TokenKind::MissingToken);
    assert_eq!(semicolon.value, "<");
}

#[test]
fn parse_spaced_less_equals_does_not_combine() {
    let tokens = tokenize("a < =b");
    let tree = parse(&tokens);
    let values: Vec<_> = tree.tokens().iter().map(|t| t.value).collect();
    assert_eq!(values, vec!["a", "<", "=", "b", ""]);
    assert!(tree.tokens().iter().all(|t| t.kind != TokenKind::LessThanEquals));
}

#[test]
fn parse_spaced_and_and_does_not_combine() {
    let tokens = tokenize("a & & b;");
    let tree = parse(&tokens);
    assert!(!tree.diagnostics.is_empty());
    assert!(tree.tokens().iter().all(|t| t.kind != TokenKind::AmpersandAmpersand));
}

#[test]
fn parse_glued_or_combines() {
    let (tree, rendered) = parse_expression("a||b;");
    assert_eq!(rendered, "(a || b)");
    let operator = tree.tokens()[1];
    assert_eq!(operator.kind, TokenKind::VerticalBarVerticalBar);
    assert_eq!(operator.span.start, 1);
    assert_eq!(operator.span.length, 2);
}

#[test]
fn parse_comment_between_operator_halves() {
    let tree = parse(&tokenize("a =/**/= b;"));
    assert!(tree.tokens().iter().all(|t| t.kind != TokenKind::EqualsEquals));
}

// -----------------------------------------------------------
// Statement forms.
// -----------------------------------------------------------

#[test]
fn parse_variable_initialization() {
    let tree = parse(&tokenize("int x = 5;"));
    let [
        Statement::VariableInitialization {
            type_token,
            assignment,
            ..
        },
    ] = &tree.statements[..]
    else {
        panic!("expected initialization, got {:?}", tree.statements);
    };
    assert_eq!(type_token.value, "int");
    assert_eq!(assignment.identifier.value, "x");
    assert_eq!(shape(&assignment.value), "5");
}

#[test]
fn parse_initialization_with_expression() {
    let tree = parse(&tokenize("float y = x * 2.5 + 1;"));
    let [Statement::VariableInitialization { assignment, .. }] = &tree.statements[..] else {
        panic!("expected initialization");
    };
    assert_eq!(shape(&assignment.value), "((x * 2.5) + 1)");
}

#[test]
fn parse_declaration() {
    let tree = parse(&tokenize("string name;"));
    assert!(matches!(
        &tree.statements[..],
        [Statement::VariableDeclaration { identifier, .. }] if identifier.value == "name"
    ));
}

#[test]
fn parse_assignment_statement() {
    let tree = parse(&tokenize("x = 5;"));
    assert!(matches!(
        &tree.statements[..],
        [Statement::Expression {
            expression: Expression::Assignment(_),
            ..
        }]
    ));
}

#[test]
fn parse_sequence_of_statements() {
    let tree = parse(&tokenize("int a;\na = 1;\nint b = a + 1;\n{ b = b * 2; }\n"));
    assert_eq!(tree.statements.len(), 4);
    assert!(tree.diagnostics.is_empty());
    assert!(matches!(tree.statements[3], Statement::Block { .. }));
}

#[test]
fn parse_empty_block() {
    let tree = parse(&tokenize("{}"));
    let [Statement::Block { statements, .. }] = &tree.statements[..] else {
        panic!("expected block");
    };
    assert!(statements.is_empty());
    assert!(tree.diagnostics.is_empty());
}

// -----------------------------------------------------------
// Recovery.
// -----------------------------------------------------------

#[test]
fn parse_missing_semicolon_at_end() {
    let tree = parse(&tokenize("x = 5"));
    let [Statement::Expression { semicolon, .. }] = &tree.statements[..] else {
        panic!("expected one statement");
    };
    assert_eq!(semicolon.kind, TokenKind::MissingToken);
    assert_eq!(tree.diagnostics.len(), 1);
    assert_eq!(tree.end_of_file.kind, TokenKind::EndToken);
}

#[test]
fn parse_missing_operand() {
    let tree = parse(&tokenize("1 + ;"));
    assert_eq!(tree.diagnostics.len(), 2);
    assert!(matches!(
        &tree.diagnostics[0].kind,
        ParseErrorKind::UnexpectedToken { expected, found: TokenKind::Semicolon }
        if expected.contains(&TokenKind::Integer)
    ));
}

#[test]
fn parse_bad_token_becomes_missing() {
    let tokens = tokenize("x = $;");
    let tree = parse(&tokens);
    let all = diagnostics(&tokens, &tree);
    assert_eq!(all.len(), 2);
    assert!(matches!(all[0], Error::Lex(_)));
    assert!(matches!(all[1], Error::Parse(_)));
}

#[test]
fn parse_never_loops_on_garbage() {
    let input = ")))}}} === ;;; {{{ @@@";
    let tree = parse(&tokenize(input));
    assert!(!tree.diagnostics.is_empty());
    assert_eq!(tree.full_text(), input);
}

// -----------------------------------------------------------
// Strict entry point.
// -----------------------------------------------------------

#[test]
fn parse_str_ok() {
    let source = SourceText::new("int x = 1;\nx = x + 1;\n");
    let tree = parse_str(&source).expect("parse failed");
    assert_eq!(tree.statements.len(), 2);
}

#[test]
fn parse_str_reports_first_error_kind() {
    let source = SourceText::new("int x = 1 # 2;");
    let err = parse_str(&source).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));

    let source = SourceText::new("int x = 1 $ 2;");
    let err = parse_str(&source).unwrap_err();
    assert!(matches!(err, Error::Lex(_)));
}

#[test]
fn parse_str_error_location() {
    let source = SourceText::new("int x = 1;\ny = ;\n");
    let err = parse_str(&source).unwrap_err();
    let position = source.line_position(err.span().start);
    assert_eq!(position.to_string(), "2:5");
    assert!(err.to_string().starts_with("expected Integer or Float or String or Char"));
}
