//! Lex and parse a small Maho program, then print its tokens and tree.

use maho_syntax::{SourceText, format_tokens, format_tree, lex, parse};

fn main() {
    let source = SourceText::new(
        "\
// running total
int total = 0;
{
\ttotal = total + 2 * 3; /* scaled */
}
bool done = total == 6 && !(total != 6);
",
    );

    let tokens = lex(&source);
    println!("Tokens:\n{}", format_tokens(&tokens));

    let tree = parse(&tokens);
    println!("Tree:\n{}", format_tree(&tree));

    assert_eq!(tree.full_text(), source.as_str());
    println!("Statements: {}", tree.statements.len());
}
