//! Show how malformed Maho input is reported.

use maho_syntax::{Error, SourceText, diagnostics, lex, parse, parse_str};

fn main() {
    // Unknown character
    let source = SourceText::new("int x = 1 $ 2;\n");
    match parse_str(&source) {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(Error::Lex(e)) => {
            println!("Lex error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: {}", source.line_position(e.span.start));
        }
        Err(Error::Parse(e)) => println!("Parse error: {e}"),
    }

    println!();

    // Missing semicolon
    let source = SourceText::new("int x = 1\nx = 2;\n");
    match parse_str(&source) {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(Error::Lex(e)) => println!("Lex error: {e}"),
        Err(Error::Parse(e)) => {
            println!("Parse error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: {}", source.line_position(e.span.start));
        }
    }

    println!();

    // Lenient parsing keeps going and reports everything at once.
    let source = SourceText::new("{ y = (1 + ; /* open\n");
    let tokens = lex(&source);
    let tree = parse(&tokens);
    println!("Recovered {} statement(s)", tree.statements.len());
    for error in diagnostics(&tokens, &tree) {
        println!("  {}: {error}", source.line_position(error.span().start));
    }
    assert_eq!(tree.full_text(), source.as_str());
}
