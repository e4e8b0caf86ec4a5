//! Integration tests for the lexer

use chainable_syntax::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn lex_closure_property() {
    assert_eq!(
        kinds("@Chainable var onTap: (() -> Void)?"),
        vec![
            TokenKind::At,
            TokenKind::Ident("Chainable".into()),
            TokenKind::Ident("var".into()),
            TokenKind::Ident("onTap".into()),
            TokenKind::Colon,
            TokenKind::LParen,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Arrow,
            TokenKind::Ident("Void".into()),
            TokenKind::RParen,
            TokenKind::Question,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_inout_and_variadic() {
    let tokens = kinds("_ values: inout [Int], _ rest: Int...");
    assert!(tokens.contains(&TokenKind::Ident("inout".into())));
    assert!(tokens.contains(&TokenKind::Ellipsis));
}

#[test]
fn lex_comments_are_trivia() {
    let tokens = Lexer::tokenize_all("// one\nvar /* two /* nested */ */ x");
    let significant: Vec<&TokenKind> = tokens
        .iter()
        .map(|t| &t.kind)
        .filter(|k| !k.is_trivia())
        .collect();
    assert_eq!(
        significant,
        vec![
            &TokenKind::Ident("var".into()),
            &TokenKind::Ident("x".into()),
            &TokenKind::Eof
        ]
    );
}

#[test]
fn lex_backticked_identifier_text() {
    let source = "func `default`() {}";
    for token in Lexer::tokenize_all(source) {
        if let TokenKind::Ident(name) = &token.kind {
            assert_eq!(token.text(source), name);
        }
    }
}

#[test]
fn lex_line_tracking() {
    let tokens = Lexer::tokenize_all("struct A {\n    var b: Int\n}");
    let var = tokens.iter().find(|t| t.is_ident("var")).unwrap();
    assert_eq!(var.span.line, 2);
    assert_eq!(var.span.column, 5);
    assert!(var.newline_before);
}
