//! Scanner and parser phase tests, driven through the host entry points.

use kest_ir::{ExprKind, Position, StmtKind, TokenKind};
use kestc::{lex_source, parse_source};
use pretty_assertions::assert_eq;

use crate::common::{all_options, lex, parse, render};

#[test]
fn tokens_carry_line_and_column() {
    let tokens = lex("x = 1\n  y");
    let summary: Vec<_> = tokens
        .iter()
        .map(|t| (t.kind, t.text.as_str(), t.position))
        .collect();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Ident, "x", Position::new(1, 1)),
            (TokenKind::Eq, "=", Position::new(1, 3)),
            (TokenKind::Number, "1", Position::new(1, 5)),
            (TokenKind::Eol, "\n", Position::new(1, 6)),
            (TokenKind::Ident, "y", Position::new(2, 3)),
            (TokenKind::Eof, "", Position::new(2, 4)),
        ]
    );
}

#[test]
fn columns_count_characters_not_bytes() {
    let tokens = lex(r#""héllo" z"#);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[1].position, Position::new(1, 9));
}

#[test]
fn comments_are_skipped() {
    let kinds: Vec<_> = lex("a // note\nb").iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident,
            TokenKind::Eol,
            TokenKind::Ident,
            TokenKind::Eof
        ]
    );
}

#[test]
fn producers_agree() {
    let source = "func fib(n) {\n  if n < 2 { return n }\n  return fib(n - 1) + fib(n - 2)\n}\nfib(10);";
    let [lazy, threaded] = all_options();
    assert_eq!(
        lex_source(source, &lazy).unwrap(),
        lex_source(source, &threaded).unwrap()
    );
    assert_eq!(
        parse_source(source, &lazy).unwrap(),
        parse_source(source, &threaded).unwrap()
    );
}

#[test]
fn lexical_error_stops_both_producers() {
    for options in all_options() {
        let err = parse_source("a = 1;\nb = 2x;", &options).unwrap_err();
        assert_eq!(
            render(&err),
            "test.kest:line 2:column 5: identifier starts immediately after numeric literal `2`"
        );
    }
}

#[test]
fn trailing_operator_fails_at_end_of_line() {
    let err = parse_source("1 +\n", &Default::default()).unwrap_err();
    assert_eq!(
        render(&err),
        "test.kest:line 1:column 4: expected expression, found end of line"
    );
}

#[test]
fn missing_semicolon_is_reported_at_next_token() {
    let err = parse_source("x = 1\ny = 2;", &Default::default()).unwrap_err();
    assert_eq!(
        render(&err),
        "test.kest:line 1:column 6: unexpected end of line, expected `;`"
    );
}

#[test]
fn unterminated_string() {
    let err = parse_source("s = \"open\n\";", &Default::default()).unwrap_err();
    assert_eq!(
        render(&err),
        "test.kest:line 1:column 5: unexpected end of line in string literal"
    );
}

#[test]
fn program_shape() {
    let program = parse("func add(a, b) { return a + b }\nprint(add(1, 2));");
    assert_eq!(program.len(), 2);
    let StmtKind::Expr(first) = &program.statements[0].kind else {
        panic!("expected expression statement");
    };
    let ExprKind::Function(decl) = &first.kind else {
        panic!("expected function literal");
    };
    assert_eq!(decl.name.as_deref(), Some("add"));
    assert_eq!(decl.params, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(program.statements[1].position, Position::new(2, 1));
}
