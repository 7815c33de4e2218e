use std::borrow::Cow;

use kicad_sexpr_lexer::*;

fn token(kind: TokenKind<'_>, span: (usize, usize), position: (usize, usize)) -> Token<'_> {
    Token {
        kind,
        span: Span::new(span.0, span.1),
        line: position.0,
        column: position.1,
    }
}

#[track_caller]
fn assert_lexed(input: &str, expected: &[Token]) {
    let tokens = tokenize(input);

    assert_eq!(tokens, expected);
}

#[test]
fn test_lex_empty_input() {
    assert_lexed("", &[]);
    assert_lexed(" \t\r\n ", &[]);
}

#[test]
fn test_lex_empty_list() {
    assert_lexed(
        "(test)",
        &[
            token(TokenKind::OpenParen, (0, 1), (1, 1)),
            token(TokenKind::Atom("test"), (1, 5), (1, 2)),
            token(TokenKind::CloseParen, (5, 6), (1, 6)),
        ],
    );
}

#[test]
fn test_lex_empty_list_with_whitespace() {
    assert_lexed(
        "(  test  )",
        &[
            token(TokenKind::OpenParen, (0, 1), (1, 1)),
            token(TokenKind::Atom("test"), (3, 7), (1, 4)),
            token(TokenKind::CloseParen, (9, 10), (1, 10)),
        ],
    );
}

#[test]
fn test_lex_numbers_are_atoms() {
    assert_lexed(
        "(at -1.5 20221018)",
        &[
            token(TokenKind::OpenParen, (0, 1), (1, 1)),
            token(TokenKind::Atom("at"), (1, 3), (1, 2)),
            token(TokenKind::Atom("-1.5"), (4, 8), (1, 5)),
            token(TokenKind::Atom("20221018"), (9, 17), (1, 10)),
            token(TokenKind::CloseParen, (17, 18), (1, 18)),
        ],
    );
}

#[test]
fn test_lex_compound_atoms() {
    let tokens = tokenize("(layers F.Cu *.Mask F&B.Cu 04740ea2-db09-4cc1-b2d4-53506044432e)");
    let atoms = tokens
        .iter()
        .filter_map(|t| t.kind.as_atom())
        .collect::<Vec<_>>();

    assert_eq!(
        atoms,
        [
            "layers",
            "F.Cu",
            "*.Mask",
            "F&B.Cu",
            "04740ea2-db09-4cc1-b2d4-53506044432e"
        ]
    );
}

#[test]
fn test_lex_string() {
    assert_lexed(
        r#"(net 1 "GND")"#,
        &[
            token(TokenKind::OpenParen, (0, 1), (1, 1)),
            token(TokenKind::Atom("net"), (1, 4), (1, 2)),
            token(TokenKind::Atom("1"), (5, 6), (1, 6)),
            token(TokenKind::String(Cow::Borrowed("GND")), (7, 12), (1, 8)),
            token(TokenKind::CloseParen, (12, 13), (1, 13)),
        ],
    );
}

#[test]
fn test_lex_string_with_parentheses_and_spaces() {
    let tokens = tokenize(r#"(descr "Resistor (SMD), 0805")"#);

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[2].kind.as_string(), Some("Resistor (SMD), 0805"));
}

#[test]
fn test_lex_string_escapes() {
    let tokens = tokenize(r#""a\"b\\c\nd\te\rf\zg""#);

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text(), "a\"b\\c\nd\te\rfzg");
    assert_eq!(tokens[0].span, Span::new(0, 21));
}

#[test]
fn test_lex_unterminated_string() {
    assert_lexed(
        r#"(uuid "2349f563-989d-4999-a369-9f24d984ce74)"#,
        &[
            token(TokenKind::OpenParen, (0, 1), (1, 1)),
            token(TokenKind::Atom("uuid"), (1, 5), (1, 2)),
            token(
                TokenKind::String(Cow::Borrowed("2349f563-989d-4999-a369-9f24d984ce74)")),
                (6, 44),
                (1, 7),
            ),
        ],
    );
}

#[test]
fn test_lex_multiline_string() {
    assert_lexed(
        "\"first line\nsecond line\" x",
        &[
            token(
                TokenKind::String(Cow::Borrowed("first line\nsecond line")),
                (0, 24),
                (1, 1),
            ),
            token(TokenKind::Atom("x"), (25, 26), (2, 14)),
        ],
    );
}

#[test]
fn test_lex_tracks_lines_and_columns() {
    let input = "(kicad_pcb\n  (version 20221018)\r\n\t(generator pcbnew))";
    let positions = tokenize(input)
        .into_iter()
        .map(|t| (t.text().to_string(), t.line, t.column))
        .collect::<Vec<_>>();

    assert_eq!(
        positions,
        [
            ("(".to_string(), 1, 1),
            ("kicad_pcb".to_string(), 1, 2),
            ("(".to_string(), 2, 3),
            ("version".to_string(), 2, 4),
            ("20221018".to_string(), 2, 12),
            (")".to_string(), 2, 20),
            ("(".to_string(), 3, 2),
            ("generator".to_string(), 3, 3),
            ("pcbnew".to_string(), 3, 13),
            (")".to_string(), 3, 19),
            (")".to_string(), 3, 20),
        ]
    );
}

#[test]
fn test_lex_stray_close_paren() {
    let kinds = tokenize(") (a))")
        .into_iter()
        .map(|t| t.kind)
        .collect::<Vec<_>>();

    assert_eq!(
        kinds,
        [
            TokenKind::CloseParen,
            TokenKind::OpenParen,
            TokenKind::Atom("a"),
            TokenKind::CloseParen,
            TokenKind::CloseParen,
        ]
    );
}

#[test]
fn test_lexer_reports_position() {
    let mut lexer = Lexer::new("(a\n b)");

    assert!(!lexer.is_eof());
    assert_eq!((lexer.line_number(), lexer.column()), (1, 1));

    lexer.by_ref().for_each(drop);

    assert!(lexer.is_eof());
    assert_eq!((lexer.line_number(), lexer.column()), (2, 4));
    assert_eq!(lexer.source(), "(a\n b)");
}
