//! Recursive descent parser turning a token stream into a [`Sexpr`] tree.

use kicad_sexpr_lexer::{Token, TokenKind};
use thiserror::Error;

use crate::sexpr::Sexpr;

/// A syntax error found while building the tree. Positions are 1-based.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SexprParseError {
    /// The token stream ended where an expression was required
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A list was opened but the token stream ended before it was closed
    #[error("missing closing parenthesis for list opened at {line}:{column}")]
    MissingClosingParenthesis { line: usize, column: usize },
    /// A token which cannot start an expression, such as a stray `)`
    #[error("unexpected token `{text}` at {line}:{column}")]
    UnexpectedToken {
        text: String,
        line: usize,
        column: usize,
    },
}

struct TreeParser<'a, 'source> {
    tokens: &'a [Token<'source>],
    position: usize,
}

impl<'a, 'source> TreeParser<'a, 'source> {
    fn peek(&self) -> Option<&'a Token<'source>> {
        self.tokens.get(self.position)
    }

    fn parse(&mut self) -> Result<Sexpr, SexprParseError> {
        let token = self.peek().ok_or(SexprParseError::UnexpectedEndOfInput)?;
        self.position += 1;

        match &token.kind {
            TokenKind::OpenParen => {
                let mut list = Vec::new();

                loop {
                    match self.peek() {
                        None => {
                            return Err(SexprParseError::MissingClosingParenthesis {
                                line: token.line,
                                column: token.column,
                            })
                        }
                        Some(Token {
                            kind: TokenKind::CloseParen,
                            ..
                        }) => {
                            self.position += 1;
                            break;
                        }
                        Some(_) => list.push(self.parse()?),
                    }
                }

                Ok(Sexpr::List(list))
            }
            TokenKind::String(value) => Ok(Sexpr::Atom(value.to_string())),
            TokenKind::Atom(value) => Ok(Sexpr::Atom(value.to_string())),
            TokenKind::CloseParen => Err(SexprParseError::UnexpectedToken {
                text: token.text().to_string(),
                line: token.line,
                column: token.column,
            }),
        }
    }
}

/// Builds one expression from the start of the token stream.
///
/// Tokens following the first complete expression are ignored, so
/// `(a) (b)` parses as `(a)`.
pub fn parse_sexpr(tokens: &[Token<'_>]) -> Result<Sexpr, SexprParseError> {
    TreeParser {
        tokens,
        position: 0,
    }
    .parse()
}

/// Tokenizes and parses `input` in one step.
pub fn from_str(input: &str) -> Result<Sexpr, SexprParseError> {
    let tokens = kicad_sexpr_lexer::tokenize(input);

    parse_sexpr(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(value: &str) -> Sexpr {
        Sexpr::atom(value)
    }

    #[track_caller]
    fn assert_parsed(input: &str, expected: Sexpr) {
        assert_eq!(from_str(input), Ok(expected));
    }

    #[test]
    fn test_parse_single_atom() {
        assert_parsed("yes", atom("yes"));
        assert_parsed(r#""F.Cu""#, atom("F.Cu"));
    }

    #[test]
    fn test_parse_empty_list() {
        assert_parsed("()", Sexpr::List(vec![]));
        assert_parsed("(test)", Sexpr::list([atom("test")]));
    }

    #[test]
    fn test_parse_nested_lists() {
        assert_parsed(
            "(test (nested_one) (nested_two (nested_three)))",
            Sexpr::list([
                atom("test"),
                Sexpr::list([atom("nested_one")]),
                Sexpr::list([
                    atom("nested_two"),
                    Sexpr::list([atom("nested_three")]),
                ]),
            ]),
        );
    }

    #[test]
    fn test_parse_strips_quotes_and_resolves_escapes() {
        assert_parsed(
            r#"(gr_text "line one\nline \"two\"")"#,
            Sexpr::list([atom("gr_text"), atom("line one\nline \"two\"")]),
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(from_str(""), Err(SexprParseError::UnexpectedEndOfInput));
        assert_eq!(
            from_str("  \n "),
            Err(SexprParseError::UnexpectedEndOfInput)
        );
    }

    #[test]
    fn test_parse_missing_closing_parenthesis() {
        assert_eq!(
            from_str("(kicad_pcb\n  (version 20221018)"),
            Err(SexprParseError::MissingClosingParenthesis { line: 1, column: 1 })
        );
        assert_eq!(
            from_str("(a (b)"),
            Err(SexprParseError::MissingClosingParenthesis { line: 1, column: 1 })
        );
        assert_eq!(
            from_str("(a (b c"),
            Err(SexprParseError::MissingClosingParenthesis { line: 1, column: 4 })
        );
    }

    #[test]
    fn test_parse_leading_close_paren() {
        assert_eq!(
            from_str(" )(a)"),
            Err(SexprParseError::UnexpectedToken {
                text: ")".to_string(),
                line: 1,
                column: 2,
            })
        );
    }

    #[test]
    fn test_parse_ignores_trailing_tokens() {
        assert_parsed("(a) )", Sexpr::list([atom("a")]));
        assert_parsed("(a) (b c)", Sexpr::list([atom("a")]));
        assert_parsed("first second", atom("first"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SexprParseError::MissingClosingParenthesis { line: 3, column: 7 }.to_string(),
            "missing closing parenthesis for list opened at 3:7"
        );
        assert_eq!(
            SexprParseError::UnexpectedEndOfInput.to_string(),
            "unexpected end of input"
        );
    }
}
