//! This crate implements a zero-copy lexer for the KiCad S-Expression format.
//!
//! The lexer is total: every input, however malformed, produces a token
//! stream. Balancing parentheses is left to the tree parser in `kicad_sexpr`,
//! which can use the line and column recorded on each token for its error
//! messages.

use std::borrow::Cow;

pub use token::*;

mod string;
mod token;

/// A zero-copy lexer for the KiCad S-Expression format. Lexer implements
/// [`Iterator`], yielding [`Token`]s until the input is exhausted.
///
/// Tokens borrow from the source, except for strings which contained escape
/// sequences.
#[derive(Debug, Clone)]
pub struct Lexer<'source> {
    source: &'source str,
    position: usize,
    line_number: usize,
    /// We could trivially compute this from the position, but since we need
    /// it for every token its best to cache it here
    column: usize,
}

impl<'source> Lexer<'source> {
    /// Constructs a new Lexer over the given source text
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            position: 0,
            line_number: 0,
            column: 0,
        }
    }

    /// Returns true if the lexer has reached the end of it's input stream
    pub fn is_eof(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Returns a reference to the input stream
    pub fn source(&self) -> &'source str {
        self.source
    }

    /// Returns a 1-based line index for use in position formatting
    pub fn line_number(&self) -> usize {
        self.line_number + 1
    }

    /// Returns a 1-based column index for use in position formatting
    pub fn column(&self) -> usize {
        self.column + 1
    }
}

/* Helper functions for lexing the input */

impl<'source> Lexer<'source> {
    fn remaining(&self) -> &'source str {
        &self.source[self.position..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Moves the cursor over `consumed`, which must be a prefix of the
    /// remaining input, keeping the line and column counters in sync.
    fn advance(&mut self, consumed: &str) {
        for c in consumed.chars() {
            if c == '\n' {
                self.line_number += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }

        self.position += consumed.len();
    }

    fn ignore_whitespace(&mut self) {
        let remaining = self.remaining();
        let end = remaining
            .find(|c: char| !c.is_ascii_whitespace())
            .unwrap_or(remaining.len());

        self.advance(&remaining[..end]);
    }

    fn read_single(&mut self, kind: TokenKind<'source>) -> TokenKind<'source> {
        self.advance(&self.remaining()[..1]);

        kind
    }

    fn read_string(&mut self) -> TokenKind<'source> {
        let remaining = self.remaining();

        // `parse_string` only fails when the input does not start with a
        // quote, which the caller has already checked.
        let (rest, value) = match string::parse_string(remaining) {
            Ok(parsed) => parsed,
            Err(_) => ("", Cow::Borrowed(&remaining[1..])),
        };

        self.advance(&remaining[..remaining.len() - rest.len()]);

        TokenKind::String(value)
    }

    fn read_atom(&mut self) -> TokenKind<'source> {
        let remaining = self.remaining();
        let end = remaining
            .find(|c: char| c.is_ascii_whitespace() || c == '(' || c == ')')
            .unwrap_or(remaining.len());

        let value = &remaining[..end];
        self.advance(value);

        TokenKind::Atom(value)
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Token<'source>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ignore_whitespace();

        let c = self.peek_char()?;

        let start_position = self.position;
        let (line, column) = (self.line_number(), self.column());

        let kind = match c {
            // List delimiters
            '(' => self.read_single(TokenKind::OpenParen),
            ')' => self.read_single(TokenKind::CloseParen),

            // Delimited string, possibly unterminated
            '"' => self.read_string(),

            // All other values
            _ => self.read_atom(),
        };

        Some(Token {
            kind,
            span: Span::new(start_position, self.position),
            line,
            column,
        })
    }
}

/// Converts the whole input into a token stream.
///
/// This never fails: unterminated strings are read to the end of the input
/// and any other run of characters becomes an atom.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}
