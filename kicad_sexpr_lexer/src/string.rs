//! Decoder for a delimited string that may contain escape sequences.
//!
//! - Opened by a double quote, closed by the next unescaped double quote
//! - Can contain any raw unescaped code point besides \ and "
//! - Translates the escape sequences \n, \t and \r; any other escaped
//!   character (including \" and \\) is kept literally
//! - A string which is never closed runs to the end of the input

use std::borrow::Cow;

use nom::branch::alt;
use nom::bytes::complete::is_not;
use nom::character::complete::{anychar, char};
use nom::combinator::{all_consuming, map, opt, recognize, value, verify};
use nom::multi::fold_many0;
use nom::sequence::{preceded, terminated};
use nom::IResult;

/// Parse an escaped character: \n, \t, \r, or any other character taken
/// literally.
fn parse_escaped_char(input: &str) -> IResult<&str, char> {
    preceded(
        char('\\'),
        alt((
            value('\n', char('n')),
            value('\r', char('r')),
            value('\t', char('t')),
            anychar,
        )),
    )(input)
}

/// Parse a non-empty block of text that doesn't include \ or "
fn parse_literal(input: &str) -> IResult<&str, &str> {
    verify(is_not("\"\\"), |s: &str| !s.is_empty())(input)
}

/// A backslash which is the very last character of the input has nothing to
/// escape, so it is kept as part of the text.
fn parse_dangling_backslash(input: &str) -> IResult<&str, &str> {
    recognize(all_consuming(char('\\')))(input)
}

/// A string fragment contains a fragment of a string being parsed: either
/// a non-empty Literal (a series of non-escaped characters) or a single
/// parsed escaped character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringFragment<'a> {
    Literal(&'a str),
    EscapedChar(char),
}

fn parse_fragment(input: &str) -> IResult<&str, StringFragment<'_>> {
    alt((
        map(parse_literal, StringFragment::Literal),
        map(parse_escaped_char, StringFragment::EscapedChar),
        map(parse_dangling_backslash, StringFragment::Literal),
    ))(input)
}

/// Parse a string starting at its opening quote. Returns the remaining input
/// and the decoded value.
///
/// The value borrows from the input unless an escape sequence had to be
/// resolved.
pub fn parse_string(input: &str) -> IResult<&str, Cow<'_, str>> {
    let (body, _) = char('"')(input)?;

    // A literal run stops at a quote, a backslash or the end of input. Only
    // the backslash case needs an owned buffer.
    let (after_literal, literal) = opt(parse_literal)(body)?;

    if !after_literal.starts_with('\\') {
        let (rest, _) = opt(char('"'))(after_literal)?;

        return Ok((rest, Cow::Borrowed(literal.unwrap_or_default())));
    }

    let build_string = fold_many0(parse_fragment, String::new, |mut string, fragment| {
        match fragment {
            StringFragment::Literal(s) => string.push_str(s),
            StringFragment::EscapedChar(c) => string.push(c),
        }
        string
    });

    map(terminated(build_string, opt(char('"'))), |s: String| {
        Cow::Owned(s)
    })(body)
}
