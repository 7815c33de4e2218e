//! Lenient numeric parsing for atom values.
//!
//! KiCad writes plain decimal numbers, but hand-edited and third-party files
//! occasionally carry trailing garbage (`1.6mm`) or no number at all. These
//! parsers accept the longest numeric prefix and report `None` when there is
//! none, leaving the fallback policy to the caller.

use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    sequence::tuple,
    IResult,
};

fn sign(input: &str) -> IResult<&str, Option<char>> {
    opt(one_of("+-"))(input)
}

fn exponent(input: &str) -> IResult<&str, &str> {
    recognize(tuple((one_of("eE"), sign, digit1)))(input)
}

fn recognize_float(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        sign,
        alt((
            recognize(tuple((digit1, opt(tuple((char('.'), digit0)))))),
            recognize(tuple((char('.'), digit1))),
        )),
        opt(exponent),
    )))(input)
}

fn recognize_int(input: &str) -> IResult<&str, &str> {
    recognize(tuple((sign, digit1)))(input)
}

/// Parses the longest floating point prefix of `input`.
///
/// `"0.25"` → `0.25`, `"1.6mm"` → `1.6`, `"-.5"` → `-0.5`, `"abc"` → `None`.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let (_, number) = recognize_float(input).ok()?;

    number.parse().ok()
}

/// Parses the longest integer prefix of `input`.
///
/// `"20221018"` → `20221018`, `"12.7"` → `12`, `"abc"` → `None`. Values which
/// do not fit in an `i64` are also `None`.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let (_, number) = recognize_int(input).ok()?;

    number.parse().ok()
}
