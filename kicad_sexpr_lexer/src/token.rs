use std::borrow::Cow;

/// A token which has been read from the input source
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token<'source> {
    #[cfg_attr(feature = "serde", serde(borrow))]
    pub kind: TokenKind<'source>,
    pub span: Span,
    /// 1-based line of the first character of the token
    pub line: usize,
    /// 1-based column of the first character of the token
    pub column: usize,
}

impl<'source> Token<'source> {
    /// The lexical text of the token. See [`TokenKind::text`].
    pub fn text(&self) -> &str {
        self.kind.text()
    }
}

/// A type of token which we can read
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "snake_case", tag = "type", content = "value")
)]
pub enum TokenKind<'source> {
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,

    /// A `"` delimited string with its escape sequences already resolved
    #[cfg_attr(feature = "serde", serde(borrow))]
    String(Cow<'source, str>),
    /// Any other run of characters which contains no whitespace or
    /// parentheses
    Atom(&'source str),
}

macro_rules! as_helper {
    ($name:ident, $variant:ident) => {
        paste::paste! {
            pub fn [<as_ $name>](&self) -> Option<&str> {
                if let Self::$variant(v) = self {
                    Some(&**v)
                } else {
                    None
                }
            }

            pub fn [<is_ $name>](&self) -> bool {
                matches!(self, Self::$variant(_))
            }
        }
    };
}

impl<'source> TokenKind<'source> {
    as_helper!(string, String);
    as_helper!(atom, Atom);

    /// Returns the text carried by the token. Parentheses return themselves,
    /// strings return their unquoted and unescaped value.
    pub fn text(&self) -> &str {
        match self {
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::String(value) => &**value,
            Self::Atom(value) => &**value,
        }
    }

    /// Returns true for the two value-carrying kinds
    pub fn is_value(&self) -> bool {
        matches!(self, Self::String(_) | Self::Atom(_))
    }
}

/// A start and end position within the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// The byte index of the first character (inclusive)
    pub start: usize,
    /// The byte index of the last character (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}
