//! KiCad S-Expression parsing.
//!
//! Text is tokenized by [`kicad_sexpr_lexer`], assembled into a generic
//! [`Sexpr`] tree by [`parse_sexpr`], and finally viewed as named nodes through
//! [`ParsedSexpr`].

pub mod number;
mod parsed;
mod parser;
mod sexpr;

pub use parsed::ParsedSexpr;
pub use parser::{from_str, parse_sexpr, SexprParseError};
pub use sexpr::{Sexpr, SexprList};
