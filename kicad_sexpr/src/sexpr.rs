//! Generic KiCad S-Expression tree

use std::fmt::Display;

pub type SexprList = Vec<Sexpr>;

/// A node of the generic syntax tree. Quoted strings and bare symbols are
/// both atoms; the tree carries no semantic meaning.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Sexpr {
    Atom(String),
    List(SexprList),
}

impl Display for Sexpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sexpr::Atom(atom) => {
                if needs_quotes(atom) {
                    write_quoted(f, atom)
                } else {
                    write!(f, "{}", atom)
                }
            }
            Sexpr::List(list) => {
                write!(f, "(")?;

                for (i, item) in list.iter().enumerate() {
                    if i != 0 {
                        write!(f, " ")?;
                    }

                    write!(f, "{}", item)?;
                }

                write!(f, ")")
            }
        }
    }
}

/// Writes `atom` as a string literal using only the escapes the lexer
/// resolves. Every other character is written raw.
fn write_quoted(f: &mut std::fmt::Formatter<'_>, atom: &str) -> std::fmt::Result {
    write!(f, "\"")?;

    for c in atom.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            c => write!(f, "{c}")?,
        }
    }

    write!(f, "\"")
}

fn needs_quotes(atom: &str) -> bool {
    atom.is_empty()
        || atom
            .chars()
            .any(|c| c.is_ascii_whitespace() || matches!(c, '(' | ')' | '"' | '\\'))
}

macro_rules! sexpr_as {
    ($fn_name:ident, $return_type:ty, $variant:ident) => {
        pub fn $fn_name(&self) -> Option<&$return_type> {
            if let Self::$variant(value) = self {
                Some(value)
            } else {
                None
            }
        }
    };
}

macro_rules! sexpr_take {
    ($fn_name:ident, $return_type:ty, $variant:ident) => {
        pub fn $fn_name(self) -> Option<$return_type> {
            if let Self::$variant(value) = self {
                Some(value)
            } else {
                None
            }
        }
    };
}

impl Sexpr {
    sexpr_as!(as_list, SexprList, List);
    sexpr_as!(as_atom_string, String, Atom);

    sexpr_take!(take_list, SexprList, List);
    sexpr_take!(take_atom, String, Atom);

    pub fn atom(value: impl Into<String>) -> Self {
        Self::Atom(value.into())
    }

    pub fn list(values: impl Into<SexprList>) -> Self {
        Self::List(values.into())
    }

    /// Returns the text of an atom
    pub fn as_atom(&self) -> Option<&str> {
        self.as_atom_string().map(String::as_str)
    }

    /// Returns the first element of a list if it is an atom. This is the
    /// "name" of a node like `(layer "F.Cu")`.
    pub fn head(&self) -> Option<&str> {
        self.as_list()?.first()?.as_atom()
    }

    /// The number of nodes in the tree: every list and every atom, including
    /// this node.
    pub fn node_count(&self) -> usize {
        match self {
            Sexpr::Atom(_) => 1,
            Sexpr::List(list) => 1 + list.iter().map(Sexpr::node_count).sum::<usize>(),
        }
    }
}
