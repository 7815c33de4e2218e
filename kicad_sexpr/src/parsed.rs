//! A normalized, borrowed view over a [`Sexpr`] tree for ergonomic dispatch
//! on node names.

use crate::{
    number::{parse_float_prefix, parse_int_prefix},
    sexpr::Sexpr,
};

/// A named node: `(name value value (child ...) (child ...))`.
///
/// The leading atoms of a list go to `values` and its nested lists go to
/// `children`, each bucket in source order. The interleaving between the two
/// buckets is not kept. KiCad productions always put their scalar
/// parameters before any nested list, so nothing is lost for this format;
/// a grammar that mixes the two meaningfully would need a single ordered
/// element list instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSexpr<'a> {
    /// The head atom of the list. For a bare atom this is the atom itself,
    /// and for a list whose head is not an atom it is empty.
    pub name: &'a str,
    pub values: Vec<&'a str>,
    pub children: Vec<ParsedSexpr<'a>>,
    /// The node this view was built from
    pub raw: &'a Sexpr,
}

impl<'a> ParsedSexpr<'a> {
    pub fn new(sexpr: &'a Sexpr) -> Self {
        let list = match sexpr {
            Sexpr::Atom(atom) => {
                return Self {
                    name: atom,
                    values: Vec::new(),
                    children: Vec::new(),
                    raw: sexpr,
                }
            }
            Sexpr::List(list) => list,
        };

        let name = list.first().and_then(Sexpr::as_atom).unwrap_or_default();

        let mut values = Vec::new();
        let mut children = Vec::new();

        for item in list.iter().skip(1) {
            match item {
                Sexpr::Atom(atom) => values.push(atom.as_str()),
                Sexpr::List(_) => children.push(ParsedSexpr::new(item)),
            }
        }

        Self {
            name,
            values,
            children,
            raw: sexpr,
        }
    }

    /// Returns the value at `index`
    pub fn value(&self, index: usize) -> Option<&'a str> {
        self.values.get(index).copied()
    }

    /// Returns the value at `index`, or an empty string if there is none
    pub fn value_or_default(&self, index: usize) -> &'a str {
        self.value(index).unwrap_or_default()
    }

    /// Lenient float read of the value at `index`.
    ///
    /// A missing value reads as `0` and a value without a numeric prefix
    /// reads as `NaN`.
    pub fn number(&self, index: usize) -> f64 {
        parse_float_prefix(self.value(index).unwrap_or("0")).unwrap_or(f64::NAN)
    }

    /// Lenient integer read of the value at `index`. Both a missing value
    /// and a value without a numeric prefix read as `0`.
    pub fn integer(&self, index: usize) -> i64 {
        parse_int_prefix(self.value(index).unwrap_or("0")).unwrap_or_default()
    }

    /// Returns true if `atom` is one of the values, as with flags like
    /// `(pad "1" smd rect locked ...)`.
    pub fn has_value(&self, atom: &str) -> bool {
        self.values.iter().any(|v| *v == atom)
    }

    /// Returns the first child with the given name
    pub fn child(&self, name: &str) -> Option<&ParsedSexpr<'a>> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns every child with the given name, in source order
    pub fn children_named<'s>(
        &'s self,
        name: &'s str,
    ) -> impl Iterator<Item = &'s ParsedSexpr<'a>> + 's {
        self.children.iter().filter(move |c| c.name == name)
    }
}

impl<'a> From<&'a Sexpr> for ParsedSexpr<'a> {
    fn from(sexpr: &'a Sexpr) -> Self {
        Self::new(sexpr)
    }
}
