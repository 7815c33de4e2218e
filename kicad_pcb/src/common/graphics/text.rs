use kicad_sexpr::ParsedSexpr;
use uuid::Uuid;

use crate::{
    common::{Position, TextEffects},
    convert::{ignore_unknown, FromParsed, Keyword, ParsedSexprExt},
};

/// A text item, either free board text (`gr_text`) or footprint text
/// (`fp_text`).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct GraphicText {
    /// `reference`, `value` or `user`. Only footprint text has a kind.
    pub kind: Option<String>,
    pub text: String,
    pub position: Position,
    pub layer: String,
    /// Set when the layer is marked `knockout`
    pub knockout: bool,
    pub hidden: bool,
    pub effects: Option<TextEffects>,
    pub locked: bool,
    pub uuid: Option<Uuid>,
}

impl GraphicText {
    /// Reads a text node. `(fp_text KIND "TEXT" ...)` carries its kind first,
    /// `(gr_text "TEXT" ...)` starts directly with the text.
    pub(crate) fn build(node: &ParsedSexpr<'_>, footprint_text: bool) -> Self {
        let mut values = node.values.as_slice();
        let mut text = Self::default();

        if footprint_text {
            text.kind = values.first().map(|v| v.to_string());
            values = values.get(1..).unwrap_or_default();
        }

        if let ["locked", rest @ ..] = values {
            if !rest.is_empty() {
                text.locked = true;
                values = rest;
            }
        }

        text.text = values.first().map(|v| v.to_string()).unwrap_or_default();
        text.hidden = values.iter().skip(1).any(|v| *v == "hide");

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::At) => text.position = Position::from_parsed(child),
                Some(Keyword::Layer) => {
                    text.layer = child.string(0);
                    text.knockout = child.has_value("knockout");
                }
                Some(Keyword::Effects) => text.effects = Some(TextEffects::from_parsed(child)),
                Some(Keyword::Hide) => text.hidden = child.flag(),
                Some(Keyword::Locked) => text.locked = child.flag(),
                Some(Keyword::Uuid | Keyword::Tstamp) => text.uuid = child.uuid(),
                _ => ignore_unknown(node, child),
            }
        }

        if text.effects.as_ref().is_some_and(|e| e.hide) {
            text.hidden = true;
        }

        text
    }
}
