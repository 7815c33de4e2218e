//! Common structures related to footprint pads

use kicad_sexpr::ParsedSexpr;
use uuid::Uuid;

use crate::{
    common::{layer_matches, Point, Position},
    convert::{ignore_unknown, FromParsed, Keyword, ParsedSexprExt},
};

/// A footprint pad
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Pad {
    /// The pad number. Not necessarily numeric (`"A1"`), and empty for
    /// mechanical pads.
    pub number: String,
    /// `thru_hole`, `smd`, `connect` or `np_thru_hole`, verbatim
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// `circle`, `rect`, `oval`, `trapezoid`, `roundrect` or `custom`,
    /// verbatim
    pub shape: String,
    pub position: Position,
    pub size: Point,
    pub drill: Option<Drill>,
    /// Layer name patterns, verbatim. These may use wildcards such as
    /// `*.Cu`; use [`Pad::is_on_layer`] to test membership.
    pub layers: Vec<String>,
    pub net: Option<PadNet>,
    pub locked: bool,
    pub remove_unused_layers: bool,
    pub keep_end_layers: bool,
    pub round_rect_ratio: Option<f64>,
    pub pin_function: Option<String>,
    pub pin_type: Option<String>,
    pub solder_mask_margin: Option<f64>,
    pub solder_paste_margin: Option<f64>,
    pub clearance: Option<f64>,
    pub uuid: Option<Uuid>,
}

impl Pad {
    /// Returns true if any of the pad's layer patterns covers `layer`.
    pub fn is_on_layer(&self, layer: &str) -> bool {
        self.layers
            .iter()
            .any(|pattern| layer_matches(pattern, layer))
    }

    pub fn is_on_copper_layer(&self) -> bool {
        self.layers.iter().any(|l| l.ends_with(".Cu"))
    }

    pub fn is_plated(&self) -> bool {
        self.kind == "thru_hole"
    }
}

impl FromParsed for Pad {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut pad = Self {
            number: node.string(0),
            kind: node.string(1),
            shape: node.string(2),
            locked: node.has_value("locked"),
            ..Self::default()
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::At) => pad.position = Position::from_parsed(child),
                Some(Keyword::Size) => pad.size = child.point(),
                Some(Keyword::Drill) => pad.drill = Some(Drill::from_parsed(child)),
                Some(Keyword::Layers) => {
                    pad.layers = child.values.iter().map(|l| l.to_string()).collect()
                }
                Some(Keyword::Net) => pad.net = Some(PadNet::from_parsed(child)),
                Some(Keyword::Locked) => pad.locked = child.flag(),
                Some(Keyword::RemoveUnusedLayers) => pad.remove_unused_layers = child.flag(),
                Some(Keyword::KeepEndLayers) => pad.keep_end_layers = child.flag(),
                Some(Keyword::RoundrectRratio) => pad.round_rect_ratio = Some(child.number(0)),
                Some(Keyword::Pinfunction) => pad.pin_function = child.maybe_string(0),
                Some(Keyword::Pintype) => pad.pin_type = child.maybe_string(0),
                Some(Keyword::SolderMaskMargin) => pad.solder_mask_margin = Some(child.number(0)),
                Some(Keyword::SolderPasteMargin) => {
                    pad.solder_paste_margin = Some(child.number(0))
                }
                Some(Keyword::Clearance) => pad.clearance = Some(child.number(0)),
                Some(Keyword::Uuid | Keyword::Tstamp) => pad.uuid = child.uuid(),
                _ => ignore_unknown(node, child),
            }
        }

        pad
    }
}

// ############################################################################

/// A pad drill.
///
/// `(drill 0.8)` is a round hole of the given diameter. `(drill oval 1.2 0.8)`
/// is a slot, in which case `width` and `height` are set and `diameter`
/// repeats the width.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Drill {
    pub oval: bool,
    pub diameter: f64,
    /// Present if the drill is oval
    pub width: Option<f64>,
    /// Present if the drill is oval
    pub height: Option<f64>,
    pub offset: Option<Point>,
}

impl Drill {
    pub fn is_oval(&self) -> bool {
        self.oval
    }
}

impl FromParsed for Drill {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let oval = node.value(0) == Some("oval");

        let mut drill = if oval {
            Self {
                oval,
                diameter: node.number(1),
                width: Some(node.number(1)),
                height: Some(node.number(2)),
                offset: None,
            }
        } else {
            Self {
                diameter: node.number(0),
                ..Self::default()
            }
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Offset) => drill.offset = Some(child.point()),
                _ => ignore_unknown(node, child),
            }
        }

        drill
    }
}

// ############################################################################

/// The net a pad is connected to. Pads carry the name alongside the id.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct PadNet {
    pub id: i64,
    pub name: String,
}

impl FromParsed for PadNet {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        Self {
            id: node.integer(0),
            name: node.string(1),
        }
    }
}
