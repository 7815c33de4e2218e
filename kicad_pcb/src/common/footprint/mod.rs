//! Footprints placed on a board

use std::{fmt::Display, sync::OnceLock};

use kicad_sexpr::ParsedSexpr;
use regex::Regex;
use uuid::Uuid;

use crate::{
    common::{
        graphics::{parse_fp_graphic, Graphic},
        pad::Pad,
        zone::Zone,
        Position, Property, Vec3D,
    },
    convert::{ignore_unknown, FromParsed, Keyword, ParsedSexprExt},
};

/// A footprint placed on a board, read from either `footprint` or the legacy
/// `module` node.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Footprint {
    pub library_link: LibraryId,
    pub layer: String,
    pub locked: bool,
    pub placed: bool,
    pub position: Position,
    /// The `descr` token
    pub description: Option<String>,
    pub tags: Option<String>,
    /// The hierarchical path of the schematic symbol linked to the footprint
    pub path: Option<String>,
    /// The `attr` atoms, verbatim (`smd`, `through_hole`, `board_only`,
    /// `exclude_from_pos_files`, ...)
    pub attributes: Option<Vec<String>>,
    pub properties: Vec<Property>,
    pub solder_mask_margin: Option<f64>,
    pub solder_paste_margin: Option<f64>,
    pub clearance: Option<f64>,
    pub pads: Vec<Pad>,
    pub graphics: Vec<Graphic>,
    /// Keepout zones owned by the footprint
    pub zones: Vec<Zone>,
    /// The first 3D model of the footprint
    pub model: Option<Model>,
    pub uuid: Option<Uuid>,
}

impl Footprint {
    /// The reference designator, from the `Reference` property (KiCad 8) or
    /// the `fp_text reference` item (older boards).
    pub fn reference(&self) -> Option<&str> {
        self.property("Reference")
            .or_else(|| self.footprint_text("reference"))
    }

    /// The value, from the `Value` property or the `fp_text value` item.
    pub fn value(&self) -> Option<&str> {
        self.property("Value")
            .or_else(|| self.footprint_text("value"))
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Returns the first pad with the given number
    pub fn pad(&self, number: &str) -> Option<&Pad> {
        self.pads.iter().find(|p| p.number == number)
    }

    fn footprint_text(&self, kind: &str) -> Option<&str> {
        self.graphics
            .iter()
            .filter_map(Graphic::as_text)
            .find(|t| t.kind.as_deref() == Some(kind))
            .map(|t| t.text.as_str())
    }
}

impl FromParsed for Footprint {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut footprint = Self {
            library_link: node.value_or_default(0).into(),
            locked: node.has_value("locked"),
            placed: node.has_value("placed"),
            ..Self::default()
        };

        for child in &node.children {
            if let Some(graphic) = parse_fp_graphic(child) {
                footprint.graphics.push(graphic);
                continue;
            }

            match child.keyword() {
                Some(Keyword::Layer) => footprint.layer = child.string(0),
                Some(Keyword::Locked) => footprint.locked = child.flag(),
                Some(Keyword::Placed) => footprint.placed = child.flag(),
                Some(Keyword::At) => footprint.position = Position::from_parsed(child),
                Some(Keyword::Descr) => footprint.description = child.maybe_string(0),
                Some(Keyword::Tags) => footprint.tags = child.maybe_string(0),
                Some(Keyword::Path) => footprint.path = child.maybe_string(0),
                Some(Keyword::Attr) => {
                    footprint.attributes =
                        Some(child.values.iter().map(|v| v.to_string()).collect())
                }
                Some(Keyword::Property) => footprint.properties.push(Property::from_parsed(child)),
                Some(Keyword::SolderMaskMargin) => {
                    footprint.solder_mask_margin = Some(child.number(0))
                }
                Some(Keyword::SolderPasteMargin) => {
                    footprint.solder_paste_margin = Some(child.number(0))
                }
                Some(Keyword::Clearance) => footprint.clearance = Some(child.number(0)),
                Some(Keyword::Pad) => footprint.pads.push(Pad::from_parsed(child)),
                Some(Keyword::Zone) => footprint.zones.push(Zone::from_parsed(child)),
                Some(Keyword::Model) if footprint.model.is_none() => {
                    footprint.model = Some(Model::from_parsed(child))
                }
                // Only the first model is kept
                Some(Keyword::Model) => {}
                Some(Keyword::Uuid | Keyword::Tstamp) => footprint.uuid = child.uuid(),
                _ => ignore_unknown(node, child),
            }
        }

        footprint
    }
}

// ############################################################################

/// A `library:entry` footprint identifier. The library nickname is optional.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Default)]
pub struct LibraryId {
    pub library: Option<String>,
    pub name: String,
}

impl LibraryId {
    pub fn new(library: Option<&str>, name: &str) -> Self {
        Self {
            library: library.map(ToString::to_string),
            name: name.to_string(),
        }
    }

    pub fn parts(&self) -> (Option<&str>, &str) {
        (self.library.as_deref(), &self.name)
    }
}

fn library_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();

    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)^(?:([^:]+):)?(.*)$").expect("library id pattern is valid")
    })
}

impl From<&str> for LibraryId {
    /// Splits on the first `:`. Anything after it, including further colons,
    /// is the entry name.
    fn from(s: &str) -> Self {
        let Some(captures) = library_id_pattern().captures(s) else {
            return Self::new(None, s);
        };

        Self {
            library: captures.get(1).map(|m| m.as_str().to_string()),
            name: captures
                .get(2)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

impl Display for LibraryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(library) = &self.library {
            write!(f, "{}:{}", library, self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

// ############################################################################

/// A 3D model associated with a footprint.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Model {
    pub path: String,
    pub offset: Option<Vec3D>,
    pub scale: Option<Vec3D>,
    pub rotate: Option<Vec3D>,
    pub hide: bool,
    pub opacity: Option<f64>,
}

impl FromParsed for Model {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut model = Self {
            path: node.string(0),
            hide: node.has_value("hide"),
            ..Self::default()
        };

        for child in &node.children {
            match child.keyword() {
                // KiCad 5 wrote the offset as `at`, in inches
                Some(Keyword::Offset | Keyword::At) => {
                    model.offset = Some(Vec3D::from_parsed(child))
                }
                Some(Keyword::Scale) => model.scale = Some(Vec3D::from_parsed(child)),
                Some(Keyword::Rotate) => model.rotate = Some(Vec3D::from_parsed(child)),
                Some(Keyword::Hide) => model.hide = child.flag(),
                Some(Keyword::Opacity) => model.opacity = Some(child.number(0)),
                _ => ignore_unknown(node, child),
            }
        }

        model
    }
}
