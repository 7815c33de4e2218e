//! Common structures related to board Zones.

use kicad_sexpr::ParsedSexpr;
use uuid::Uuid;

use crate::{
    common::Point,
    convert::{ignore_unknown, FromParsed, Keyword, ParsedSexprExt},
};

/// A copper pour or keepout area.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Zone {
    pub net: i64,
    pub net_name: String,
    /// From either `(layer "F.Cu")` or `(layers "F.Cu" "B.Cu")`
    pub layers: Vec<String>,
    pub name: Option<String>,
    pub priority: Option<i64>,
    pub hatch: Option<Hatch>,
    pub connect_pads: Option<PadConnection>,
    pub min_thickness: Option<f64>,
    pub filled_areas_thickness: Option<bool>,
    /// Present for rule areas
    pub keepout: Option<KeepoutSettings>,
    pub fill: Option<ZoneFill>,
    /// The outline drawn by the user
    pub polygon: Vec<Point>,
    /// The fill computed by the zone filler, one entry per layer and island
    pub filled_polygons: Vec<FilledPolygon>,
    pub locked: bool,
    pub uuid: Option<Uuid>,
}

impl Zone {
    pub fn is_keepout(&self) -> bool {
        self.keepout.is_some()
    }
}

impl FromParsed for Zone {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut zone = Self {
            locked: node.has_value("locked"),
            ..Self::default()
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Net) => zone.net = child.integer(0),
                Some(Keyword::NetName) => zone.net_name = child.string(0),
                Some(Keyword::Layer | Keyword::Layers) => {
                    zone.layers = child.values.iter().map(|l| l.to_string()).collect()
                }
                Some(Keyword::Name) => zone.name = child.maybe_string(0),
                Some(Keyword::Priority) => zone.priority = Some(child.integer(0)),
                Some(Keyword::Hatch) => {
                    zone.hatch = Some(Hatch {
                        style: child.string(0),
                        pitch: child.number(1),
                    })
                }
                Some(Keyword::ConnectPads) => {
                    zone.connect_pads = Some(PadConnection::from_parsed(child))
                }
                Some(Keyword::MinThickness) => zone.min_thickness = Some(child.number(0)),
                Some(Keyword::FilledAreasThickness) => {
                    zone.filled_areas_thickness = Some(child.is_yes())
                }
                Some(Keyword::Keepout) => zone.keepout = Some(KeepoutSettings::from_parsed(child)),
                Some(Keyword::Fill) => zone.fill = Some(ZoneFill::from_parsed(child)),
                Some(Keyword::Polygon) => zone.polygon = child.points(),
                Some(Keyword::FilledPolygon) => {
                    zone.filled_polygons.push(FilledPolygon::from_parsed(child))
                }
                Some(Keyword::Locked) => zone.locked = child.flag(),
                Some(Keyword::Uuid | Keyword::Tstamp) => zone.uuid = child.uuid(),
                _ => ignore_unknown(node, child),
            }
        }

        zone
    }
}

// ############################################################################

/// How the zone outline is hatched in the editor
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Hatch {
    /// `none`, `edge` or `full`
    pub style: String,
    pub pitch: f64,
}

/// How pads inside the zone connect to it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct PadConnection {
    /// `yes` (solid), `no` or `thru_hole_only`. Absent means thermal reliefs.
    pub kind: Option<String>,
    pub clearance: Option<f64>,
}

impl FromParsed for PadConnection {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut connection = Self {
            kind: node.maybe_string(0),
            clearance: None,
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Clearance) => connection.clearance = Some(child.number(0)),
                _ => ignore_unknown(node, child),
            }
        }

        connection
    }
}

// ############################################################################

/// Rule area restrictions. Each flag is `true` when the item is allowed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone)]
pub struct KeepoutSettings {
    pub tracks: bool,
    pub vias: bool,
    pub pads: bool,
    pub copper_pour: bool,
    pub footprints: bool,
}

impl Default for KeepoutSettings {
    fn default() -> Self {
        Self {
            tracks: true,
            vias: true,
            pads: true,
            copper_pour: true,
            footprints: true,
        }
    }
}

impl FromParsed for KeepoutSettings {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut keepout = Self::default();

        for child in &node.children {
            let allowed = child.value(0) != Some("not_allowed");

            match child.keyword() {
                Some(Keyword::Tracks) => keepout.tracks = allowed,
                Some(Keyword::Vias) => keepout.vias = allowed,
                Some(Keyword::Pads) => keepout.pads = allowed,
                Some(Keyword::Copperpour) => keepout.copper_pour = allowed,
                Some(Keyword::Footprints) => keepout.footprints = allowed,
                _ => ignore_unknown(node, child),
            }
        }

        keepout
    }
}

// ############################################################################

/// Zone fill settings
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ZoneFill {
    /// Set by `(fill yes ...)`. The zone has been filled at least once.
    pub filled: bool,
    /// `hatch` for hatched fills. Absent means solid.
    pub mode: Option<String>,
    pub thermal_gap: Option<f64>,
    pub thermal_bridge_width: Option<f64>,
    /// `chamfer` or `fillet`
    pub smoothing: Option<String>,
    pub radius: Option<f64>,
    pub island_removal_mode: Option<i64>,
    pub island_area_min: Option<f64>,
    pub hatch_thickness: Option<f64>,
    pub hatch_gap: Option<f64>,
    pub hatch_orientation: Option<f64>,
}

impl FromParsed for ZoneFill {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut fill = Self {
            filled: node.is_yes(),
            ..Self::default()
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Mode) => fill.mode = child.maybe_string(0),
                Some(Keyword::ThermalGap) => fill.thermal_gap = Some(child.number(0)),
                Some(Keyword::ThermalBridgeWidth) => {
                    fill.thermal_bridge_width = Some(child.number(0))
                }
                Some(Keyword::Smoothing) => fill.smoothing = child.maybe_string(0),
                Some(Keyword::Radius) => fill.radius = Some(child.number(0)),
                Some(Keyword::IslandRemovalMode) => {
                    fill.island_removal_mode = Some(child.integer(0))
                }
                Some(Keyword::IslandAreaMin) => fill.island_area_min = Some(child.number(0)),
                Some(Keyword::HatchThickness) => fill.hatch_thickness = Some(child.number(0)),
                Some(Keyword::HatchGap) => fill.hatch_gap = Some(child.number(0)),
                Some(Keyword::HatchOrientation) => fill.hatch_orientation = Some(child.number(0)),
                _ => ignore_unknown(node, child),
            }
        }

        fill
    }
}

// ############################################################################

/// One polygon of the computed zone fill
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct FilledPolygon {
    /// Absent on KiCad 5 boards, where the zone has a single layer
    pub layer: Option<String>,
    pub island: bool,
    pub points: Vec<Point>,
}

impl FromParsed for FilledPolygon {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut polygon = Self::default();

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Layer) => polygon.layer = child.maybe_string(0),
                Some(Keyword::Island) => polygon.island = child.flag(),
                Some(Keyword::Pts) => polygon.points = child.xy_list(),
                _ => ignore_unknown(node, child),
            }
        }

        polygon
    }
}
