//! Conversion from normalized S-expression nodes into the typed board model.
//!
//! Every record implements [`FromParsed`]. Builders start from the record's
//! default, walk the node's children once in file order and dispatch on the
//! child's [`Keyword`]. Anything not recognised falls through to
//! [`ignore_unknown`], which keeps the builder forward compatible with newer
//! KiCad releases.

use kicad_sexpr::ParsedSexpr;
use strum::{EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::common::Point;

/// Builds a record from a normalized node. This never fails: missing or
/// malformed children leave the corresponding field at its default.
pub trait FromParsed: Sized {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self;
}

/// Every node name the builders know how to read.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Keyword {
    // board
    KicadPcb,
    Version,
    Generator,
    GeneratorVersion,
    General,
    Paper,
    Page,
    TitleBlock,
    Layers,
    Setup,
    Property,
    Net,
    NetClass,
    Footprint,
    Module,
    Segment,
    Arc,
    Via,
    Zone,
    GrLine,
    GrRect,
    GrCircle,
    GrArc,
    GrPoly,
    GrCurve,
    Bezier,
    GrText,
    Dimension,
    Target,
    Group,

    // general
    Thickness,
    LegacyTeardrops,
    Links,
    NoConnects,
    Drawings,
    Tracks,
    Zones,
    Modules,
    Footprints,
    Nets,

    // title block
    Title,
    Date,
    Rev,
    Company,
    Comment,

    // setup
    PadToMaskClearance,
    SolderMaskMinWidth,
    PadToPasteClearance,
    PadToPasteClearanceRatio,
    AllowSoldermaskBridgesInFootprints,
    AuxAxisOrigin,
    GridOrigin,

    // net class
    Clearance,
    TraceWidth,
    ViaDia,
    ViaDrill,
    UviaDia,
    UviaDrill,
    DiffPairWidth,
    DiffPairGap,
    AddNet,

    // placement and tracks
    Start,
    Mid,
    End,
    Center,
    Angle,
    Width,
    Layer,
    Uuid,
    Tstamp,
    Locked,
    At,
    Size,
    Drill,
    Free,
    RemoveUnusedLayers,
    KeepEndLayers,

    // footprint and pad
    Placed,
    Descr,
    Tags,
    Path,
    Attr,
    FpText,
    FpLine,
    FpRect,
    FpCircle,
    FpArc,
    FpPoly,
    FpCurve,
    Pad,
    Model,
    SolderMaskMargin,
    SolderPasteMargin,
    RoundrectRratio,
    Pinfunction,
    Pintype,
    Offset,
    Scale,
    Rotate,
    Opacity,
    Hide,
    Xyz,

    // zone
    NetName,
    Name,
    Hatch,
    Priority,
    ConnectPads,
    MinThickness,
    FilledAreasThickness,
    Keepout,
    Fill,
    Polygon,
    FilledPolygon,
    Pts,
    Xy,
    Island,
    Vias,
    Pads,
    Copperpour,
    Mode,
    ThermalGap,
    ThermalBridgeWidth,
    Smoothing,
    Radius,
    IslandRemovalMode,
    IslandAreaMin,
    HatchThickness,
    HatchGap,
    HatchOrientation,

    // graphics and text
    Stroke,
    Type,
    Color,
    Effects,
    Font,
    Face,
    Bold,
    Italic,
    LineSpacing,
    Justify,

    // groups
    Id,
    Members,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Helpers shared by the builders for the recurring KiCad idioms.
pub trait ParsedSexprExt {
    /// The node name as a known keyword
    fn keyword(&self) -> Option<Keyword>;

    /// Reads a flag child such as `(locked)`, `(locked yes)` or
    /// `(locked no)`. A flag without a value is set.
    fn flag(&self) -> bool;

    /// True only if the first value is the literal atom `yes`
    fn is_yes(&self) -> bool;

    /// The value at `index` as an owned string, empty if missing
    fn string(&self, index: usize) -> String;

    /// The value at `index` as an owned string, if present
    fn maybe_string(&self, index: usize) -> Option<String>;

    /// Reads `(<name> x y)` as a point
    fn point(&self) -> Point;

    /// Reads a `uuid` or `tstamp` node
    fn uuid(&self) -> Option<Uuid>;

    /// Reads the `(xy x y)` children of a `pts` node
    fn xy_list(&self) -> Vec<Point>;

    /// Reads the `(pts (xy x y) ...)` child if there is one
    fn points(&self) -> Vec<Point>;
}

impl ParsedSexprExt for ParsedSexpr<'_> {
    fn keyword(&self) -> Option<Keyword> {
        self.name.parse().ok()
    }

    fn flag(&self) -> bool {
        self.value(0).map_or(true, |v| v == "yes")
    }

    fn is_yes(&self) -> bool {
        self.value(0) == Some("yes")
    }

    fn string(&self, index: usize) -> String {
        self.value_or_default(index).to_string()
    }

    fn maybe_string(&self, index: usize) -> Option<String> {
        self.value(index).map(str::to_string)
    }

    fn point(&self) -> Point {
        Point::new(self.number(0), self.number(1))
    }

    fn uuid(&self) -> Option<Uuid> {
        self.value(0).and_then(parse_uuid)
    }

    fn xy_list(&self) -> Vec<Point> {
        self.children_named(Keyword::Xy.as_str())
            .map(|xy| xy.point())
            .collect()
    }

    fn points(&self) -> Vec<Point> {
        self.child(Keyword::Pts.as_str())
            .map(|pts| pts.xy_list())
            .unwrap_or_default()
    }
}

/// Parses a KiCad identifier.
///
/// KiCad 6 and later write RFC 4122 UUIDs. Older boards carry 8 hex digit
/// timestamps (`tstamp 5E4A1F2B`), which are stored in the low bits of a
/// UUID so that every item keeps a comparable identifier.
pub fn parse_uuid(value: &str) -> Option<Uuid> {
    if let Ok(uuid) = Uuid::parse_str(value) {
        return Some(uuid);
    }

    if value.len() == 8 {
        return u32::from_str_radix(value, 16)
            .ok()
            .map(|timestamp| Uuid::from_u128(timestamp as u128));
    }

    None
}

/// The catch-all arm for every builder.
pub fn ignore_unknown(parent: &ParsedSexpr<'_>, child: &ParsedSexpr<'_>) {
    log::trace!("ignoring `{}` inside `{}`", child.name, parent.name);
}
