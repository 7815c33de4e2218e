//! PCB board file format (`.kicad_pcb` files)

use kicad_sexpr::{ParsedSexpr, Sexpr};
use uuid::Uuid;

use crate::{
    common::{
        footprint::Footprint,
        graphics::{parse_graphic, Graphic},
        zone::Zone,
        PageSettings, Property, TitleBlock,
    },
    convert::{ignore_unknown, parse_uuid, FromParsed, Keyword, ParsedSexprExt},
};

use self::{
    setup::BoardSetup,
    track::{TrackArc, TrackSegment, Via},
};

pub mod consistency;
pub mod setup;
pub mod track;

/// A parsed board (`.kicad_pcb` file). Every sequence is in file order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct KiCadPcb {
    /// The file format version, a date such as `20221018`
    pub version: i64,
    pub generator: String,
    pub generator_version: Option<String>,
    pub general: Option<GeneralSettings>,
    /// From `paper`, or `page` on older boards
    pub paper: Option<PageSettings>,
    pub title_block: Option<TitleBlock>,
    pub layers: Vec<BoardLayer>,
    pub setup: Option<BoardSetup>,
    pub properties: Vec<Property>,
    pub nets: Vec<Net>,
    pub net_classes: Vec<NetClass>,
    pub footprints: Vec<Footprint>,
    pub segments: Vec<TrackSegment>,
    pub arcs: Vec<TrackArc>,
    pub vias: Vec<Via>,
    pub zones: Vec<Zone>,
    pub graphics: Vec<Graphic>,
    pub groups: Vec<Group>,
    /// `dimension` nodes, kept as they were read
    pub dimensions: Vec<Sexpr>,
    /// `target` nodes, kept as they were read
    pub targets: Vec<Sexpr>,
}

impl KiCadPcb {
    /// Returns the net with the given id
    pub fn net(&self, id: i64) -> Option<&Net> {
        self.nets.iter().find(|n| n.id == id)
    }

    pub fn net_by_name(&self, name: &str) -> Option<&Net> {
        self.nets.iter().find(|n| n.name == name)
    }

    /// Returns the layer with the given ordinal
    pub fn layer(&self, ordinal: i64) -> Option<&BoardLayer> {
        self.layers.iter().find(|l| l.ordinal == ordinal)
    }

    /// Finds a layer by its canonical name (`F.SilkS`) or its user name
    /// (`F.Silkscreen`).
    pub fn layer_by_name(&self, name: &str) -> Option<&BoardLayer> {
        self.layers
            .iter()
            .find(|l| l.name == name || l.user_name.as_deref() == Some(name))
    }

    pub fn footprint_by_reference(&self, reference: &str) -> Option<&Footprint> {
        self.footprints
            .iter()
            .find(|f| f.reference() == Some(reference))
    }
}

impl FromParsed for KiCadPcb {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut pcb = Self::default();

        for child in &node.children {
            if let Some(graphic) = parse_graphic(child) {
                pcb.graphics.push(graphic);
                continue;
            }

            match child.keyword() {
                Some(Keyword::Version) => pcb.version = child.integer(0),
                Some(Keyword::Generator) => pcb.generator = child.string(0),
                Some(Keyword::GeneratorVersion) => pcb.generator_version = child.maybe_string(0),
                Some(Keyword::General) => pcb.general = Some(GeneralSettings::from_parsed(child)),
                Some(Keyword::Paper | Keyword::Page) => {
                    pcb.paper = Some(PageSettings::from_parsed(child))
                }
                Some(Keyword::TitleBlock) => pcb.title_block = Some(TitleBlock::from_parsed(child)),
                Some(Keyword::Layers) => pcb.layers = parse_layers(child),
                Some(Keyword::Setup) => pcb.setup = Some(BoardSetup::from_parsed(child)),
                Some(Keyword::Property) => pcb.properties.push(Property::from_parsed(child)),
                Some(Keyword::Net) => pcb.nets.push(Net::from_parsed(child)),
                Some(Keyword::NetClass) => pcb.net_classes.push(NetClass::from_parsed(child)),
                Some(Keyword::Footprint | Keyword::Module) => {
                    pcb.footprints.push(Footprint::from_parsed(child))
                }
                Some(Keyword::Segment) => pcb.segments.push(TrackSegment::from_parsed(child)),
                Some(Keyword::Arc) => pcb.arcs.push(TrackArc::from_parsed(child)),
                Some(Keyword::Via) => pcb.vias.push(Via::from_parsed(child)),
                Some(Keyword::Zone) => pcb.zones.push(Zone::from_parsed(child)),
                Some(Keyword::Group) => pcb.groups.push(Group::from_parsed(child)),
                Some(Keyword::Dimension) => pcb.dimensions.push(child.raw.clone()),
                Some(Keyword::Target) => pcb.targets.push(child.raw.clone()),
                _ => ignore_unknown(node, child),
            }
        }

        pcb
    }
}

// ############################################################################

/// General board information. Boards before KiCad 6 also carry item counts
/// here.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct GeneralSettings {
    /// The overall board thickness
    pub thickness: Option<f64>,
    pub legacy_teardrops: bool,
    pub links: Option<i64>,
    pub no_connects: Option<i64>,
    pub drawings: Option<i64>,
    pub tracks: Option<i64>,
    pub zones: Option<i64>,
    /// From `footprints`, or `modules` on older boards
    pub footprints: Option<i64>,
    pub nets: Option<i64>,
}

impl FromParsed for GeneralSettings {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut general = Self::default();

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Thickness) => general.thickness = Some(child.number(0)),
                Some(Keyword::LegacyTeardrops) => general.legacy_teardrops = child.is_yes(),
                Some(Keyword::Links) => general.links = Some(child.integer(0)),
                Some(Keyword::NoConnects) => general.no_connects = Some(child.integer(0)),
                Some(Keyword::Drawings) => general.drawings = Some(child.integer(0)),
                Some(Keyword::Tracks) => general.tracks = Some(child.integer(0)),
                Some(Keyword::Zones) => general.zones = Some(child.integer(0)),
                Some(Keyword::Footprints | Keyword::Modules) => {
                    general.footprints = Some(child.integer(0))
                }
                Some(Keyword::Nets) => general.nets = Some(child.integer(0)),
                _ => ignore_unknown(node, child),
            }
        }

        general
    }
}

// ############################################################################

/// Looks like:
/// ```text
/// (0 "F.Cu" signal ["Front Copper"])
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct BoardLayer {
    pub ordinal: i64,
    /// The canonical layer name (`F.Cu`, `B.SilkS`, `User.1`)
    pub name: String,
    /// `signal`, `power`, `mixed`, `jumper` or `user`, verbatim
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// The name shown in the editor, when it differs from `name`
    pub user_name: Option<String>,
}

impl BoardLayer {
    pub fn is_copper(&self) -> bool {
        self.name.ends_with(".Cu")
    }
}

/// Reads the `layers` table. Each entry is a list whose head is the layer
/// ordinal; entries without a numeric head are skipped.
fn parse_layers(node: &ParsedSexpr<'_>) -> Vec<BoardLayer> {
    node.children
        .iter()
        .filter_map(|child| {
            let Some(ordinal) = kicad_sexpr::number::parse_int_prefix(child.name) else {
                ignore_unknown(node, child);
                return None;
            };

            Some(BoardLayer {
                ordinal,
                name: child.string(0),
                kind: child.string(1),
                user_name: child.maybe_string(2),
            })
        })
        .collect()
}

// ############################################################################

/// A board net. Net `0` is the unconnected net and has an empty name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Default)]
pub struct Net {
    pub id: i64,
    pub name: String,
}

impl FromParsed for Net {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        Self {
            id: node.integer(0),
            name: node.string(1),
        }
    }
}

/// Design rules shared by a set of nets. Net classes are stored in the board
/// file up to KiCad 5 and in the project file afterwards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct NetClass {
    pub name: String,
    /// The second value of the `net_class` node itself
    pub description: String,
    pub clearance: Option<f64>,
    pub trace_width: Option<f64>,
    pub via_diameter: Option<f64>,
    pub via_drill: Option<f64>,
    pub micro_via_diameter: Option<f64>,
    pub micro_via_drill: Option<f64>,
    pub diff_pair_width: Option<f64>,
    pub diff_pair_gap: Option<f64>,
    /// Names of the member nets
    pub nets: Vec<String>,
}

impl FromParsed for NetClass {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut net_class = Self {
            name: node.string(0),
            description: node.string(1),
            ..Self::default()
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Clearance) => net_class.clearance = Some(child.number(0)),
                Some(Keyword::TraceWidth) => net_class.trace_width = Some(child.number(0)),
                Some(Keyword::ViaDia) => net_class.via_diameter = Some(child.number(0)),
                Some(Keyword::ViaDrill) => net_class.via_drill = Some(child.number(0)),
                Some(Keyword::UviaDia) => net_class.micro_via_diameter = Some(child.number(0)),
                Some(Keyword::UviaDrill) => net_class.micro_via_drill = Some(child.number(0)),
                Some(Keyword::DiffPairWidth) => net_class.diff_pair_width = Some(child.number(0)),
                Some(Keyword::DiffPairGap) => net_class.diff_pair_gap = Some(child.number(0)),
                Some(Keyword::AddNet) => net_class.nets.push(child.string(0)),
                _ => ignore_unknown(node, child),
            }
        }

        net_class
    }
}

// ############################################################################

/// A named set of board items that are selected and moved together.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Group {
    pub name: String,
    /// From `id` (KiCad 6 and 7) or `uuid` (KiCad 8)
    pub uuid: Option<Uuid>,
    pub locked: bool,
    /// Identifiers of the member items
    pub members: Vec<Uuid>,
}

impl FromParsed for Group {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut group = Self {
            name: node.string(0),
            locked: node.has_value("locked"),
            ..Self::default()
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Id | Keyword::Uuid) => group.uuid = child.uuid(),
                Some(Keyword::Locked) => group.locked = child.flag(),
                Some(Keyword::Members) => {
                    group.members = child
                        .values
                        .iter()
                        .filter_map(|v| parse_uuid(v))
                        .collect()
                }
                _ => ignore_unknown(node, child),
            }
        }

        group
    }
}

#[cfg(test)]
mod tests {
    use kicad_sexpr::from_str;

    use super::*;

    fn pcb(input: &str) -> KiCadPcb {
        let sexpr = from_str(input).unwrap();

        KiCadPcb::from_parsed(&ParsedSexpr::new(&sexpr))
    }

    #[test]
    fn test_layers_table() {
        let pcb = pcb(
            r#"(kicad_pcb (layers
                (0 "F.Cu" signal)
                (31 "B.Cu" signal)
                (not_a_layer "X")
                (37 "F.SilkS" user "F.Silkscreen")))"#,
        );

        assert_eq!(
            pcb.layers,
            [
                BoardLayer {
                    ordinal: 0,
                    name: "F.Cu".to_string(),
                    kind: "signal".to_string(),
                    user_name: None,
                },
                BoardLayer {
                    ordinal: 31,
                    name: "B.Cu".to_string(),
                    kind: "signal".to_string(),
                    user_name: None,
                },
                BoardLayer {
                    ordinal: 37,
                    name: "F.SilkS".to_string(),
                    kind: "user".to_string(),
                    user_name: Some("F.Silkscreen".to_string()),
                },
            ]
        );

        assert_eq!(pcb.layer(31).map(|l| l.name.as_str()), Some("B.Cu"));
        assert_eq!(
            pcb.layer_by_name("F.Silkscreen").map(|l| l.ordinal),
            Some(37)
        );
        assert!(pcb.layer(1).is_none());
        assert!(pcb.layer(0).is_some_and(BoardLayer::is_copper));
    }

    #[test]
    fn test_nets_and_net_classes() {
        let pcb = pcb(
            r#"(kicad_pcb
                (net 0 "")
                (net 1 "GND")
                (net 2 "/SDA")
                (net_class "Default" "This is the default net class."
                    (clearance 0.2) (trace_width 0.25) (via_dia 0.8) (via_drill 0.4)
                    (uvia_dia 0.3) (uvia_drill 0.1)
                    (add_net "GND") (add_net "/SDA")))"#,
        );

        assert_eq!(pcb.nets.len(), 3);
        assert_eq!(pcb.net(2).map(|n| n.name.as_str()), Some("/SDA"));
        assert_eq!(pcb.net_by_name("GND").map(|n| n.id), Some(1));
        assert!(pcb.net(7).is_none());

        let class = &pcb.net_classes[0];
        assert_eq!(class.name, "Default");
        assert_eq!(class.description, "This is the default net class.");
        assert_eq!(class.clearance, Some(0.2));
        assert_eq!(class.micro_via_drill, Some(0.1));
        assert_eq!(class.diff_pair_gap, None);
        assert_eq!(class.nets, ["GND", "/SDA"]);
    }

    #[test]
    fn test_header() {
        let pcb = pcb(
            r#"(kicad_pcb (version 20240108) (generator "pcbnew") (generator_version "8.0")
                (general (thickness 1.6) (legacy_teardrops no))
                (paper "A4")
                (title_block (title "Test"))
                (setup (pad_to_mask_clearance 0))
                (property "Revision" "3"))"#,
        );

        assert_eq!(pcb.version, 20240108);
        assert_eq!(pcb.generator, "pcbnew");
        assert_eq!(pcb.generator_version.as_deref(), Some("8.0"));

        let general = pcb.general.unwrap();
        assert_eq!(general.thickness, Some(1.6));
        assert!(!general.legacy_teardrops);

        assert_eq!(pcb.paper.map(|p| p.size), Some("A4".to_string()));
        assert_eq!(
            pcb.title_block.and_then(|t| t.title),
            Some("Test".to_string())
        );
        assert_eq!(pcb.setup.and_then(|s| s.pad_to_mask_clearance), Some(0.0));
        assert_eq!(pcb.properties, [Property::new("Revision", "3")]);
    }

    #[test]
    fn test_legacy_general_counts() {
        let pcb = pcb(
            "(kicad_pcb (version 20171130) (host pcbnew 5.1.9)
                (general (thickness 1.6) (drawings 12) (tracks 40) (zones 0) (modules 7) (nets 9))
                (page A4))",
        );

        let general = pcb.general.unwrap();
        assert_eq!(general.footprints, Some(7));
        assert_eq!(general.tracks, Some(40));
        assert_eq!(general.links, None);
        assert_eq!(pcb.paper.map(|p| p.size), Some("A4".to_string()));
        assert_eq!(pcb.generator, "");
    }

    #[test]
    fn test_groups() {
        let pcb = pcb(
            r#"(kicad_pcb (group "" locked (id 1f2e3d4c-5b6a-4978-8695-a4b3c2d1e0f9)
                (members 0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d 5E4A1F2B junk)))"#,
        );

        let group = &pcb.groups[0];
        assert_eq!(group.name, "");
        assert!(group.locked);
        assert!(group.uuid.is_some());
        assert_eq!(group.members.len(), 2);
    }

    #[test]
    fn test_passthrough_and_unknown_nodes() {
        let pcb = pcb(
            r#"(kicad_pcb
                (dimension (type aligned) (layer "Dwgs.User") (pts (xy 0 0) (xy 10 0)))
                (target plus (at 5 5) (size 5) (width 0.1) (layer "Edge.Cuts"))
                (embedded_fonts no)
                (some_future_node (with "children")))"#,
        );

        assert_eq!(pcb.dimensions.len(), 1);
        assert_eq!(pcb.dimensions[0].head(), Some("dimension"));
        assert_eq!(pcb.targets.len(), 1);
        assert!(pcb.graphics.is_empty());
    }

    #[test]
    fn test_tracks_and_graphics_keep_file_order() {
        let pcb = pcb(
            r#"(kicad_pcb
                (segment (start 0 0) (end 1 0) (width 0.2) (layer "F.Cu") (net 1))
                (gr_line (start 0 0) (end 5 0) (layer "Edge.Cuts"))
                (via (at 1 0) (size 0.6) (drill 0.3) (layers "F.Cu" "B.Cu") (net 1))
                (segment (start 1 0) (end 2 0) (width 0.2) (layer "B.Cu") (net 1))
                (gr_text "x" (at 0 0) (layer "F.SilkS"))
                (arc (start 2 0) (mid 2.5 0.5) (end 3 0) (width 0.2) (layer "B.Cu") (net 1)))"#,
        );

        assert_eq!(
            pcb.segments.iter().map(|s| s.layer.as_str()).collect::<Vec<_>>(),
            ["F.Cu", "B.Cu"]
        );
        assert_eq!(pcb.vias.len(), 1);
        assert_eq!(pcb.arcs.len(), 1);
        assert_eq!(
            pcb.graphics.iter().map(Graphic::layer).collect::<Vec<_>>(),
            ["Edge.Cuts", "F.SilkS"]
        );
    }
}
