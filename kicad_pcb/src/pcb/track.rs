//! Copper tracks: straight segments, arcs and vias

use kicad_sexpr::ParsedSexpr;
use uuid::Uuid;

use crate::{
    common::{layer_matches, Point},
    convert::{ignore_unknown, FromParsed, Keyword, ParsedSexprExt},
};

/// The simplest form of a track, a straight line segment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename = "segment"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct TrackSegment {
    pub start: Point,
    pub end: Point,
    pub width: f64,
    pub layer: String,
    pub net: i64,
    pub locked: bool,
    pub uuid: Option<Uuid>,
}

impl FromParsed for TrackSegment {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut segment = Self {
            locked: node.has_value("locked"),
            ..Self::default()
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Start) => segment.start = child.point(),
                Some(Keyword::End) => segment.end = child.point(),
                Some(Keyword::Width) => segment.width = child.number(0),
                Some(Keyword::Layer) => segment.layer = child.string(0),
                Some(Keyword::Net) => segment.net = child.integer(0),
                Some(Keyword::Locked) => segment.locked = child.flag(),
                Some(Keyword::Uuid | Keyword::Tstamp) => segment.uuid = child.uuid(),
                _ => ignore_unknown(node, child),
            }
        }

        segment
    }
}

/// A curved track through three points.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename = "arc"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct TrackArc {
    pub start: Point,
    pub mid: Point,
    pub end: Point,
    pub width: f64,
    pub layer: String,
    pub net: i64,
    pub locked: bool,
    pub uuid: Option<Uuid>,
}

impl FromParsed for TrackArc {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut arc = Self {
            locked: node.has_value("locked"),
            ..Self::default()
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Start) => arc.start = child.point(),
                Some(Keyword::Mid) => arc.mid = child.point(),
                Some(Keyword::End) => arc.end = child.point(),
                Some(Keyword::Width) => arc.width = child.number(0),
                Some(Keyword::Layer) => arc.layer = child.string(0),
                Some(Keyword::Net) => arc.net = child.integer(0),
                Some(Keyword::Locked) => arc.locked = child.flag(),
                Some(Keyword::Uuid | Keyword::Tstamp) => arc.uuid = child.uuid(),
                _ => ignore_unknown(node, child),
            }
        }

        arc
    }
}

/// A via, a plated hole connecting copper layers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename = "via"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Via {
    /// `blind` or `micro`. Absent for through vias.
    pub kind: Option<String>,
    pub position: Point,
    pub size: f64,
    pub drill: f64,
    /// The start and end copper layers
    pub layers: Vec<String>,
    pub net: i64,
    pub locked: bool,
    /// Not automatically assigned to a net by the track tools
    pub free: bool,
    pub remove_unused_layers: bool,
    pub keep_end_layers: bool,
    pub uuid: Option<Uuid>,
}

impl Via {
    pub fn is_on_layer(&self, layer: &str) -> bool {
        self.layers
            .iter()
            .any(|pattern| layer_matches(pattern, layer))
    }
}

impl FromParsed for Via {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut via = Self {
            kind: node
                .values
                .iter()
                .find(|v| **v != "locked")
                .map(|v| v.to_string()),
            locked: node.has_value("locked"),
            ..Self::default()
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::At) => via.position = child.point(),
                Some(Keyword::Size) => via.size = child.number(0),
                Some(Keyword::Drill) => via.drill = child.number(0),
                Some(Keyword::Layers) => {
                    via.layers = child.values.iter().map(|l| l.to_string()).collect()
                }
                Some(Keyword::Net) => via.net = child.integer(0),
                Some(Keyword::Locked) => via.locked = child.flag(),
                Some(Keyword::Free) => via.free = child.flag(),
                Some(Keyword::RemoveUnusedLayers) => via.remove_unused_layers = child.flag(),
                Some(Keyword::KeepEndLayers) => via.keep_end_layers = child.flag(),
                Some(Keyword::Uuid | Keyword::Tstamp) => via.uuid = child.uuid(),
                _ => ignore_unknown(node, child),
            }
        }

        via
    }
}

#[cfg(test)]
mod tests {
    use kicad_sexpr::from_str;

    use super::*;

    fn build<T: FromParsed>(input: &str) -> T {
        let sexpr = from_str(input).unwrap();

        T::from_parsed(&ParsedSexpr::new(&sexpr))
    }

    #[test]
    fn test_segment() {
        let segment: TrackSegment = build(
            r#"(segment (start 0 0) (end 10 0) (width 0.25) (layer "F.Cu") (net 0)
                (uuid "0c8b4a2e-6f1d-4e3a-9b5c-7d2e1f0a3b4c"))"#,
        );

        assert_eq!(segment.start, Point::new(0.0, 0.0));
        assert_eq!(segment.end, Point::new(10.0, 0.0));
        assert_eq!(segment.width, 0.25);
        assert_eq!(segment.layer, "F.Cu");
        assert_eq!(segment.net, 0);
        assert!(!segment.locked);
        assert!(segment.uuid.is_some());
    }

    #[test]
    fn test_locked_segment() {
        let legacy: TrackSegment = build(
            "(segment locked (start 0 0) (end 1 1) (width 0.2) (layer B.Cu) (net 3) (tstamp 5E4A1F2B))",
        );
        assert!(legacy.locked);
        assert_eq!(legacy.net, 3);

        let current: TrackSegment = build(
            r#"(segment (start 0 0) (end 1 1) (locked yes) (layer "B.Cu"))"#,
        );
        assert!(current.locked);
    }

    #[test]
    fn test_arc() {
        let arc: TrackArc = build(
            r#"(arc (start 0 0) (mid 0.7 0.3) (end 1 1) (width 0.2) (layer "In1.Cu") (net 4))"#,
        );

        assert_eq!(arc.mid, Point::new(0.7, 0.3));
        assert_eq!(arc.layer, "In1.Cu");
        assert_eq!(arc.net, 4);
    }

    #[test]
    fn test_via() {
        let via: Via = build(
            r#"(via (at 12.5 7.25) (size 0.8) (drill 0.4) (layers "F.Cu" "B.Cu") (free) (net 2)
                (uuid "5e6f7a8b-9c0d-4e1f-a2b3-c4d5e6f7a8b9"))"#,
        );

        assert_eq!(via.kind, None);
        assert_eq!(via.position, Point::new(12.5, 7.25));
        assert_eq!(via.size, 0.8);
        assert_eq!(via.drill, 0.4);
        assert_eq!(via.layers, ["F.Cu", "B.Cu"]);
        assert!(via.free);
        assert_eq!(via.net, 2);
        assert!(via.is_on_layer("B.Cu"));
        assert!(!via.is_on_layer("In1.Cu"));
    }

    #[test]
    fn test_blind_via() {
        let via: Via = build(
            r#"(via blind locked (at 0 0) (size 0.6) (drill 0.3) (layers "F.Cu" "In2.Cu") (net 1))"#,
        );

        assert_eq!(via.kind.as_deref(), Some("blind"));
        assert!(via.locked);
    }
}
