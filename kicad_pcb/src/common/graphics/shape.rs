use kicad_sexpr::ParsedSexpr;
use uuid::Uuid;

use crate::{
    common::{Point, Stroke},
    convert::{ignore_unknown, FromParsed, Keyword, ParsedSexprExt},
};

/// A graphical shape, drawn either on the board (`gr_*`) or inside a
/// footprint (`fp_*`).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone)]
pub struct GraphicShape {
    pub kind: ShapeKind,
    pub layer: String,
    pub stroke: Stroke,
    /// Set by `(fill yes)`
    pub fill: bool,
    pub locked: bool,
    pub uuid: Option<Uuid>,
}

/// The geometry of a [`GraphicShape`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde", serde(tag = "shape"))]
#[derive(Debug, PartialEq, Clone)]
pub enum ShapeKind {
    Line {
        start: Point,
        end: Point,
    },
    Rectangle {
        start: Point,
        end: Point,
    },
    /// `end` is a point on the circumference
    Circle {
        center: Point,
        end: Point,
    },
    /// Boards since KiCad 6 describe arcs by `start`, `mid` and `end`. Older
    /// boards write the center as `start`, the arc start as `end` and the
    /// sweep as `angle`, in which case `mid` is absent.
    Arc {
        start: Point,
        mid: Option<Point>,
        end: Point,
        angle: Option<f64>,
    },
    Polygon {
        points: Vec<Point>,
    },
    /// A cubic bezier with four control points
    Curve {
        points: Vec<Point>,
    },
}

impl ShapeKind {
    /// The empty geometry for a shape node keyword
    pub(crate) fn for_keyword(keyword: Keyword) -> Option<Self> {
        Some(match keyword {
            Keyword::GrLine | Keyword::FpLine => Self::Line {
                start: Point::default(),
                end: Point::default(),
            },
            Keyword::GrRect | Keyword::FpRect => Self::Rectangle {
                start: Point::default(),
                end: Point::default(),
            },
            Keyword::GrCircle | Keyword::FpCircle => Self::Circle {
                center: Point::default(),
                end: Point::default(),
            },
            Keyword::GrArc | Keyword::FpArc => Self::Arc {
                start: Point::default(),
                mid: None,
                end: Point::default(),
                angle: None,
            },
            Keyword::GrPoly | Keyword::FpPoly => Self::Polygon { points: Vec::new() },
            Keyword::GrCurve | Keyword::FpCurve | Keyword::Bezier => {
                Self::Curve { points: Vec::new() }
            }
            _ => return None,
        })
    }
}

impl GraphicShape {
    /// Fills in a shape whose geometry was chosen from the node name.
    pub(crate) fn build(node: &ParsedSexpr<'_>, kind: ShapeKind) -> Self {
        let mut shape = Self {
            kind,
            layer: String::new(),
            stroke: Stroke::default(),
            fill: false,
            locked: node.has_value("locked"),
            uuid: None,
        };

        for child in &node.children {
            match (child.keyword(), &mut shape.kind) {
                (
                    Some(Keyword::Start),
                    ShapeKind::Line { start, .. }
                    | ShapeKind::Rectangle { start, .. }
                    | ShapeKind::Arc { start, .. },
                ) => *start = child.point(),
                (
                    Some(Keyword::End),
                    ShapeKind::Line { end, .. }
                    | ShapeKind::Rectangle { end, .. }
                    | ShapeKind::Circle { end, .. }
                    | ShapeKind::Arc { end, .. },
                ) => *end = child.point(),
                (Some(Keyword::Center), ShapeKind::Circle { center, .. }) => {
                    *center = child.point()
                }
                (Some(Keyword::Mid), ShapeKind::Arc { mid, .. }) => *mid = Some(child.point()),
                (Some(Keyword::Angle), ShapeKind::Arc { angle, .. }) => {
                    *angle = Some(child.number(0))
                }
                (
                    Some(Keyword::Pts),
                    ShapeKind::Polygon { points } | ShapeKind::Curve { points },
                ) => *points = child.xy_list(),
                (Some(Keyword::Layer), _) => shape.layer = child.string(0),
                (Some(Keyword::Stroke), _) => shape.stroke = Stroke::from_parsed(child),
                (Some(Keyword::Width), _) => shape.stroke.width = child.number(0),
                (Some(Keyword::Fill), _) => shape.fill = child.is_yes(),
                (Some(Keyword::Locked), _) => shape.locked = child.flag(),
                (Some(Keyword::Uuid | Keyword::Tstamp), _) => shape.uuid = child.uuid(),
                _ => ignore_unknown(node, child),
            }
        }

        shape
    }
}
