//! Graphic items shared by boards (`gr_*`) and footprints (`fp_*`).

use kicad_sexpr::ParsedSexpr;
use uuid::Uuid;

use crate::convert::{Keyword, ParsedSexprExt};

pub use self::{
    shape::{GraphicShape, ShapeKind},
    text::GraphicText,
};

pub mod shape;
pub mod text;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[derive(Debug, PartialEq, Clone)]
pub enum Graphic {
    Shape(GraphicShape),
    Text(GraphicText),
}

impl Graphic {
    pub fn layer(&self) -> &str {
        match self {
            Graphic::Shape(shape) => &shape.layer,
            Graphic::Text(text) => &text.layer,
        }
    }

    pub fn uuid(&self) -> Option<Uuid> {
        match self {
            Graphic::Shape(shape) => shape.uuid,
            Graphic::Text(text) => text.uuid,
        }
    }

    pub fn as_shape(&self) -> Option<&GraphicShape> {
        match self {
            Graphic::Shape(shape) => Some(shape),
            Graphic::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&GraphicText> {
        match self {
            Graphic::Text(text) => Some(text),
            Graphic::Shape(_) => None,
        }
    }
}

/// Builds a board graphic from a `gr_line`, `gr_rect`, `gr_circle`,
/// `gr_arc`, `gr_poly`, `gr_curve`, `bezier` or `gr_text` node. Returns
/// `None` for any other node.
pub fn parse_graphic(node: &ParsedSexpr<'_>) -> Option<Graphic> {
    match node.keyword()? {
        Keyword::GrText => Some(Graphic::Text(GraphicText::build(node, false))),
        keyword @ (Keyword::GrLine
        | Keyword::GrRect
        | Keyword::GrCircle
        | Keyword::GrArc
        | Keyword::GrPoly
        | Keyword::GrCurve
        | Keyword::Bezier) => parse_shape(node, keyword),
        _ => None,
    }
}

/// Builds a footprint graphic from an `fp_*` node. Returns `None` for any
/// other node.
pub fn parse_fp_graphic(node: &ParsedSexpr<'_>) -> Option<Graphic> {
    match node.keyword()? {
        Keyword::FpText => Some(Graphic::Text(GraphicText::build(node, true))),
        keyword @ (Keyword::FpLine
        | Keyword::FpRect
        | Keyword::FpCircle
        | Keyword::FpArc
        | Keyword::FpPoly
        | Keyword::FpCurve) => parse_shape(node, keyword),
        _ => None,
    }
}

fn parse_shape(node: &ParsedSexpr<'_>, keyword: Keyword) -> Option<Graphic> {
    let kind = ShapeKind::for_keyword(keyword)?;

    Some(Graphic::Shape(GraphicShape::build(node, kind)))
}

#[cfg(test)]
mod tests {
    use kicad_sexpr::from_str;

    use super::*;
    use crate::common::{Point, Position, Stroke};

    fn graphic(input: &str) -> Option<Graphic> {
        let sexpr = from_str(input).unwrap();
        let node = ParsedSexpr::new(&sexpr);

        parse_graphic(&node).or_else(|| parse_fp_graphic(&node))
    }

    fn shape(input: &str) -> GraphicShape {
        graphic(input).and_then(|g| g.as_shape().cloned()).unwrap()
    }

    fn text(input: &str) -> GraphicText {
        graphic(input).and_then(|g| g.as_text().cloned()).unwrap()
    }

    #[test]
    fn test_line() {
        let line = shape(
            r#"(gr_line (start 0 0) (end 10 5) (stroke (width 0.1) (type solid)) (layer "Edge.Cuts")
                (uuid "a1e5c9f0-3f4e-4b8e-9d8c-1b2a3c4d5e6f"))"#,
        );

        assert_eq!(
            line.kind,
            ShapeKind::Line {
                start: Point::new(0.0, 0.0),
                end: Point::new(10.0, 5.0)
            }
        );
        assert_eq!(line.stroke, Stroke::new(0.1, "solid"));
        assert_eq!(line.layer, "Edge.Cuts");
        assert!(line.uuid.is_some());
        assert!(!line.fill);
        assert!(!line.locked);
    }

    #[test]
    fn test_legacy_width_and_tstamp() {
        let line = shape(
            "(fp_line (start -1 -1) (end 1 -1) (layer F.SilkS) (width 0.12) (tstamp 5E4A1F2B))",
        );

        assert_eq!(line.stroke.width, 0.12);
        assert_eq!(line.stroke.kind, "default");
        assert_eq!(line.uuid, Some(Uuid::from_u128(0x5E4A1F2B)));
    }

    #[test]
    fn test_circle_and_rect_fill() {
        let circle = shape(
            r#"(gr_circle (center 5 5) (end 6 5) (fill yes) (layer "F.Cu") locked)"#,
        );

        assert_eq!(
            circle.kind,
            ShapeKind::Circle {
                center: Point::new(5.0, 5.0),
                end: Point::new(6.0, 5.0)
            }
        );
        assert!(circle.fill);
        assert!(circle.locked);

        let rect = shape(r#"(fp_rect (start 0 0) (end 1 1) (fill none) (layer "F.CrtYd"))"#);
        assert!(!rect.fill);
    }

    #[test]
    fn test_arcs() {
        let arc = shape(r#"(gr_arc (start 0 0) (mid 1 1) (end 2 0) (layer "Edge.Cuts"))"#);

        assert_eq!(
            arc.kind,
            ShapeKind::Arc {
                start: Point::new(0.0, 0.0),
                mid: Some(Point::new(1.0, 1.0)),
                end: Point::new(2.0, 0.0),
                angle: None,
            }
        );

        let legacy = shape(
            "(gr_arc (start 5 5) (end 7 5) (angle -90) (layer Edge.Cuts) (width 0.05))",
        );

        assert_eq!(
            legacy.kind,
            ShapeKind::Arc {
                start: Point::new(5.0, 5.0),
                mid: None,
                end: Point::new(7.0, 5.0),
                angle: Some(-90.0),
            }
        );
    }

    #[test]
    fn test_polygon_and_curve() {
        let poly = shape(r#"(fp_poly (pts (xy 0 0) (xy 1 0) (xy 1 1)) (layer "F.Cu") (fill yes))"#);

        assert_eq!(
            poly.kind,
            ShapeKind::Polygon {
                points: vec![
                    Point::new(0.0, 0.0),
                    Point::new(1.0, 0.0),
                    Point::new(1.0, 1.0)
                ]
            }
        );

        let curve = shape(
            r#"(bezier (pts (xy 0 0) (xy 1 1) (xy 2 1) (xy 3 0)) (layer "F.SilkS"))"#,
        );

        assert!(
            matches!(curve.kind, ShapeKind::Curve { ref points } if points.len() == 4)
        );
    }

    #[test]
    fn test_board_text() {
        let label = text(
            r#"(gr_text "REV A" (at 10 20 90) (layer "F.SilkS" knockout)
                (effects (font (size 1.5 1.5) (thickness 0.3))))"#,
        );

        assert_eq!(label.kind, None);
        assert_eq!(label.text, "REV A");
        assert_eq!(label.position, Position::new(10.0, 20.0, Some(90.0)));
        assert_eq!(label.layer, "F.SilkS");
        assert!(label.knockout);
        assert!(!label.hidden);
        assert!(label.effects.is_some());
    }

    #[test]
    fn test_locked_board_text() {
        let locked = text(r#"(gr_text locked "hello" (at 0 0) (layer "F.Cu"))"#);

        assert!(locked.locked);
        assert_eq!(locked.text, "hello");

        let literal = text(r#"(gr_text "locked" (at 0 0) (layer "F.Cu"))"#);

        assert!(!literal.locked);
        assert_eq!(literal.text, "locked");
    }

    #[test]
    fn test_footprint_text() {
        let reference = text(
            r#"(fp_text reference "R1" (at 0 -1.5) (layer "F.SilkS") hide (effects (font (size 1 1))))"#,
        );

        assert_eq!(reference.kind.as_deref(), Some("reference"));
        assert_eq!(reference.text, "R1");
        assert!(reference.hidden);

        let value = text(
            r#"(fp_text value "10k" (at 0 1.5) (layer "F.Fab") (effects (font (size 1 1)) hide))"#,
        );

        assert_eq!(value.kind.as_deref(), Some("value"));
        assert_eq!(value.text, "10k");
        assert!(value.hidden);
    }

    #[test]
    fn test_other_nodes_are_not_graphics() {
        assert_eq!(graphic("(segment (start 0 0))"), None);
        assert_eq!(graphic("(dimension)"), None);
        assert_eq!(graphic("(gr_text_box)"), None);
    }
}
