//! Common (shared) types within the KiCad board file format.

use kicad_sexpr::ParsedSexpr;

use crate::convert::{ignore_unknown, FromParsed, Keyword, ParsedSexprExt};

pub mod footprint;
pub mod graphics;
pub mod pad;
pub mod zone;

/// A single coordinate pair, in millimetres.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl FromParsed for Point {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        node.point()
    }
}

// ############################################################################

/// Generic position type used in many parts of the format.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Position {
    /// The `X` attribute defines the horizontal position of the object.
    pub x: f64,
    /// The `Y` attribute defines the vertical position of the object.
    pub y: f64,
    /// The optional `ANGLE` attribute defines the rotational angle of the
    /// object. Not all objects have rotational position definitions.
    pub angle: Option<f64>,
}

impl Position {
    pub fn new(x: f64, y: f64, angle: Option<f64>) -> Self {
        Self { x, y, angle }
    }
}

impl FromParsed for Position {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        // `(at 1 2 unlocked)` carries a flag where the angle would be
        let angle = node
            .value(2)
            .and_then(kicad_sexpr::number::parse_float_prefix);

        Self {
            x: node.number(0),
            y: node.number(1),
            angle,
        }
    }
}

// ############################################################################

/// A single 3D coordinate, used by model placement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Vec3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl FromParsed for Vec3D {
    /// Reads either `(offset (xyz 1 2 3))` or a bare `(xyz 1 2 3)`.
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let xyz = node.child(Keyword::Xyz.as_str()).unwrap_or(node);

        Self {
            x: xyz.number(0),
            y: xyz.number(1),
            z: xyz.number(2),
        }
    }
}

// ############################################################################

/// A definition of how the outlines of graphical objects should be drawn.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone)]
pub struct Stroke {
    /// The `width` token attribute defines the line width of the graphic
    /// object.
    pub width: f64,
    /// The line style, kept verbatim (`solid`, `dash`, `dash_dot`,
    /// `dash_dot_dot`, `dot` or `default`).
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// The `color` token attributes define the line red, green, blue, and
    /// alpha color settings.
    pub color: Option<Color>,
}

impl Stroke {
    pub fn new(width: f64, kind: impl Into<String>) -> Self {
        Self {
            width,
            kind: kind.into(),
            color: None,
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(0.0, "default")
    }
}

impl FromParsed for Stroke {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut stroke = Self::default();

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Width) => stroke.width = child.number(0),
                Some(Keyword::Type) => stroke.kind = child.string(0),
                Some(Keyword::Color) => stroke.color = Some(Color::from_parsed(child)),
                _ => ignore_unknown(node, child),
            }
        }

        stroke
    }
}

/// An RGBA color. Channels are 0-255 and alpha is 0-1, as KiCad writes them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl FromParsed for Color {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        Self {
            red: node.number(0),
            green: node.number(1),
            blue: node.number(2),
            alpha: node.number(3),
        }
    }
}

// ############################################################################

/// All text objects can have an optional effects section that defines how the
/// text is displayed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct TextEffects {
    /// The `font` token attributes define how the text is shown.
    pub font: Font,
    /// The `justify` atoms, verbatim (`left`, `right`, `top`, `bottom`,
    /// `mirror`). Empty means centered and not mirrored.
    pub justify: Vec<String>,
    /// The optional `hide` token defines if the text is hidden.
    pub hide: bool,
}

impl FromParsed for TextEffects {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut effects = Self {
            hide: node.has_value("hide"),
            ..Self::default()
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Font) => effects.font = Font::from_parsed(child),
                Some(Keyword::Justify) => {
                    effects.justify = child.values.iter().map(|v| v.to_string()).collect()
                }
                Some(Keyword::Hide) => effects.hide = child.flag(),
                _ => ignore_unknown(node, child),
            }
        }

        effects
    }
}

/// The font used by a text item.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Font {
    /// The optional `face` token indicates the font family. It should be a
    /// TrueType font family name or "KiCad Font" for the KiCad stroke font.
    pub face: Option<String>,
    /// The `size` token attributes define the font height and width.
    pub size: Point,
    /// The `thickness` token attribute defines the line thickness of the
    /// font.
    pub thickness: Option<f64>,
    pub line_spacing: Option<f64>,
    pub bold: bool,
    pub italic: bool,
}

impl FromParsed for Font {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut font = Self {
            bold: node.has_value("bold"),
            italic: node.has_value("italic"),
            ..Self::default()
        };

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Face) => font.face = child.maybe_string(0),
                Some(Keyword::Size) => font.size = child.point(),
                Some(Keyword::Thickness) => font.thickness = Some(child.number(0)),
                Some(Keyword::LineSpacing) => font.line_spacing = Some(child.number(0)),
                Some(Keyword::Bold) => font.bold = child.flag(),
                Some(Keyword::Italic) => font.italic = child.flag(),
                _ => ignore_unknown(node, child),
            }
        }

        font
    }
}

// ############################################################################

/// Defines the drawing page size and orientation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct PageSettings {
    /// The page size name (`A4`, `USLetter`, ...) or `User` for a custom size
    pub size: String,
    /// Width of a `User` page in millimetres
    pub width: Option<f64>,
    /// Height of a `User` page in millimetres
    pub height: Option<f64>,
    /// The portrait token defines if the page is shown in the portrait mode.
    /// If not defined, the landscape page layout mode is used.
    pub portrait: bool,
}

impl FromParsed for PageSettings {
    /// Reads `(paper "A4")`, `(paper "User" 431.8 279.4 portrait)` and the
    /// legacy `(page A4)`.
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let size = node.string(0);
        let custom = size == "User";

        Self {
            width: custom.then(|| node.number(1)),
            height: custom.then(|| node.number(2)),
            portrait: node.has_value("portrait"),
            size,
        }
    }
}

// ############################################################################

/// Title block information displayed in the corner of the page
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct TitleBlock {
    /// The `title` token attribute is a quoted string that defines the
    /// document title.
    pub title: Option<String>,
    /// The `date` token attribute is a quoted string that defines the document
    /// date using the YYYY-MM-DD format.
    pub date: Option<String>,
    /// The `rev` token attribute is a quoted string that defines the document
    /// revision.
    pub revision: Option<String>,
    /// The `company` token attribute is a quoted string that defines the
    /// document company name.
    pub company: Option<String>,
    /// The `comment` token attributes define the document comments where N is
    /// a number from 1 to 9 and COMMENT is a quoted string.
    pub comments: Vec<Comment>,
}

impl FromParsed for TitleBlock {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut title_block = Self::default();

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::Title) => title_block.title = child.maybe_string(0),
                Some(Keyword::Date) => title_block.date = child.maybe_string(0),
                Some(Keyword::Rev) => title_block.revision = child.maybe_string(0),
                Some(Keyword::Company) => title_block.company = child.maybe_string(0),
                Some(Keyword::Comment) => title_block.comments.push(Comment {
                    number: child.integer(0),
                    text: child.string(1),
                }),
                _ => ignore_unknown(node, child),
            }
        }

        title_block
    }
}

/// A numbered title block comment
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Comment {
    pub number: i64,
    pub text: String,
}

// ############################################################################

/// A key/value pair attached to the board or to a footprint.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Property {
    /// The property key attribute is a string that defines the name of the
    /// property.
    pub key: String,
    /// The property value attribute is a string associated with the key
    /// attribute.
    pub value: String,
}

impl Property {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl FromParsed for Property {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        Self::new(node.value_or_default(0), node.value_or_default(1))
    }
}

// ############################################################################

/// Returns true if the layer `pattern` from a pad or via layer list covers
/// the concrete layer `name`.
///
/// Patterns are either a literal layer name, a `*` wildcard prefix
/// (`*.Cu`, `*.Mask`) or the `F&B.` shorthand for the front and back layer of
/// the same kind.
pub fn layer_matches(pattern: &str, name: &str) -> bool {
    if pattern == name || pattern == "*" {
        return true;
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        return name.len() > suffix.len() && name.ends_with(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix("F&B") {
        return name
            .strip_suffix(suffix)
            .is_some_and(|side| side == "F" || side == "B");
    }

    false
}
