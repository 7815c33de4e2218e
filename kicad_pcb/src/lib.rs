//! A lenient parser for KiCad board files (`.kicad_pcb`).
//!
//! The text is read into a generic S-expression tree by [`kicad_sexpr`] and
//! then walked once by the [`FromParsed`](convert::FromParsed) builders, which
//! fill in a typed [`KiCadPcb`]. Only malformed syntax and a root node other
//! than `kicad_pcb` are errors. Unknown nodes are skipped and missing or
//! malformed fields fall back to defaults, so boards from newer or older
//! KiCad versions still load.
//!
//! ```
//! let pcb = kicad_pcb::parse_kicad(
//!     r#"(kicad_pcb (version 20221018) (generator "pcbnew") (net 0 ""))"#,
//! )
//! .unwrap();
//!
//! assert_eq!(pcb.version, 20221018);
//! assert_eq!(pcb.nets.len(), 1);
//! ```

use kicad_sexpr::ParsedSexpr;
use thiserror::Error;

use crate::convert::{FromParsed, Keyword, ParsedSexprExt};

pub mod common;
pub mod convert;
pub mod pcb;

pub use pcb::{
    consistency::{check_consistency, ConsistencyIssue, NetOwner},
    KiCadPcb,
};

/// Errors that can occur when parsing a board file.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum KiCadParseError {
    #[error(transparent)]
    Syntax(#[from] kicad_sexpr::SexprParseError),
    #[error("Invalid format: expected a `kicad_pcb` root node, found `{found}`")]
    InvalidFormat { found: String },
}

/// Builds a [`KiCadPcb`] from the text of a `.kicad_pcb` file.
///
/// The parser keeps no state between calls, so one instance can be shared
/// freely across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct KiCadParser;

impl KiCadParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, content: &str) -> Result<KiCadPcb, KiCadParseError> {
        let sexpr = kicad_sexpr::from_str(content)?;
        let root = ParsedSexpr::new(&sexpr);

        if root.keyword() != Some(Keyword::KicadPcb) {
            return Err(KiCadParseError::InvalidFormat {
                found: root.name.to_string(),
            });
        }

        let pcb = KiCadPcb::from_parsed(&root);

        log::debug!(
            "parsed board version {}: {} layers, {} nets, {} footprints, {} tracks, {} vias, {} zones, {} graphics",
            pcb.version,
            pcb.layers.len(),
            pcb.nets.len(),
            pcb.footprints.len(),
            pcb.segments.len() + pcb.arcs.len(),
            pcb.vias.len(),
            pcb.zones.len(),
            pcb.graphics.len(),
        );

        Ok(pcb)
    }
}

/// Parses a `.kicad_pcb` file from a string.
pub fn parse_kicad(content: &str) -> Result<KiCadPcb, KiCadParseError> {
    KiCadParser::new().parse(content)
}
