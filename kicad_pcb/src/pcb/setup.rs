//! Common structures related to the PCB `setup` field in the file header

use kicad_sexpr::ParsedSexpr;

use crate::{
    common::Point,
    convert::{ignore_unknown, FromParsed, Keyword, ParsedSexprExt},
};

/// Board wide clearances and origins. The stackup and plot options are not
/// read.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, PartialEq, Clone, Default)]
pub struct BoardSetup {
    pub pad_to_mask_clearance: Option<f64>,
    pub solder_mask_min_width: Option<f64>,
    pub pad_to_paste_clearance: Option<f64>,
    pub pad_to_paste_clearance_ratio: Option<f64>,
    pub allow_soldermask_bridges_in_footprints: bool,
    pub aux_axis_origin: Option<Point>,
    pub grid_origin: Option<Point>,
}

impl FromParsed for BoardSetup {
    fn from_parsed(node: &ParsedSexpr<'_>) -> Self {
        let mut setup = Self::default();

        for child in &node.children {
            match child.keyword() {
                Some(Keyword::PadToMaskClearance) => {
                    setup.pad_to_mask_clearance = Some(child.number(0))
                }
                Some(Keyword::SolderMaskMinWidth) => {
                    setup.solder_mask_min_width = Some(child.number(0))
                }
                Some(Keyword::PadToPasteClearance) => {
                    setup.pad_to_paste_clearance = Some(child.number(0))
                }
                Some(Keyword::PadToPasteClearanceRatio) => {
                    setup.pad_to_paste_clearance_ratio = Some(child.number(0))
                }
                Some(Keyword::AllowSoldermaskBridgesInFootprints) => {
                    setup.allow_soldermask_bridges_in_footprints = child.is_yes()
                }
                Some(Keyword::AuxAxisOrigin) => setup.aux_axis_origin = Some(child.point()),
                Some(Keyword::GridOrigin) => setup.grid_origin = Some(child.point()),
                _ => ignore_unknown(node, child),
            }
        }

        setup
    }
}
