//! Optional cross-reference checks over a parsed board.
//!
//! Parsing never rejects a board for dangling references. Callers that want
//! stricter guarantees run [`check_consistency`] on the result.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

use thiserror::Error;

use crate::pcb::KiCadPcb;

/// The item holding a net reference
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum NetOwner {
    /// A footprint pad, identified by footprint reference (or library name
    /// when there is none) and pad number
    Pad { footprint: String, pad: String },
    /// Index into [`KiCadPcb::segments`]
    Segment(usize),
    /// Index into [`KiCadPcb::arcs`]
    Arc(usize),
    /// Index into [`KiCadPcb::vias`]
    Via(usize),
    /// Index into [`KiCadPcb::zones`]
    Zone(usize),
}

impl Display for NetOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetOwner::Pad { footprint, pad } => write!(f, "pad {pad} of {footprint}"),
            NetOwner::Segment(index) => write!(f, "segment #{index}"),
            NetOwner::Arc(index) => write!(f, "arc #{index}"),
            NetOwner::Via(index) => write!(f, "via #{index}"),
            NetOwner::Zone(index) => write!(f, "zone #{index}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConsistencyIssue {
    #[error("{owner} references undeclared net {net}")]
    UnknownNet { owner: NetOwner, net: i64 },
    #[error("net {id} is declared {count} times")]
    DuplicateNetId { id: i64, count: usize },
    #[error("layer ordinal {ordinal} is declared {count} times")]
    DuplicateLayerOrdinal { ordinal: i64, count: usize },
}

/// Checks that net ids and layer ordinals are unique and that every pad,
/// track, via and zone references a declared net.
///
/// Issues are reported in a stable order: duplicate nets, duplicate layers,
/// then unknown nets in file order.
pub fn check_consistency(pcb: &KiCadPcb) -> Vec<ConsistencyIssue> {
    let mut issues = Vec::new();

    for (id, count) in count_by(pcb.nets.iter().map(|n| n.id)) {
        if count > 1 {
            issues.push(ConsistencyIssue::DuplicateNetId { id, count });
        }
    }

    for (ordinal, count) in count_by(pcb.layers.iter().map(|l| l.ordinal)) {
        if count > 1 {
            issues.push(ConsistencyIssue::DuplicateLayerOrdinal { ordinal, count });
        }
    }

    let declared = pcb.nets.iter().map(|n| n.id).collect::<BTreeSet<_>>();

    let pads = pcb.footprints.iter().flat_map(|footprint| {
        let name = footprint
            .reference()
            .map(str::to_string)
            .unwrap_or_else(|| footprint.library_link.to_string());

        footprint.pads.iter().filter_map(move |pad| {
            let net = pad.net.as_ref()?;

            Some((
                NetOwner::Pad {
                    footprint: name.clone(),
                    pad: pad.number.clone(),
                },
                net.id,
            ))
        })
    });

    let references = pads
        .chain(
            pcb.segments
                .iter()
                .enumerate()
                .map(|(i, s)| (NetOwner::Segment(i), s.net)),
        )
        .chain(
            pcb.arcs
                .iter()
                .enumerate()
                .map(|(i, a)| (NetOwner::Arc(i), a.net)),
        )
        .chain(
            pcb.vias
                .iter()
                .enumerate()
                .map(|(i, v)| (NetOwner::Via(i), v.net)),
        )
        .chain(
            pcb.zones
                .iter()
                .enumerate()
                .map(|(i, z)| (NetOwner::Zone(i), z.net)),
        );

    for (owner, net) in references {
        if !declared.contains(&net) {
            issues.push(ConsistencyIssue::UnknownNet { owner, net });
        }
    }

    if !issues.is_empty() {
        log::debug!("board has {} consistency issues", issues.len());
    }

    issues
}

fn count_by(keys: impl Iterator<Item = i64>) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();

    for key in keys {
        *counts.entry(key).or_default() += 1;
    }

    counts
}
