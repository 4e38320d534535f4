//! Core piece and registry types.

use crate::config::{PuzzleConfig, RingSpec, SectionSpec};
use crate::engine::angle;

/// Stable handle to one piece for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    /// Index of the piece in registry order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One draggable wedge: where it belongs and where it currently sits.
///
/// `segment_angle` and `correct_angle` never change after creation.
/// `current_angle` is always normalized into [0, 360). Once `snapped` turns
/// true it stays true until a reset, and `current_angle` holds the committed
/// target angle for as long as the piece is snapped.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceRecord {
    pub id: PieceId,
    /// Human-readable identifier, `piece-<ring>-<section>-<slot>`.
    pub name: String,
    /// Index of the ring the piece lives on.
    pub ring: usize,
    /// Identifier of the section the piece belongs to.
    pub section: String,
    /// Slot index within the section's run on this ring.
    pub slot: usize,
    /// Home angle of the piece's own slot, degrees in [0, 360).
    pub correct_angle: f64,
    /// Start angle of the wedge at its present position.
    pub current_angle: f64,
    /// Angular width of the wedge, fixed by the ring subdivision.
    pub segment_angle: f64,
    pub label: String,
    pub snapped: bool,
}

impl PieceRecord {
    /// Center angle of the wedge at its current position.
    pub fn center(&self) -> f64 {
        angle::normalize(self.current_angle + self.segment_angle / 2.0)
    }

    /// True when this wedge, placed at `at`, overlaps `other` beyond
    /// `epsilon`.
    pub fn overlaps_at(&self, at: f64, other: &PieceRecord, epsilon: f64) -> bool {
        angle::overlap(
            at,
            at + self.segment_angle,
            other.current_angle,
            other.current_angle + other.segment_angle,
        ) > epsilon
    }

    /// True when this wedge overlaps `other` beyond `epsilon` where it sits.
    pub fn overlaps(&self, other: &PieceRecord, epsilon: f64) -> bool {
        self.overlaps_at(self.current_angle, other, epsilon)
    }
}

/// Exclusive owner of every piece for one puzzle session.
///
/// Holds the piece records, the ring and section specifications they were
/// built from, and the bottom-to-top draw order the rendering collaborator
/// paints in. No other component keeps piece state.
#[derive(Debug, Clone)]
pub struct SegmentRegistry {
    pieces: Vec<PieceRecord>,
    rings: Vec<RingSpec>,
    sections: Vec<SectionSpec>,
    draw_order: Vec<PieceId>,
}

impl SegmentRegistry {
    /// Build every piece from a validated configuration. Pieces start in
    /// their solved positions; shuffle scatters them.
    pub fn from_config(config: &PuzzleConfig) -> Self {
        let mut pieces = Vec::new();
        for ring in &config.rings {
            let slots = config.slots_per_section(ring);
            for section in &config.sections {
                let labels = &section.ring_labels[ring.index];
                for slot in 0..slots {
                    let correct_angle = angle::normalize(
                        section.start_angle + slot as f64 * ring.segment_angle,
                    );
                    let id = PieceId(pieces.len());
                    pieces.push(PieceRecord {
                        id,
                        name: format!("piece-{}-{}-{}", ring.index, section.id, slot),
                        ring: ring.index,
                        section: section.id.clone(),
                        slot,
                        correct_angle,
                        current_angle: correct_angle,
                        segment_angle: ring.segment_angle,
                        label: labels.get(slot).cloned().unwrap_or_default(),
                        snapped: false,
                    });
                }
            }
        }
        let draw_order = pieces.iter().map(|piece| piece.id).collect();
        Self {
            pieces,
            rings: config.rings.clone(),
            sections: config.sections.clone(),
            draw_order,
        }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[PieceRecord] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> &PieceRecord {
        &self.pieces[id.0]
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut PieceRecord {
        &mut self.pieces[id.0]
    }

    pub fn rings(&self) -> &[RingSpec] {
        &self.rings
    }

    pub fn ring(&self, index: usize) -> &RingSpec {
        &self.rings[index]
    }

    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Bottom-to-top paint order.
    pub fn draw_order(&self) -> &[PieceId] {
        &self.draw_order
    }

    /// Move a piece to the top of the draw order.
    pub(crate) fn raise(&mut self, id: PieceId) {
        self.draw_order.retain(|other| *other != id);
        self.draw_order.push(id);
    }

    /// Move a piece to the bottom of the draw order, under everything else.
    pub(crate) fn demote(&mut self, id: PieceId) {
        self.draw_order.retain(|other| *other != id);
        self.draw_order.insert(0, id);
    }

    /// Unsnapped pieces sharing a ring, excluding `exclude`, in id order.
    pub(crate) fn unsnapped_in_ring(&self, ring: usize, exclude: PieceId) -> Vec<PieceId> {
        self.pieces
            .iter()
            .filter(|piece| piece.ring == ring && piece.id != exclude && !piece.snapped)
            .map(|piece| piece.id)
            .collect()
    }

    /// Snapped pieces sharing a ring, excluding `exclude`, in id order.
    pub(crate) fn snapped_in_ring(&self, ring: usize, exclude: PieceId) -> Vec<PieceId> {
        self.pieces
            .iter()
            .filter(|piece| piece.ring == ring && piece.id != exclude && piece.snapped)
            .map(|piece| piece.id)
            .collect()
    }

    /// True when every piece is snapped.
    pub fn all_snapped(&self) -> bool {
        self.pieces.iter().all(|piece| piece.snapped)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(pieces: Vec<PieceRecord>, rings: Vec<RingSpec>) -> Self {
        let draw_order = pieces.iter().map(|piece| piece.id).collect();
        Self {
            pieces,
            rings,
            sections: Vec::new(),
            draw_order,
        }
    }
}
