//! Read-only piece snapshots for the rendering collaborator.
//!
//! The renderer draws wedges and labels from these views; it never touches
//! engine state. Views come out in draw order, bottom first, so painting
//! them in sequence produces the right stacking.

use std::fmt::Write as _;

use crate::engine::types::SegmentRegistry;

/// Everything the renderer needs to draw one piece.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceView {
    /// Identifier of the piece, stable for the session.
    pub name: String,
    pub ring: usize,
    /// Section identifier, for color and gradient lookup.
    pub section: String,
    pub label: String,
    /// Start angle of the wedge, degrees in [0, 360).
    pub current_angle: f64,
    /// Angular width of the wedge.
    pub segment_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub snapped: bool,
}

/// Snapshot every piece in draw order, bottom first.
pub fn piece_views(registry: &SegmentRegistry) -> Vec<PieceView> {
    registry
        .draw_order()
        .iter()
        .map(|&id| {
            let piece = registry.piece(id);
            let ring = registry.ring(piece.ring);
            PieceView {
                name: piece.name.clone(),
                ring: piece.ring,
                section: piece.section.clone(),
                label: piece.label.clone(),
                current_angle: piece.current_angle,
                segment_angle: piece.segment_angle,
                inner_radius: ring.inner_radius,
                outer_radius: ring.outer_radius,
                snapped: piece.snapped,
            }
        })
        .collect()
}

/// Plain-text piece table, one line per piece in registry order. Used by
/// the CLI and stable enough to snapshot in tests.
pub fn format_piece_table(registry: &SegmentRegistry) -> String {
    let mut out = String::new();
    for piece in registry.pieces() {
        let _ = writeln!(
            out,
            "{} ring={} section={} angle={:.1} target={:.1} snapped={} label={}",
            piece.name,
            piece.ring,
            piece.section,
            piece.current_angle,
            piece.correct_angle,
            piece.snapped,
            piece.label,
        );
    }
    out
}
