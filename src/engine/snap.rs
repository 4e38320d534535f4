//! Release-time snap detection.
//!
//! A released piece may lock into any slot its section owns on its ring,
//! provided it is close enough and no snapped piece already occupies that
//! slot. The first matching target in angle order wins.

use crate::engine::angle;
use crate::engine::tuning::Tuning;
use crate::engine::types::{PieceId, SegmentRegistry};

/// A successful snap test: where the released piece should commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SnapPlan {
    pub target_angle: f64,
}

/// Target angles assigned to `piece`'s section within its ring, sorted
/// ascending.
pub(crate) fn target_angles(registry: &SegmentRegistry, piece: PieceId) -> Vec<f64> {
    let piece = registry.piece(piece);
    let ring = registry.ring(piece.ring);
    let Some(section) = registry.section(&piece.section) else {
        return Vec::new();
    };
    let slots = ring.segments as usize / registry.sections().len().max(1);
    let mut targets: Vec<f64> = (0..slots)
        .map(|slot| angle::normalize(section.start_angle + slot as f64 * ring.segment_angle))
        .collect();
    targets.sort_by(|a, b| a.total_cmp(b));
    targets
}

/// True when a snapped piece in `ring` already sits on `target`, within the
/// occupancy tolerance. Wrapped distance, so the 0°/360° seam compares
/// correctly.
pub(crate) fn occupied(
    registry: &SegmentRegistry,
    ring: usize,
    target: f64,
    exclude: PieceId,
    tolerance: f64,
) -> bool {
    registry.snapped_in_ring(ring, exclude).into_iter().any(|id| {
        angle::shortest_distance(registry.piece(id).current_angle, target).abs() < tolerance
    })
}

/// First unoccupied section target within the ring's snap threshold of the
/// released piece, if any.
pub(crate) fn detect(
    registry: &SegmentRegistry,
    released: PieceId,
    tuning: &Tuning,
) -> Option<SnapPlan> {
    let piece = registry.piece(released);
    let threshold = tuning.snap_threshold(piece.ring);
    for target in target_angles(registry, released) {
        let distance = angle::shortest_distance(piece.current_angle, target).abs();
        if distance > threshold {
            continue;
        }
        if occupied(
            registry,
            piece.ring,
            target,
            released,
            tuning.occupancy_tolerance,
        ) {
            continue;
        }
        return Some(SnapPlan {
            target_angle: target,
        });
    }
    None
}
