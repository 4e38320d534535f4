//! Randomized placement for unsnapped pieces.

use rand::Rng;

use crate::engine::collision;
use crate::engine::tuning::Tuning;
use crate::engine::types::{PieceId, SegmentRegistry};

/// One accepted shuffle placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placement {
    pub piece: PieceId,
    pub from_angle: f64,
    pub to_angle: f64,
}

/// Draw a fresh angle for every unsnapped piece.
///
/// Each piece gets up to `tuning.shuffle_attempts` uniform draws; a draw is
/// rejected while it would overlap another unsnapped piece in the same
/// ring. When the attempts run out the last candidate is accepted,
/// overlapping or not. Snapped pieces are never touched.
///
/// The accepted angle is written into the registry immediately (later
/// pieces avoid earlier placements at their new positions); the returned
/// placements let the session glide each piece there visually.
pub(crate) fn shuffle<R: Rng>(
    registry: &mut SegmentRegistry,
    rng: &mut R,
    tuning: &Tuning,
) -> Vec<Placement> {
    let mut placements = Vec::new();
    for index in 0..registry.len() {
        let id = PieceId(index);
        if registry.piece(id).snapped {
            continue;
        }

        let mut candidate = rng.gen_range(0.0..360.0);
        let mut attempts = 1;
        while attempts < tuning.shuffle_attempts
            && collision::would_overlap_unsnapped(
                registry,
                registry.piece(id),
                candidate,
                tuning.collision_epsilon,
            )
        {
            candidate = rng.gen_range(0.0..360.0);
            attempts += 1;
        }

        let piece = registry.piece_mut(id);
        let from_angle = piece.current_angle;
        piece.current_angle = candidate;
        placements.push(Placement {
            piece: id,
            from_angle,
            to_angle: candidate,
        });
    }
    placements
}
