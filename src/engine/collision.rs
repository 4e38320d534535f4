//! Same-ring overlap resolution.
//!
//! When a piece has just moved (by drag release or by snapping into place),
//! every unsnapped piece overlapping it on the same ring gets pushed away.
//! Snapped pieces are never displaced; they act as fixed obstacles the
//! pushed pieces must route around.

use tracing::debug;

use crate::engine::angle;
use crate::engine::tuning::Tuning;
use crate::engine::types::{PieceId, PieceRecord, SegmentRegistry};

/// One planned displacement: where an overlapping piece should glide to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Displacement {
    pub piece: PieceId,
    pub target_angle: f64,
}

/// Plan displacements pushing every same-ring unsnapped overlapper of
/// `moved` away from it.
///
/// Targets are computed synchronously against the current registry state,
/// in overlap-scan (id) order, so the outcome is deterministic for a given
/// overlap set. The moved piece itself never budges.
pub(crate) fn resolve(
    registry: &SegmentRegistry,
    moved: PieceId,
    tuning: &Tuning,
) -> Vec<Displacement> {
    let moved_piece = registry.piece(moved);
    let mut plans = Vec::new();

    for id in registry.unsnapped_in_ring(moved_piece.ring, moved) {
        let piece = registry.piece(id);
        if !moved_piece.overlaps(piece, tuning.collision_epsilon) {
            continue;
        }

        let overlap = angle::overlap(
            moved_piece.current_angle,
            moved_piece.current_angle + moved_piece.segment_angle,
            piece.current_angle,
            piece.current_angle + piece.segment_angle,
        );
        let push = tuning.push_for_overlap(overlap);

        // Push away from the moved piece: when the moved center lies in the
        // positive (counter-clockwise) direction, displace the other way.
        let to_moved = angle::shortest_distance(piece.center(), moved_piece.center());
        let direction = if to_moved > 0.0 { -1.0 } else { 1.0 };

        let mut target = angle::normalize(piece.current_angle + direction * push);
        if would_hit_snapped(registry, piece, target, tuning.collision_epsilon) {
            target = angle::normalize(piece.current_angle - direction * push);
            if would_hit_snapped(registry, piece, target, tuning.collision_epsilon) {
                target = nearest_safe_position(registry, piece, push, tuning);
            }
        }

        plans.push(Displacement {
            piece: id,
            target_angle: target,
        });
    }

    plans
}

/// True when placing `piece` at `at` would overlap any snapped piece in its
/// ring.
pub(crate) fn would_hit_snapped(
    registry: &SegmentRegistry,
    piece: &PieceRecord,
    at: f64,
    epsilon: f64,
) -> bool {
    registry
        .snapped_in_ring(piece.ring, piece.id)
        .into_iter()
        .any(|id| piece.overlaps_at(at, registry.piece(id), epsilon))
}

/// True when placing `piece` at `at` would overlap any other unsnapped
/// piece in its ring. Used by shuffle's rejection sampling.
pub(crate) fn would_overlap_unsnapped(
    registry: &SegmentRegistry,
    piece: &PieceRecord,
    at: f64,
    epsilon: f64,
) -> bool {
    registry
        .unsnapped_in_ring(piece.ring, piece.id)
        .into_iter()
        .any(|id| piece.overlaps_at(at, registry.piece(id), epsilon))
}

/// Nearest angle clear of snapped pieces, probing both directions at
/// growing distances from the piece's current position.
///
/// Starts at `min_distance` and widens in `search_step` increments up to
/// half the circle, clockwise before counter-clockwise at each distance.
/// When nothing within the search range is clear, the piece keeps its
/// current angle; the remaining overlap is an accepted degradation.
pub(crate) fn nearest_safe_position(
    registry: &SegmentRegistry,
    piece: &PieceRecord,
    min_distance: f64,
    tuning: &Tuning,
) -> f64 {
    let mut distance = min_distance;
    while distance <= tuning.max_search {
        let clockwise = angle::normalize(piece.current_angle + distance);
        if !would_hit_snapped(registry, piece, clockwise, tuning.collision_epsilon) {
            return clockwise;
        }
        let counter = angle::normalize(piece.current_angle - distance);
        if !would_hit_snapped(registry, piece, counter, tuning.collision_epsilon) {
            return counter;
        }
        distance += tuning.search_step;
    }
    debug!(piece = %piece.name, "no snapped-free position within search range; staying put");
    piece.current_angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RingSpec;
    use crate::engine::types::PieceRecord;

    fn wide_ring() -> RingSpec {
        RingSpec {
            index: 0,
            inner_radius: 60.0,
            outer_radius: 120.0,
            segments: 12,
            segment_angle: 30.0,
        }
    }

    fn piece(id: usize, current: f64, width: f64, snapped: bool) -> PieceRecord {
        PieceRecord {
            id: PieceId(id),
            name: format!("piece-0-test-{id}"),
            ring: 0,
            section: "test".to_string(),
            slot: id,
            correct_angle: current,
            current_angle: current,
            segment_angle: width,
            label: String::new(),
            snapped,
        }
    }

    fn apply(registry: &mut SegmentRegistry, plans: &[Displacement]) {
        for plan in plans {
            registry.piece_mut(plan.piece).current_angle = plan.target_angle;
        }
    }

    #[test]
    fn test_overlapping_pair_separates_below_epsilon() {
        // Two 66°-wide arcs at 10° and 40°: 36° of overlap.
        let mut registry = SegmentRegistry::from_parts(
            vec![piece(0, 10.0, 66.0, false), piece(1, 40.0, 66.0, false)],
            vec![wide_ring()],
        );
        let tuning = Tuning::large();

        let plans = resolve(&registry, PieceId(0), &tuning);
        assert_eq!(plans.len(), 1);
        apply(&mut registry, &plans);

        let (a, b) = (registry.piece(PieceId(0)), registry.piece(PieceId(1)));
        let remaining = angle::overlap(
            a.current_angle,
            a.current_angle + a.segment_angle,
            b.current_angle,
            b.current_angle + b.segment_angle,
        );
        assert!(
            remaining <= tuning.collision_epsilon,
            "still {remaining}° of overlap"
        );
    }

    #[test]
    fn test_push_moves_away_from_the_moved_piece() {
        let registry = SegmentRegistry::from_parts(
            vec![piece(0, 10.0, 30.0, false), piece(1, 20.0, 30.0, false)],
            vec![wide_ring()],
        );
        let plans = resolve(&registry, PieceId(0), &Tuning::default());
        assert_eq!(plans.len(), 1);
        // Piece 1 sits counter-clockwise of the moved piece; it must move
        // further counter-clockwise, not through it.
        assert!(angle::shortest_distance(20.0, plans[0].target_angle) > 0.0);
    }

    #[test]
    fn test_non_overlapping_pieces_stay() {
        let registry = SegmentRegistry::from_parts(
            vec![piece(0, 0.0, 30.0, false), piece(1, 90.0, 30.0, false)],
            vec![wide_ring()],
        );
        assert!(resolve(&registry, PieceId(0), &Tuning::default()).is_empty());
    }

    #[test]
    fn test_edge_contact_within_epsilon_is_not_a_collision() {
        // 6° of overlap, below the 8° epsilon.
        let registry = SegmentRegistry::from_parts(
            vec![piece(0, 0.0, 30.0, false), piece(1, 24.0, 30.0, false)],
            vec![wide_ring()],
        );
        assert!(resolve(&registry, PieceId(0), &Tuning::default()).is_empty());
    }

    #[test]
    fn test_snapped_pieces_are_never_displaced() {
        let registry = SegmentRegistry::from_parts(
            vec![piece(0, 10.0, 30.0, false), piece(1, 20.0, 30.0, true)],
            vec![wide_ring()],
        );
        assert!(resolve(&registry, PieceId(0), &Tuning::default()).is_empty());
    }

    #[test]
    fn test_push_retries_opposite_direction_around_snapped() {
        // The preferred (counter-clockwise) push would land piece 1 on the
        // snapped piece at 50°; the resolver must flip direction.
        let registry = SegmentRegistry::from_parts(
            vec![
                piece(0, 10.0, 30.0, false),
                piece(1, 25.0, 30.0, false),
                piece(2, 50.0, 30.0, true),
            ],
            vec![wide_ring()],
        );
        let plans = resolve(&registry, PieceId(0), &Tuning::default());
        assert_eq!(plans.len(), 1);
        let target = plans[0].target_angle;
        let displaced = registry.piece(PieceId(1));
        assert!(
            !would_hit_snapped(&registry, displaced, target, 8.0),
            "target {target}° still collides with the snapped piece"
        );
        // Flipped: pushed clockwise, toward (and past) the moved piece.
        assert!(angle::shortest_distance(25.0, target) < 0.0);
    }

    #[test]
    fn test_search_finds_a_gap_between_snapped_pieces() {
        // Snapped pieces on both sides; only a distant gap is clear.
        let registry = SegmentRegistry::from_parts(
            vec![
                piece(0, 100.0, 30.0, false),
                piece(1, 110.0, 30.0, false),
                piece(2, 140.0, 30.0, true),
                piece(3, 75.0, 30.0, true),
            ],
            vec![wide_ring()],
        );
        let tuning = Tuning::default();
        let displaced = registry.piece(PieceId(1));
        let found = nearest_safe_position(&registry, displaced, 12.0, &tuning);
        assert!(!would_hit_snapped(&registry, displaced, found, tuning.collision_epsilon));
    }

    #[test]
    fn test_search_dead_end_keeps_current_angle() {
        // Snapped pieces tile the whole ring; there is nowhere to go.
        let mut pieces: Vec<PieceRecord> = (0..12)
            .map(|i| piece(i, i as f64 * 30.0, 30.0, true))
            .collect();
        pieces.push(piece(12, 45.0, 30.0, false));
        let registry = SegmentRegistry::from_parts(pieces, vec![wide_ring()]);
        let stuck = registry.piece(PieceId(12));
        let found = nearest_safe_position(&registry, stuck, 3.0, &Tuning::default());
        assert_eq!(found, 45.0);
    }
}
