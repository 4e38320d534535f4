//! Pointer-driven drag state.
//!
//! The platform adapter converts raw screen coordinates into
//! [`PointerSample`]s (polar angle and radius around the fixed puzzle
//! center) before the engine sees them. Everything past that point is pure
//! angular arithmetic.

use crate::engine::angle;
use crate::engine::types::{PieceId, SegmentRegistry};

/// One pointer position in puzzle-polar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Polar angle around the puzzle center, degrees.
    pub angle: f64,
    /// Distance from the puzzle center, in the same units as ring radii.
    pub radius: f64,
}

impl PointerSample {
    pub fn new(angle: f64, radius: f64) -> Self {
        Self { angle, radius }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        piece: PieceId,
        /// Angular offset between the piece and the pointer at grab time.
        /// Holding it constant makes the piece rotate rigidly with the
        /// pointer instead of jumping to the pointer's angle.
        offset: f64,
    },
}

/// Drag state machine: at most one piece follows the pointer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// The piece currently being dragged, if any.
    pub fn dragging(&self) -> Option<PieceId> {
        match self.state {
            DragState::Dragging { piece, .. } => Some(piece),
            DragState::Idle => None,
        }
    }

    /// Begin a drag if the pointer is over an unsnapped piece.
    ///
    /// Hits on snapped pieces are a no-op, and a second pointer-down while
    /// already dragging is ignored.
    pub fn grab(
        &mut self,
        registry: &SegmentRegistry,
        pointer: PointerSample,
    ) -> Option<PieceId> {
        if matches!(self.state, DragState::Dragging { .. }) {
            return None;
        }
        let id = hit_test(registry, pointer)?;
        let piece = registry.piece(id);
        if piece.snapped {
            return None;
        }
        let offset = angle::normalize(piece.current_angle - pointer.angle);
        self.state = DragState::Dragging { piece: id, offset };
        Some(id)
    }

    /// Follow the pointer: rewrite the dragged piece's angle keeping the
    /// grab-time offset.
    pub fn track(
        &self,
        registry: &mut SegmentRegistry,
        pointer: PointerSample,
    ) -> Option<PieceId> {
        let DragState::Dragging { piece, offset } = self.state else {
            return None;
        };
        registry.piece_mut(piece).current_angle = angle::normalize(pointer.angle + offset);
        Some(piece)
    }

    /// End the drag, returning the piece that was held.
    pub fn release(&mut self) -> Option<PieceId> {
        let released = self.dragging();
        self.state = DragState::Idle;
        released
    }
}

/// Topmost piece under the pointer, scanning the draw order from the top.
///
/// Returns snapped pieces too; the caller decides whether a hit on one
/// means anything.
pub fn hit_test(registry: &SegmentRegistry, pointer: PointerSample) -> Option<PieceId> {
    for &id in registry.draw_order().iter().rev() {
        let piece = registry.piece(id);
        let ring = registry.ring(piece.ring);
        if ring.contains_radius(pointer.radius)
            && angle::arc_contains(piece.current_angle, piece.segment_angle, pointer.angle)
        {
            return Some(id);
        }
    }
    None
}
