//! The puzzle session: exclusive owner of all mutable engine state.
//!
//! A [`PuzzleSession`] wires the components together and enforces the
//! per-event ordering: drag release runs collision resolution before snap
//! detection, snap commits run the resolver around the newly fixed piece
//! and then the win check. All mutation happens synchronously inside the
//! pointer handlers, the command handlers, and [`PuzzleSession::tick`];
//! there is no other thread of control.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ConfigError, PuzzleConfig};
use crate::engine::animation::{self, Animation, Finish};
use crate::engine::collision;
use crate::engine::drag::{DragController, PointerSample};
use crate::engine::shuffle;
use crate::engine::snap;
use crate::engine::tuning::Tuning;
use crate::engine::types::{PieceId, PieceRecord, SegmentRegistry};

/// Outward signals produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A piece locked into a slot.
    PieceSnapped(PieceId),
    /// Every piece is snapped. Emitted at most once per solve; reset
    /// re-arms it.
    PuzzleCompleted,
}

/// The narrow input port the platform pointer adapter feeds.
///
/// The adapter owns screen-to-polar mapping; the engine only ever sees
/// [`PointerSample`]s.
pub trait PointerPort {
    /// Pointer pressed. Begins a drag when an unsnapped piece is hit.
    fn pointer_down(&mut self, pointer: PointerSample);
    /// Pointer moved. The dragged piece, if any, follows rigidly.
    fn pointer_move(&mut self, pointer: PointerSample);
    /// Pointer released at `now` milliseconds. Runs collision resolution,
    /// then snap detection; results surface through [`PuzzleSession::tick`].
    fn pointer_up(&mut self, now: f64);
}

/// One puzzle instance: registry, drag state, in-flight animations, and the
/// completion latch.
#[derive(Debug)]
pub struct PuzzleSession {
    registry: SegmentRegistry,
    drag: DragController,
    /// At most one animation per piece, indexed like the registry. A new
    /// drag or animation replaces the old handle; glides are never layered.
    animations: Vec<Option<Animation>>,
    tuning: Tuning,
    rng: StdRng,
    completion_fired: bool,
}

impl PuzzleSession {
    /// Build a session from a validated configuration.
    pub fn new(config: &PuzzleConfig, tuning: Tuning) -> Self {
        Self::with_rng(config, tuning, StdRng::from_entropy())
    }

    /// Build a session with a fixed shuffle seed, for reproducible runs.
    pub fn with_seed(config: &PuzzleConfig, tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(config, tuning, StdRng::seed_from_u64(seed))
    }

    /// Load the configuration from a TOML file and build a session.
    /// Configuration failures are fatal: the puzzle does not start.
    pub fn from_file(path: &Path, tuning: Tuning) -> Result<Self, ConfigError> {
        let config = PuzzleConfig::from_file(path)?;
        Ok(Self::new(&config, tuning))
    }

    fn with_rng(config: &PuzzleConfig, tuning: Tuning, rng: StdRng) -> Self {
        let registry = SegmentRegistry::from_config(config);
        let animations = vec![None; registry.len()];
        Self {
            registry,
            drag: DragController::default(),
            animations,
            tuning,
            rng,
            completion_fired: false,
        }
    }

    /// Read-only view of the piece registry.
    pub fn registry(&self) -> &SegmentRegistry {
        &self.registry
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// The piece currently following the pointer, if any.
    pub fn dragging(&self) -> Option<PieceId> {
        self.drag.dragging()
    }

    /// True when every piece is snapped.
    pub fn is_solved(&self) -> bool {
        self.registry.all_snapped()
    }

    /// Scatter every unsnapped piece to a fresh random angle (bounded
    /// overlap avoidance), gliding each piece to its new position.
    pub fn shuffle(&mut self, now: f64) {
        let placements = shuffle::shuffle(&mut self.registry, &mut self.rng, &self.tuning);
        for placement in placements {
            self.animations[placement.piece.index()] = Some(Animation::new(
                placement.from_angle,
                placement.to_angle,
                now,
                self.tuning.shuffle_duration_ms,
                Finish::Rest,
            ));
        }
    }

    /// Clear every `snapped` flag, re-arm the completion latch, and
    /// shuffle. The default visual state returns with the cleared flags.
    pub fn reset(&mut self, now: f64) {
        self.drag.release();
        self.animations.fill(None);
        for index in 0..self.registry.len() {
            self.registry.piece_mut(PieceId(index)).snapped = false;
        }
        self.completion_fired = false;
        self.shuffle(now);
    }

    /// Advance every in-flight animation to `now`, writing sampled angles
    /// into the registry, and finalize the ones that completed. Snap
    /// commits finish here: the piece locks, drops to the bottom of the
    /// draw order, pushes overlappers away, and the win check runs.
    pub fn tick(&mut self, now: f64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for index in 0..self.animations.len() {
            let Some(anim) = self.animations[index] else {
                continue;
            };
            let id = PieceId(index);
            self.registry.piece_mut(id).current_angle = animation::sample(&anim, now);
            if !anim.finished(now) {
                continue;
            }
            self.animations[index] = None;
            if anim.finish == Finish::CommitSnap {
                self.commit_snap(id, anim.target_angle, now, &mut events);
            }
        }
        events
    }

    fn commit_snap(&mut self, id: PieceId, target: f64, now: f64, events: &mut Vec<SessionEvent>) {
        {
            let piece = self.registry.piece_mut(id);
            piece.current_angle = target;
            piece.snapped = true;
        }
        self.registry.demote(id);
        events.push(SessionEvent::PieceSnapped(id));

        // Clear space around the newly fixed piece.
        self.resolve_around(id, now);

        if self.registry.all_snapped() && !self.completion_fired {
            self.completion_fired = true;
            events.push(SessionEvent::PuzzleCompleted);
        }
    }

    /// Run the collision resolver for `moved` and schedule the resulting
    /// displacement glides, staggered in scan order so simultaneous pushes
    /// read as a cascade.
    fn resolve_around(&mut self, moved: PieceId, now: f64) {
        let plans = collision::resolve(&self.registry, moved, &self.tuning);
        for (index, plan) in plans.into_iter().enumerate() {
            let start = self.registry.piece(plan.piece).current_angle;
            self.animations[plan.piece.index()] = Some(Animation::new(
                start,
                plan.target_angle,
                now + index as f64 * self.tuning.push_stagger_ms,
                self.tuning.push_duration_ms,
                Finish::Rest,
            ));
        }
    }

    /// Convenience accessor used by adapters and tests.
    pub fn piece(&self, id: PieceId) -> &PieceRecord {
        self.registry.piece(id)
    }
}

impl PointerPort for PuzzleSession {
    fn pointer_down(&mut self, pointer: PointerSample) {
        if let Some(id) = self.drag.grab(&self.registry, pointer) {
            // The grab supersedes whatever glide the piece was in.
            self.animations[id.index()] = None;
            self.registry.raise(id);
        }
    }

    fn pointer_move(&mut self, pointer: PointerSample) {
        self.drag.track(&mut self.registry, pointer);
    }

    fn pointer_up(&mut self, now: f64) {
        let Some(released) = self.drag.release() else {
            return;
        };
        self.registry.raise(released);

        // Resolution first: overlap from the drag itself must be cleared
        // before snap occupancy is evaluated.
        self.resolve_around(released, now);

        if let Some(plan) = snap::detect(&self.registry, released, &self.tuning) {
            let start = self.registry.piece(released).current_angle;
            self.animations[released.index()] = Some(Animation::new(
                start,
                plan.target_angle,
                now,
                self.tuning.snap_duration_ms,
                Finish::CommitSnap,
            ));
        }
    }
}
