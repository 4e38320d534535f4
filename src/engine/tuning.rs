//! Tunable thresholds for collision resolution, snapping, and motion.

/// Engine tunables, shared by every component of a session.
///
/// The defaults match the compact puzzle variant; [`Tuning::large`] holds
/// the stronger push forces used by puzzles with more, wider pieces.
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Angular overlap below which two arcs are not treated as colliding.
    /// Keeps adjacent-edge contact from flickering in and out of collision.
    pub collision_epsilon: f64,
    /// Fraction of the measured overlap converted into push distance.
    pub push_scale: f64,
    /// Smallest push applied to an overlapping piece, degrees.
    pub min_push: f64,
    /// Largest push applied to an overlapping piece, degrees.
    pub max_push: f64,
    /// Snap acceptance distance for the innermost ring. Larger than the
    /// outer threshold because inner rings are subdivided more coarsely.
    pub snap_threshold_inner: f64,
    /// Snap acceptance distance for every other ring.
    pub snap_threshold_outer: f64,
    /// Wrapped distance below which a snapped piece occupies a target angle.
    pub occupancy_tolerance: f64,
    /// Step size of the safe-position search, degrees.
    pub search_step: f64,
    /// Search limit for safe positions; half the circle.
    pub max_search: f64,
    /// Random placements tried per piece before shuffle accepts an overlap.
    pub shuffle_attempts: u32,
    /// Snap commit animation length, milliseconds.
    pub snap_duration_ms: f64,
    /// Collision push animation length, milliseconds.
    pub push_duration_ms: f64,
    /// Delay between successive push animations, milliseconds.
    pub push_stagger_ms: f64,
    /// Shuffle glide length, milliseconds.
    pub shuffle_duration_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            collision_epsilon: 8.0,
            push_scale: 0.8,
            min_push: 3.0,
            max_push: 12.0,
            snap_threshold_inner: 45.0,
            snap_threshold_outer: 30.0,
            occupancy_tolerance: 5.0,
            search_step: 5.0,
            max_search: 180.0,
            shuffle_attempts: 10,
            snap_duration_ms: 300.0,
            push_duration_ms: 200.0,
            push_stagger_ms: 20.0,
            shuffle_duration_ms: 200.0,
        }
    }
}

impl Tuning {
    /// Tunables for the compact puzzle variant (pushes of 3°-12°).
    pub fn compact() -> Self {
        Self::default()
    }

    /// Tunables for the larger puzzle variant (pushes of 10°-30°).
    pub fn large() -> Self {
        Self {
            min_push: 10.0,
            max_push: 30.0,
            ..Self::default()
        }
    }

    /// Set the collision epsilon.
    pub fn with_collision_epsilon(mut self, epsilon: f64) -> Self {
        self.collision_epsilon = epsilon;
        self
    }

    /// Set the push force bounds.
    pub fn with_push_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_push = min;
        self.max_push = max;
        self
    }

    /// Set the snap thresholds for the innermost and the remaining rings.
    pub fn with_snap_thresholds(mut self, inner: f64, outer: f64) -> Self {
        self.snap_threshold_inner = inner;
        self.snap_threshold_outer = outer;
        self
    }

    /// Snap threshold for a ring.
    pub fn snap_threshold(&self, ring_index: usize) -> f64 {
        if ring_index == 0 {
            self.snap_threshold_inner
        } else {
            self.snap_threshold_outer
        }
    }

    /// Push distance for a measured overlap, scaled and clamped.
    pub fn push_for_overlap(&self, overlap: f64) -> f64 {
        (overlap * self.push_scale).clamp(self.min_push, self.max_push)
    }
}
