//! Explicit angle interpolations driven by the frame ticker.
//!
//! Nothing here advances on its own: an [`Animation`] is a value describing
//! one glide, and [`sample`] reads its angle at a given time. The session
//! owns at most one animation per piece and replaces it, never layers it,
//! when a drag or a newer animation supersedes it.

use crate::engine::angle;

/// What happens when an interpolation reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Leave the piece resting at the target angle.
    Rest,
    /// Commit the piece into its slot at the target angle.
    CommitSnap,
}

/// A single in-flight angular interpolation for one piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    /// Angle the glide leaves from.
    pub start_angle: f64,
    /// Exact angle the glide lands on, in [0, 360).
    pub target_angle: f64,
    /// Absolute start time in milliseconds. May lie in the future for
    /// staggered collision pushes.
    pub start_time: f64,
    /// Glide length in milliseconds.
    pub duration: f64,
    pub finish: Finish,
}

impl Animation {
    pub fn new(
        start_angle: f64,
        target_angle: f64,
        start_time: f64,
        duration: f64,
        finish: Finish,
    ) -> Self {
        Self {
            start_angle,
            target_angle: angle::normalize(target_angle),
            start_time,
            duration,
            finish,
        }
    }

    /// True once the glide has run its full duration.
    pub fn finished(&self, now: f64) -> bool {
        now - self.start_time >= self.duration
    }
}

/// Quadratic ease-out: fast start, soft landing.
fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Angle of `animation` at time `now`.
///
/// Clamped at both ends: before `start_time` the start angle, at or past the
/// duration the exact target. The rotation always takes the shortest way
/// around.
pub fn sample(animation: &Animation, now: f64) -> f64 {
    let progress = if animation.duration <= 0.0 {
        1.0
    } else {
        ((now - animation.start_time) / animation.duration).clamp(0.0, 1.0)
    };
    if progress >= 1.0 {
        return animation.target_angle;
    }
    let delta = angle::shortest_distance(animation.start_angle, animation.target_angle);
    angle::normalize(animation.start_angle + delta * ease_out(progress))
}
