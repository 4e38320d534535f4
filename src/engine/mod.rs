//! The angular layout and collision-resolution engine.
//!
//! Components, leaves first: pure angle math, the piece registry, the drag
//! state machine, the collision resolver, the snap detector, shuffle, and
//! the session that owns them all. Pointer input flows through the session's
//! [`PointerPort`](session::PointerPort); piece state flows out through
//! [`crate::view::PieceView`] snapshots.

pub mod angle;
pub mod animation;
pub(crate) mod collision;
pub mod drag;
pub mod session;
pub(crate) mod shuffle;
pub(crate) mod snap;
pub mod tuning;
pub mod types;

pub use drag::{DragController, PointerSample};
pub use session::{PointerPort, PuzzleSession, SessionEvent};
pub use tuning::Tuning;
pub use types::{PieceId, PieceRecord, SegmentRegistry};
