//! rondel - an angular layout and collision-resolution engine for circular
//! drag-and-snap puzzles.
//!
//! Labeled wedge-shaped pieces sit on concentric rings. A user drags a
//! piece by angle; on release the engine pushes overlapping same-ring
//! pieces apart, snaps the piece into a matching slot when it is close
//! enough and the slot is free, and signals completion once every piece is
//! home. Rendering and raw pointer mapping stay outside: the engine
//! consumes polar pointer samples and produces piece-state snapshots.
//!
//! # Example
//!
//! ```rust
//! use rondel::{PuzzleConfig, PuzzleSession, Tuning};
//!
//! let config = PuzzleConfig::default();
//! let mut session = PuzzleSession::with_seed(&config, Tuning::default(), 7);
//!
//! session.shuffle(0.0);
//! let _ = session.tick(500.0);
//! assert!(!session.is_solved());
//! ```

pub mod config;
pub mod engine;
pub mod view;

pub use config::{ConfigError, PuzzleConfig, RingSpec, SectionSpec};
pub use engine::drag::{DragController, PointerSample};
pub use engine::session::{PointerPort, PuzzleSession, SessionEvent};
pub use engine::tuning::Tuning;
pub use engine::types::{PieceId, PieceRecord, SegmentRegistry};
pub use view::{format_piece_table, piece_views, PieceView};
