//! rondel CLI
//!
//! Usage:
//!   rondel [OPTIONS] [PUZZLE]
//!
//! Loads a TOML puzzle description (a built-in demo wheel when omitted),
//! builds a session, and prints the piece table. `--shuffle` scatters the
//! pieces first; `--solve` drags every piece home through the public
//! pointer port and reports the engine's events.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::fmt::SubscriberBuilder;

use rondel::engine::angle;
use rondel::{
    format_piece_table, PieceId, PointerPort, PointerSample, PuzzleConfig, PuzzleSession,
    SessionEvent, Tuning,
};

#[derive(Parser)]
#[command(name = "rondel")]
#[command(about = "Angular layout engine for circular drag-and-snap puzzles")]
struct Cli {
    /// Puzzle description file (TOML); the built-in demo wheel if omitted
    puzzle: Option<PathBuf>,

    /// Seed for reproducible shuffles
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Scatter the pieces before printing
    #[arg(long)]
    shuffle: bool,

    /// Drag every piece into place and report events
    #[arg(long)]
    solve: bool,

    /// Use the larger-variant push forces (10-30 degrees)
    #[arg(long)]
    large: bool,
}

fn main() {
    SubscriberBuilder::default().with_target(false).init();
    let cli = Cli::parse();

    let config = match &cli.puzzle {
        Some(path) => match PuzzleConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading puzzle '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => PuzzleConfig::default(),
    };

    let tuning = if cli.large {
        Tuning::large()
    } else {
        Tuning::default()
    };
    let mut session = PuzzleSession::with_seed(&config, tuning, cli.seed);
    let mut now = 0.0;

    if cli.shuffle || cli.solve {
        session.shuffle(now);
        now += 1000.0;
        session.tick(now);
    }

    if cli.solve {
        let events = solve(&mut session, &mut now);
        for event in &events {
            match event {
                SessionEvent::PieceSnapped(id) => {
                    println!("snapped {}", session.piece(*id).name);
                }
                SessionEvent::PuzzleCompleted => println!("puzzle completed"),
            }
        }
    }

    print!("{}", format_piece_table(session.registry()));
}

/// Drag every piece home through the pointer port.
///
/// Each round grabs the topmost unsnapped piece and drops it on the first
/// free target of its section, so every release snaps something and the
/// loop always terminates.
fn solve(session: &mut PuzzleSession, now: &mut f64) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while !session.is_solved() {
        let Some(id) = topmost_unsnapped(session) else {
            break;
        };
        let Some(target) = first_free_target(session, id) else {
            break;
        };

        let piece = session.piece(id);
        let ring = session.registry().ring(piece.ring);
        let radius = (ring.inner_radius + ring.outer_radius) / 2.0;
        let half = piece.segment_angle / 2.0;
        let grab_angle = piece.center();

        session.pointer_down(PointerSample::new(grab_angle, radius));
        session.pointer_move(PointerSample::new(target + half, radius));
        session.pointer_up(*now);
        *now += 2000.0;
        events.extend(session.tick(*now));
    }
    events
}

fn topmost_unsnapped(session: &PuzzleSession) -> Option<PieceId> {
    session
        .registry()
        .draw_order()
        .iter()
        .rev()
        .copied()
        .find(|&id| !session.piece(id).snapped)
}

/// First target angle of the piece's section with no snapped occupant.
fn first_free_target(session: &PuzzleSession, id: PieceId) -> Option<f64> {
    let registry = session.registry();
    let piece = session.piece(id);
    let ring = registry.ring(piece.ring);
    let section = registry.section(&piece.section)?;
    let slots = ring.segments as usize / registry.sections().len();
    let tolerance = session.tuning().occupancy_tolerance;

    (0..slots)
        .map(|slot| angle::normalize(section.start_angle + slot as f64 * ring.segment_angle))
        .find(|&target| {
            !registry.pieces().iter().any(|other| {
                other.ring == piece.ring
                    && other.snapped
                    && angle::shortest_distance(other.current_angle, target).abs() < tolerance
            })
        })
}
