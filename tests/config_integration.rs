//! Configuration loading through the public API: TOML fixtures, the
//! tolerated label mismatch, and the fatal failure modes.

use std::path::Path;

use rondel::{
    format_piece_table, ConfigError, PuzzleConfig, PuzzleSession, SegmentRegistry, Tuning,
};

#[test]
fn test_quarter_wheel_builds_the_expected_pieces() {
    let source = r##"
        [[rings]]
        inner_radius = 60.0
        outer_radius = 120.0
        segments = 4

        [[sections]]
        id = "north"
        color = "#111111"
        start_angle = 0.0
        labels = ["N0", "N1"]

        [[sections]]
        id = "south"
        color = "#222222"
        start_angle = 180.0
        labels = ["S0", "S1"]
    "##;
    let config = PuzzleConfig::from_str(source).unwrap();
    let registry = SegmentRegistry::from_config(&config);
    let table = format_piece_table(&registry);
    insta::assert_snapshot!(table.trim_end(), @r"
    piece-0-north-0 ring=0 section=north angle=0.0 target=0.0 snapped=false label=N0
    piece-0-north-1 ring=0 section=north angle=90.0 target=90.0 snapped=false label=N1
    piece-0-south-0 ring=0 section=south angle=180.0 target=180.0 snapped=false label=S0
    piece-0-south-1 ring=0 section=south angle=270.0 target=270.0 snapped=false label=S1
    ");
}

#[test]
fn test_label_shortage_degrades_to_empty_labels() {
    let source = r##"
        [[rings]]
        inner_radius = 10.0
        outer_radius = 20.0
        segments = 2

        [[rings]]
        inner_radius = 20.0
        outer_radius = 30.0
        segments = 4

        [[sections]]
        id = "solo"
        color = "#123456"
        start_angle = 0.0
        labels = ["only", "first-of-four"]

        [[sections]]
        id = "duo"
        color = "#654321"
        start_angle = 180.0
        labels = ["a", "b", "c", "extra"]
    "##;
    let config = PuzzleConfig::from_str(source).unwrap();

    // "solo" runs out after the second ring's first slot.
    assert_eq!(config.sections[0].ring_labels[0], vec!["only"]);
    assert_eq!(config.sections[0].ring_labels[1], vec!["first-of-four", ""]);

    // "duo" has one label too many; the surplus is dropped.
    assert_eq!(config.sections[1].ring_labels[0], vec!["a"]);
    assert_eq!(config.sections[1].ring_labels[1], vec!["b", "c"]);

    // Pieces still build, with empty labels where the list ran short.
    let registry = SegmentRegistry::from_config(&config);
    assert_eq!(registry.len(), 6);
    let unlabeled = registry
        .pieces()
        .iter()
        .filter(|piece| piece.label.is_empty())
        .count();
    assert_eq!(unlabeled, 1);
}

#[test]
fn test_session_builds_straight_from_a_file() {
    let source = r##"
        [[rings]]
        inner_radius = 60.0
        outer_radius = 120.0
        segments = 4

        [[sections]]
        id = "north"
        color = "#111111"
        start_angle = 0.0
        labels = ["N0", "N1"]

        [[sections]]
        id = "south"
        color = "#222222"
        start_angle = 180.0
        labels = ["S0", "S1"]
    "##;
    let path = std::env::temp_dir().join("rondel-quarter-wheel.toml");
    std::fs::write(&path, source).unwrap();
    let session = PuzzleSession::from_file(&path, Tuning::default()).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(session.registry().len(), 4);
    assert!(!session.is_solved());
}

#[test]
fn test_missing_file_is_fatal() {
    let err = PuzzleConfig::from_file(Path::new("no/such/puzzle.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_unparseable_toml_is_fatal() {
    let err = PuzzleConfig::from_str("[[rings]\nsegments = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_validation_failures_are_fatal() {
    let uneven = r##"
        [[rings]]
        inner_radius = 10.0
        outer_radius = 20.0
        segments = 3

        [[sections]]
        id = "a"
        color = "#111111"
        start_angle = 0.0

        [[sections]]
        id = "b"
        color = "#222222"
        start_angle = 180.0
    "##;
    assert!(matches!(
        PuzzleConfig::from_str(uneven).unwrap_err(),
        ConfigError::UnevenSegments { .. }
    ));

    let unstartable = r##"
        [[rings]]
        inner_radius = 10.0
        outer_radius = 20.0
        segments = 2

        [[sections]]
        id = "a"
        color = "#111111"
        start_angle = inf
        labels = []
    "##;
    assert!(matches!(
        PuzzleConfig::from_str(unstartable).unwrap_err(),
        ConfigError::BadStartAngle { .. }
    ));
}
