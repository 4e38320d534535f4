//! Puzzle configuration loading and validation
//!
//! A puzzle is described in a TOML file: an ordered list of rings (annuli
//! subdivided into equal slots) and an ordered list of sections (the
//! categorical groups that own a run of slots in every ring). The file is
//! parsed into raw serde structs, validated, and converted into the
//! immutable [`RingSpec`]/[`SectionSpec`] domain types the engine builds
//! pieces from.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when loading or validating a puzzle description.
///
/// All of these are fatal to initialization: the puzzle does not start on a
/// malformed file. The one tolerated defect is a label-count mismatch, which
/// degrades to empty labels with a logged warning instead of an error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read puzzle file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse puzzle TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("puzzle has no rings")]
    NoRings,
    #[error("puzzle has no sections")]
    NoSections,
    #[error("ring {index}: invalid radii (inner {inner}, outer {outer})")]
    BadRadii { index: usize, inner: f64, outer: f64 },
    #[error("ring {index}: segment count must be positive")]
    NoSegments { index: usize },
    #[error("ring {index}: {segments} segments cannot be divided among {sections} sections")]
    UnevenSegments {
        index: usize,
        segments: u32,
        sections: usize,
    },
    #[error("section '{id}': start angle {angle} is not finite")]
    BadStartAngle { id: String, angle: f64 },
}

/// One concentric annulus of the puzzle, subdivided into equal-width slots.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSpec {
    /// Position in the ring order, innermost first.
    pub index: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Total slot count across all sections.
    pub segments: u32,
    /// Angular width of one slot, in degrees.
    pub segment_angle: f64,
}

impl RingSpec {
    /// True when `radius` falls inside this annulus.
    pub fn contains_radius(&self, radius: f64) -> bool {
        radius >= self.inner_radius && radius <= self.outer_radius
    }
}

/// One categorical group of the puzzle.
///
/// A section owns `segments / section_count` consecutive slots in every
/// ring, starting at its base angle, and contributes one labeled piece per
/// owned slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub id: String,
    /// Solid fill used when the gradient is unavailable.
    pub color: String,
    /// Identifier of a gradient definition owned by the renderer.
    pub gradient: Option<String>,
    /// Base angle of the section's home region, in degrees.
    pub start_angle: f64,
    /// Labels per ring, one entry per slot the section owns there.
    /// Distributed from the flat `labels` list in ring order.
    pub ring_labels: Vec<Vec<String>>,
}

/// A fully validated puzzle description. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleConfig {
    pub rings: Vec<RingSpec>,
    pub sections: Vec<SectionSpec>,
}

/// TOML structure for deserializing puzzle files.
#[derive(Deserialize)]
struct TomlPuzzle {
    rings: Vec<TomlRing>,
    sections: Vec<TomlSection>,
}

#[derive(Deserialize)]
struct TomlRing {
    inner_radius: f64,
    outer_radius: f64,
    segments: u32,
}

#[derive(Deserialize)]
struct TomlSection {
    id: String,
    color: String,
    gradient: Option<String>,
    start_angle: f64,
    /// Flat label list, consumed ring by ring.
    #[serde(default)]
    labels: Vec<String>,
}

/// Built-in demo puzzle: the classical four-humors wheel, three rings of
/// 4/8/12 slots.
const DEMO_PUZZLE: &str = r##"
[[rings]]
inner_radius = 60.0
outer_radius = 120.0
segments = 4

[[rings]]
inner_radius = 120.0
outer_radius = 180.0
segments = 8

[[rings]]
inner_radius = 180.0
outer_radius = 240.0
segments = 12

[[sections]]
id = "choleric"
color = "#f2b632"
gradient = "cholericGradient"
start_angle = 0.0
labels = ["Choleric", "Fire", "Summer", "Yellow Bile", "Hot", "Dry"]

[[sections]]
id = "sanguine"
color = "#d84732"
gradient = "sanguineGradient"
start_angle = 90.0
labels = ["Sanguine", "Air", "Spring", "Blood", "Hot", "Moist"]

[[sections]]
id = "melancholic"
color = "#334b5f"
gradient = "melancholicGradient"
start_angle = 180.0
labels = ["Melancholic", "Earth", "Autumn", "Black Bile", "Cold", "Dry"]

[[sections]]
id = "phlegmatic"
color = "#328bc4"
gradient = "phlegmaticGradient"
start_angle = 270.0
labels = ["Phlegmatic", "Water", "Winter", "Phlegm", "Cold", "Moist"]
"##;

impl PuzzleConfig {
    /// Load a puzzle description from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a puzzle description from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlPuzzle = toml::from_str(content)?;
        Self::build(parsed)
    }

    fn build(parsed: TomlPuzzle) -> Result<Self, ConfigError> {
        if parsed.rings.is_empty() {
            return Err(ConfigError::NoRings);
        }
        if parsed.sections.is_empty() {
            return Err(ConfigError::NoSections);
        }

        let section_count = parsed.sections.len();
        let mut rings = Vec::with_capacity(parsed.rings.len());
        for (index, ring) in parsed.rings.iter().enumerate() {
            if ring.inner_radius < 0.0 || ring.inner_radius >= ring.outer_radius {
                return Err(ConfigError::BadRadii {
                    index,
                    inner: ring.inner_radius,
                    outer: ring.outer_radius,
                });
            }
            if ring.segments == 0 {
                return Err(ConfigError::NoSegments { index });
            }
            if ring.segments as usize % section_count != 0 {
                return Err(ConfigError::UnevenSegments {
                    index,
                    segments: ring.segments,
                    sections: section_count,
                });
            }
            rings.push(RingSpec {
                index,
                inner_radius: ring.inner_radius,
                outer_radius: ring.outer_radius,
                segments: ring.segments,
                segment_angle: 360.0 / f64::from(ring.segments),
            });
        }

        let mut sections = Vec::with_capacity(section_count);
        for section in parsed.sections {
            if !section.start_angle.is_finite() {
                return Err(ConfigError::BadStartAngle {
                    id: section.id,
                    angle: section.start_angle,
                });
            }
            let ring_labels = distribute_labels(&section.id, &section.labels, &rings, section_count);
            sections.push(SectionSpec {
                id: section.id,
                color: section.color,
                gradient: section.gradient,
                start_angle: section.start_angle,
                ring_labels,
            });
        }

        Ok(PuzzleConfig { rings, sections })
    }

    /// Slots owned by one section in `ring`.
    pub fn slots_per_section(&self, ring: &RingSpec) -> usize {
        ring.segments as usize / self.sections.len()
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self::from_str(DEMO_PUZZLE).expect("built-in demo puzzle is valid")
    }
}

/// Split a section's flat label list into per-ring lists, consuming
/// `segments / section_count` labels per ring in ring order.
///
/// A count mismatch is tolerated: missing labels become empty strings and
/// surplus labels are ignored, both with a logged warning.
fn distribute_labels(
    section: &str,
    labels: &[String],
    rings: &[RingSpec],
    section_count: usize,
) -> Vec<Vec<String>> {
    let mut cursor = 0;
    let mut ring_labels = Vec::with_capacity(rings.len());
    for ring in rings {
        let expected = ring.segments as usize / section_count;
        let available = labels.len().saturating_sub(cursor).min(expected);
        if available < expected {
            warn!(
                section,
                ring = ring.index,
                expected,
                got = available,
                "label count mismatch; padding with empty labels"
            );
        }
        let mut slot_labels: Vec<String> = labels[cursor..cursor + available].to_vec();
        slot_labels.resize(expected, String::new());
        cursor += available;
        ring_labels.push(slot_labels);
    }
    if cursor < labels.len() {
        warn!(
            section,
            surplus = labels.len() - cursor,
            "more labels than slots; ignoring the surplus"
        );
    }
    ring_labels
}
