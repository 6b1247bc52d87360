//! Built-in tunings.
//!
//! Each tuning lists string base pitches from the lowest-sounding string to the
//! highest, matching the string indices chord shapes use.

use fretwire_synth::STANDARD_TUNING;

/// A built-in tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedTuning {
    /// Lookup name, lowercase and hyphenated.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Base pitch per string.
    pub pitches: &'static [i32],
}

static TUNINGS: &[NamedTuning] = &[
    NamedTuning {
        name: "standard",
        description: "E A D G B E",
        pitches: &STANDARD_TUNING,
    },
    NamedTuning {
        name: "drop-d",
        description: "D A D G B E",
        pitches: &[38, 45, 50, 55, 59, 64],
    },
    NamedTuning {
        name: "half-step-down",
        description: "Eb Ab Db Gb Bb Eb",
        pitches: &[39, 44, 49, 54, 58, 63],
    },
    NamedTuning {
        name: "open-g",
        description: "D G D G B D",
        pitches: &[38, 43, 50, 55, 59, 62],
    },
    NamedTuning {
        name: "open-d",
        description: "D A D F# A D",
        pitches: &[38, 45, 50, 54, 57, 62],
    },
    NamedTuning {
        name: "dadgad",
        description: "D A D G A D",
        pitches: &[38, 45, 50, 55, 57, 62],
    },
    NamedTuning {
        name: "bass",
        description: "4-string bass, E A D G",
        pitches: &[28, 33, 38, 43],
    },
];

/// Names of all built-in tunings, in listing order.
pub const TUNING_NAMES: &[&str] = &[
    "standard",
    "drop-d",
    "half-step-down",
    "open-g",
    "open-d",
    "dadgad",
    "bass",
];

/// Iterate over the built-in tunings.
pub fn named_tunings() -> impl Iterator<Item = &'static NamedTuning> {
    TUNINGS.iter()
}

/// Look up a built-in tuning by name.
///
/// Case-insensitive; underscores and spaces are treated as hyphens, so
/// `"Drop_D"` finds `drop-d`.
pub fn tuning_by_name(name: &str) -> Option<&'static [i32]> {
    let wanted: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    TUNINGS
        .iter()
        .find(|t| t.name == wanted)
        .map(|t| t.pitches)
}
