//! Scientific pitch notation: `"E2"`, `"F#3"`, `"Bb-1"`.
//!
//! Middle C is `C4` = 60, so `A4` = 69 lines up with the synthesis core.

use crate::ConfigError;

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

fn letter_semitone(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Parse a note name into a pitch code.
///
/// Accepts a letter `A`-`G` (either case), any number of `#` or `b`
/// accidentals, then a signed octave number. Leading and trailing whitespace
/// is ignored.
///
/// ```rust
/// use fretwire_config::parse_note_name;
///
/// assert_eq!(parse_note_name("E2").unwrap(), 40);
/// assert_eq!(parse_note_name("a4").unwrap(), 69);
/// assert_eq!(parse_note_name("Bb1").unwrap(), 34);
/// assert_eq!(parse_note_name("C-1").unwrap(), 0);
/// ```
pub fn parse_note_name(name: &str) -> Result<i32, ConfigError> {
    let invalid = || ConfigError::InvalidNote(name.to_string());
    let trimmed = name.trim();

    let mut chars = trimmed.chars();
    let semitone = chars.next().and_then(letter_semitone).ok_or_else(invalid)?;
    let rest = chars.as_str();

    let accidentals = rest.len() - rest.trim_start_matches(['#', 'b']).len();
    let (marks, octave) = rest.split_at(accidentals);
    let shift: i32 = marks.chars().map(|c| if c == '#' { 1 } else { -1 }).sum();

    if octave.is_empty() {
        return Err(invalid());
    }
    let octave: i32 = octave.parse().map_err(|_| invalid())?;

    (octave + 1)
        .checked_mul(12)
        .and_then(|base| base.checked_add(semitone + shift))
        .ok_or_else(invalid)
}

/// Format a pitch code as a note name, spelling accidentals as sharps.
///
/// ```rust
/// use fretwire_config::note_name;
///
/// assert_eq!(note_name(40), "E2");
/// assert_eq!(note_name(61), "C#4");
/// ```
pub fn note_name(pitch: i32) -> String {
    let octave = pitch.div_euclid(12) - 1;
    let class = pitch.rem_euclid(12) as usize;
    format!("{}{}", SHARP_NAMES[class], octave)
}
