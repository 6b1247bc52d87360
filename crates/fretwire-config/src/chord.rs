//! Tab-style chord shapes.
//!
//! A shape lists one fret per string, lowest string first. Positions are
//! either fret numbers or a mute mark (`x`, `X` or `-`) for strings that are
//! not played. Two spellings are accepted:
//!
//! - compact, one character per string: `"x32010"`
//! - separated by commas or whitespace, for frets above 9: `"x,10,12,12,11,x"`

use crate::ConfigError;
use fretwire_synth::Note;

/// Characters that mark a string as not played.
pub const MUTED: &[char] = &['x', 'X', '-'];

/// Parse a chord shape into the notes to play.
///
/// Muted positions produce no note. A shape with fewer positions than
/// `strings` leaves the remaining high strings unplayed; a longer shape is
/// rejected. A shape where every string is muted yields an empty list, which
/// an instrument treats as "stop all".
///
/// ```rust
/// use fretwire_config::{Note, parse_chord_shape};
///
/// let c_major = parse_chord_shape("x32010", 6).unwrap();
/// assert_eq!(c_major[0], Note::new(1, 3));
/// assert_eq!(c_major.len(), 5);
///
/// let high = parse_chord_shape("x 10 12 12 11 x", 6).unwrap();
/// assert_eq!(high[0], Note::new(1, 10));
/// ```
pub fn parse_chord_shape(shape: &str, strings: usize) -> Result<Vec<Note>, ConfigError> {
    let trimmed = shape.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::invalid_chord(shape, "empty shape"));
    }

    let separated = trimmed.contains(|c: char| c == ',' || c.is_whitespace());
    let positions: Vec<&str> = if separated {
        trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect()
    } else {
        trimmed
            .char_indices()
            .map(|(i, c)| &trimmed[i..i + c.len_utf8()])
            .collect()
    };

    if positions.len() > strings {
        return Err(ConfigError::invalid_chord(
            shape,
            format!(
                "{} positions for a {strings}-string instrument",
                positions.len()
            ),
        ));
    }

    let mut notes = Vec::with_capacity(positions.len());
    for (string, position) in positions.iter().enumerate() {
        if position.len() == 1 && position.starts_with(MUTED) {
            continue;
        }
        let fret: i32 = position.parse().map_err(|_| {
            ConfigError::invalid_chord(shape, format!("unexpected '{position}'"))
        })?;
        if fret < 0 {
            return Err(ConfigError::invalid_chord(
                shape,
                format!("negative fret {fret}"),
            ));
        }
        notes.push(Note::new(string, fret));
    }
    Ok(notes)
}
