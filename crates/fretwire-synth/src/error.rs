//! Errors reported by the control operations of an [`Instrument`](crate::Instrument).
//!
//! The per-sample path never fails; only tuning and note routing can be
//! rejected.

/// Errors from instrument configuration and note routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthError {
    /// A tuning did not have one entry per string. Nothing was changed.
    TuningMismatch {
        /// Number of strings on the instrument.
        expected: usize,
        /// Number of entries in the rejected tuning.
        found: usize,
    },
    /// A note named a string the instrument does not have. The note was skipped.
    StringOutOfRange {
        /// The rejected string index.
        index: usize,
        /// Number of strings on the instrument.
        strings: usize,
    },
}

impl core::fmt::Display for SynthError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TuningMismatch { expected, found } => {
                write!(f, "tuning has {found} entries, instrument has {expected} strings")
            }
            Self::StringOutOfRange { index, strings } => {
                write!(f, "string {index} out of range (instrument has {strings} strings)")
            }
        }
    }
}

impl core::error::Error for SynthError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_tuning_mismatch() {
        let err = SynthError::TuningMismatch {
            expected: 6,
            found: 5,
        };
        assert_eq!(err.to_string(), "tuning has 5 entries, instrument has 6 strings");
    }

    #[test]
    fn test_display_out_of_range() {
        let err = SynthError::StringOutOfRange {
            index: 7,
            strings: 6,
        };
        assert!(err.to_string().contains("string 7"));
    }
}
