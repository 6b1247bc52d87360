//! WAV file reading and writing.

use crate::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample. 32 is written as float, anything else as integer PCM.
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Mono 32-bit float at `sample_rate`.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// Length in seconds of `frames` frames.
    pub fn duration_secs(&self, frames: usize) -> f64 {
        frames as f64 / f64::from(self.sample_rate.max(1))
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file as mono f32 samples.
///
/// Multi-channel files are mixed down by averaging each frame.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    if channels == 1 {
        return Ok((samples, spec));
    }
    let mono = samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();
    Ok((mono, spec))
}

/// Write interleaved samples to a WAV file.
///
/// Integer formats clamp to full scale.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_float_roundtrip_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pluck.wav");
        let samples: Vec<f32> = (0..500).map(|i| ((i as f32) * 0.01).sin() * 0.9).collect();

        write_wav(&path, &samples, WavSpec::mono(22050)).unwrap();
        let (back, spec) = read_wav(&path).unwrap();

        assert_eq!(spec, WavSpec::mono(22050));
        assert_eq!(back, samples);
    }

    #[test]
    fn test_16_bit_clamps() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("loud.wav");
        let spec = WavSpec {
            bits_per_sample: 16,
            ..WavSpec::mono(44100)
        };

        write_wav(&path, &[0.0, 0.5, 4.0, -4.0], spec).unwrap();
        let (back, _) = read_wav(&path).unwrap();

        assert_eq!(back[0], 0.0);
        assert!((back[1] - 0.5).abs() < 1e-4);
        assert!(back[2] < 1.0 && back[2] > 0.999);
        assert_eq!(back[3], -1.0);
    }

    #[test]
    fn test_stereo_mixes_to_mono() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = WavSpec {
            channels: 2,
            ..WavSpec::mono(48000)
        };

        write_wav(&path, &[1.0, 0.0, 0.5, 0.5], spec).unwrap();
        let (mono, read_spec) = read_wav(&path).unwrap();

        assert_eq!(read_spec.channels, 2);
        assert_eq!(mono, [0.5, 0.5]);
    }

    #[test]
    fn test_duration() {
        assert_eq!(WavSpec::mono(44100).duration_secs(22050), 0.5);
    }
}
