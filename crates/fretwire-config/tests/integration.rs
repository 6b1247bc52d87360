//! Integration tests for fretwire-config.

use fretwire_config::{
    ConfigError, GuitarConfig, Note, TUNING_NAMES, TuningSpec, note_name, parse_chord_shape,
    tuning_by_name,
};
use tempfile::TempDir;

#[test]
fn test_save_and_load_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let config = GuitarConfig {
        tuning: TuningSpec::Named("dadgad".to_string()),
        gain: 3.0,
        buffer_size: 256,
        seed: Some(1234),
        ..GuitarConfig::default()
    };
    config.save(&path).unwrap();
    assert!(path.exists());

    let loaded = GuitarConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.resolve_tuning().unwrap(), [38, 45, 50, 55, 57, 62]);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");
    let err = GuitarConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn test_load_rejects_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "gain = \"loud\"").unwrap();
    assert!(matches!(
        GuitarConfig::load(&path),
        Err(ConfigError::TomlParse(_))
    ));

    std::fs::write(&path, "buffer_size = 0").unwrap();
    assert!(matches!(
        GuitarConfig::load(&path),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_chord_shapes_address_configured_strings() {
    let config = GuitarConfig::from_toml(
        r#"
        tuning = "bass"

        [chords]
        root-fifth = "35"
        "#,
    )
    .unwrap();
    let tuning = config.resolve_tuning().unwrap();
    let notes = parse_chord_shape(config.chord_shape("root-fifth"), tuning.len()).unwrap();

    let names: Vec<String> = notes
        .iter()
        .map(|n| note_name(n.pitch(&tuning).unwrap()))
        .collect();
    assert_eq!(names, ["G1", "D2"]);

    // A six-string shape does not fit a four-string bass.
    assert!(parse_chord_shape("x32010", tuning.len()).is_err());
}

#[test]
fn test_every_named_tuning_loads_from_toml() {
    for name in TUNING_NAMES {
        let config = GuitarConfig::from_toml(&format!("tuning = \"{name}\"")).unwrap();
        assert_eq!(
            config.resolve_tuning().unwrap(),
            tuning_by_name(name).unwrap()
        );
    }
}

#[test]
fn test_open_chord_pitches_in_standard_tuning() {
    let tuning = tuning_by_name("standard").unwrap();
    let c_major = parse_chord_shape("x32010", tuning.len()).unwrap();
    assert_eq!(c_major.first(), Some(&Note::new(1, 3)));

    let names: Vec<String> = c_major
        .iter()
        .map(|n| note_name(n.pitch(tuning).unwrap()))
        .collect();
    assert_eq!(names, ["C3", "E3", "G3", "C4", "E4"]);
}
