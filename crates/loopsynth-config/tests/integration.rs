//! Integration tests for loopsynth-config: file round trips and wiring a
//! loaded configuration into the engine.

use loopsynth_config::{ConfigError, EngineConfig};
use loopsynth_looper::{Looper, ManualClock};
use loopsynth_platform::Controller;
use loopsynth_synth::{Preset, VoicePool};
use tempfile::TempDir;

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nested").join("loopsynth.toml");

    let mut config = EngineConfig::default();
    config.audio.device = Some("Test Device".to_string());
    config.audio.buffer_size = Some(256);
    config.synth.preset = 2;
    config.synth.echo_on = true;
    config.midi.echo_time = 74;
    config.mix.looped = 0.8;
    config.save(&path).expect("save config");

    let loaded = EngineConfig::load(&path).expect("load config");
    assert_eq!(loaded, config);
}

#[test]
fn missing_file_is_read_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = EngineConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn malformed_file_is_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[synth\nmaster_gain = ").expect("write");
    let err = EngineConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}

#[test]
fn wrong_type_is_parse_error() {
    let err = EngineConfig::from_toml("[midi]\necho_on = \"eighty\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}

#[test]
fn invalid_file_names_every_field() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("invalid.toml");
    std::fs::write(
        &path,
        "[synth]\nmaster_gain = 2.0\necho_time_ms = 5.0\n[audio]\nbuffer_size = 4\n",
    )
    .expect("write");
    let msg = EngineConfig::load(&path).unwrap_err().to_string();
    for field in ["synth.master_gain", "synth.echo_time_ms", "audio.buffer_size"] {
        assert!(msg.contains(field), "missing {field} in: {msg}");
    }
}

#[test]
fn configured_controller_uses_file_values() {
    let config = EngineConfig::from_toml(
        "[synth]\npreset = 3\n[midi]\nmaster_volume = 11\n[button]\nlong_press_ms = 1000\n",
    )
    .expect("valid config");

    let mut live: VoicePool = VoicePool::new();
    let mut looped: VoicePool = VoicePool::new();
    config.synth.apply(&mut live);
    config.synth.apply(&mut looped);

    let clock = ManualClock::new(0);
    let looper: Looper<VoicePool, &ManualClock> = Looper::new(looped, &clock);
    let mut controller = Controller::new(live, looper)
        .with_cc_map(config.midi.cc_map())
        .with_button(config.button.button());
    controller.looper_mut().set_live_preset(config.synth.preset());

    controller.handle_midi_bytes(&[0xB0, 11, 0]);
    assert_eq!(controller.live().master_gain(), 0.0);
    assert_eq!(controller.live().preset(), Preset::Pad);
    assert_eq!(controller.looper().live_preset(), Preset::Pad);
    assert_eq!(controller.button().long_press_ms(), 1000);
}
