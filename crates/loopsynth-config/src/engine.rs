//! The engine configuration file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use loopsynth_core::config::SAMPLE_RATE;
use loopsynth_core::{
    DEFAULT_ECHO_FEEDBACK, DEFAULT_ECHO_MIX, DEFAULT_ECHO_TIME_MS, MAX_ECHO_FEEDBACK,
    MAX_ECHO_TIME_MS, MIN_ECHO_TIME_MS, MixGains,
};
use loopsynth_platform::{CcMap, DEFAULT_DEBOUNCE_MS, DEFAULT_LONG_PRESS_MS, DebouncedButton};
use loopsynth_synth::{AdsrParams, DEFAULT_MASTER_GAIN, Preset, VoicePool};

use crate::error::ConfigError;
use crate::validation::{Checker, ValidationResult};

/// Longest accepted envelope stage.
pub const MAX_STAGE_SECONDS: f32 = 10.0;

/// Complete engine configuration.
///
/// Every section and every field is optional in the file; missing values
/// take the instrument's defaults.
///
/// # TOML Format
///
/// ```toml
/// [audio]
/// buffer_size = 256
/// device = "Built-in Output"
///
/// [synth]
/// preset = 2
/// master_gain = 0.35
/// attack_s = 0.01
/// decay_s = 0.1
/// sustain = 0.7
/// release_s = 0.2
/// echo_on = true
/// echo_mix = 0.25
/// echo_feedback = 0.45
/// echo_time_ms = 280.0
///
/// [midi]
/// master_volume = 7
/// echo_on = 80
/// echo_mix = 91
/// echo_feedback = 93
/// echo_time = 94
///
/// [button]
/// debounce_ms = 30
/// long_press_ms = 3000
///
/// [mix]
/// live = 0.5
/// looped = 0.5
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Output stream settings.
    pub audio: AudioConfig,
    /// Initial synth parameters, applied to both synths.
    pub synth: SynthConfig,
    /// Controller numbers.
    pub midi: MidiConfig,
    /// Loop button timing.
    pub button: ButtonConfig,
    /// Live/loop bus gains.
    pub mix: MixConfig,
}

impl EngineConfig {
    /// Load from a TOML file and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut c = Checker::default();
        self.audio.check(&mut c);
        self.synth.check(&mut c);
        self.midi.check(&mut c);
        self.button.check(&mut c);
        self.mix.check(&mut c);
        c.finish()
    }
}

/// `[audio]` section.
///
/// There is no sample rate here: the engine always runs at
/// [`SAMPLE_RATE`], and a file that names one is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    /// Requested device buffer size in frames; device default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_size: Option<u32>,
    /// Output device name; system default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl AudioConfig {
    /// The fixed stream and render rate in Hz.
    pub const fn sample_rate(&self) -> u32 {
        SAMPLE_RATE as u32
    }

    fn check(&self, c: &mut Checker) {
        if let Some(frames) = self.buffer_size {
            c.range("audio.buffer_size", frames, 16.0, 8192.0);
        }
    }
}

/// `[synth]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthConfig {
    /// Initial preset index, 0-3.
    pub preset: u8,
    /// Master gain, 0-1.
    pub master_gain: f32,
    /// Attack time in seconds.
    pub attack_s: f32,
    /// Decay time in seconds.
    pub decay_s: f32,
    /// Sustain level, 0-1.
    pub sustain: f32,
    /// Release time in seconds.
    pub release_s: f32,
    /// Echo enabled.
    pub echo_on: bool,
    /// Echo wet mix, 0-1.
    pub echo_mix: f32,
    /// Echo feedback, 0-0.85.
    pub echo_feedback: f32,
    /// Echo time, 30-800 ms.
    pub echo_time_ms: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        let adsr = AdsrParams::default();
        Self {
            preset: 0,
            master_gain: DEFAULT_MASTER_GAIN,
            attack_s: adsr.attack_s,
            decay_s: adsr.decay_s,
            sustain: adsr.sustain,
            release_s: adsr.release_s,
            echo_on: false,
            echo_mix: DEFAULT_ECHO_MIX,
            echo_feedback: DEFAULT_ECHO_FEEDBACK,
            echo_time_ms: DEFAULT_ECHO_TIME_MS,
        }
    }
}

impl SynthConfig {
    fn check(&self, c: &mut Checker) {
        let stage = f64::from(MAX_STAGE_SECONDS);
        c.range("synth.preset", self.preset, 0.0, 3.0);
        c.range("synth.master_gain", self.master_gain, 0.0, 1.0);
        c.range("synth.attack_s", self.attack_s, 0.0, stage);
        c.range("synth.decay_s", self.decay_s, 0.0, stage);
        c.range("synth.sustain", self.sustain, 0.0, 1.0);
        c.range("synth.release_s", self.release_s, 0.0, stage);
        c.range("synth.echo_mix", self.echo_mix, 0.0, 1.0);
        c.range(
            "synth.echo_feedback",
            self.echo_feedback,
            0.0,
            f64::from(MAX_ECHO_FEEDBACK),
        );
        c.range(
            "synth.echo_time_ms",
            self.echo_time_ms,
            f64::from(MIN_ECHO_TIME_MS),
            f64::from(MAX_ECHO_TIME_MS),
        );
    }

    /// The preset as a synth value.
    pub fn preset(&self) -> Preset {
        Preset::from(self.preset)
    }

    /// The envelope shape.
    pub fn adsr(&self) -> AdsrParams {
        AdsrParams {
            attack_s: self.attack_s,
            decay_s: self.decay_s,
            sustain: self.sustain,
            release_s: self.release_s,
        }
    }

    /// Set every parameter on `pool`.
    pub fn apply<const N: usize>(&self, pool: &mut VoicePool<N>) {
        pool.set_preset(self.preset());
        pool.set_master_gain(self.master_gain);
        pool.set_envelope(self.adsr());
        pool.set_echo_on(self.echo_on);
        pool.set_echo_mix(self.echo_mix);
        pool.set_echo_feedback(self.echo_feedback);
        pool.set_echo_time_ms(self.echo_time_ms);
    }
}

/// `[midi]` section: controller numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MidiConfig {
    /// Master volume controller.
    pub master_volume: u8,
    /// Echo switch controller.
    pub echo_on: u8,
    /// Echo mix controller.
    pub echo_mix: u8,
    /// Echo feedback controller.
    pub echo_feedback: u8,
    /// Echo time controller.
    pub echo_time: u8,
}

impl Default for MidiConfig {
    fn default() -> Self {
        let map = CcMap::default();
        Self {
            master_volume: map.master_volume,
            echo_on: map.echo_on,
            echo_mix: map.echo_mix,
            echo_feedback: map.echo_feedback,
            echo_time: map.echo_time,
        }
    }
}

impl MidiConfig {
    fn fields(&self) -> [(&'static str, u8); 5] {
        [
            ("midi.master_volume", self.master_volume),
            ("midi.echo_on", self.echo_on),
            ("midi.echo_mix", self.echo_mix),
            ("midi.echo_feedback", self.echo_feedback),
            ("midi.echo_time", self.echo_time),
        ]
    }

    fn check(&self, c: &mut Checker) {
        let fields = self.fields();
        for (field, cc) in fields {
            c.range(field, cc, 0.0, 127.0);
        }
        c.distinct(&fields);
    }

    /// The controller map.
    pub fn cc_map(&self) -> CcMap {
        CcMap {
            master_volume: self.master_volume,
            echo_on: self.echo_on,
            echo_mix: self.echo_mix,
            echo_feedback: self.echo_feedback,
            echo_time: self.echo_time,
        }
    }
}

/// `[button]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ButtonConfig {
    /// Debounce window in milliseconds.
    pub debounce_ms: u32,
    /// Hold time of a long press in milliseconds.
    pub long_press_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
        }
    }
}

impl ButtonConfig {
    fn check(&self, c: &mut Checker) {
        c.range("button.debounce_ms", self.debounce_ms, 1.0, 500.0);
        c.range("button.long_press_ms", self.long_press_ms, 100.0, 60_000.0);
        if self.long_press_ms <= self.debounce_ms {
            c.range(
                "button.long_press_ms",
                self.long_press_ms,
                f64::from(self.debounce_ms) + 1.0,
                60_000.0,
            );
        }
    }

    /// A released button with this timing.
    pub fn button(&self) -> DebouncedButton {
        DebouncedButton::with_timing(self.debounce_ms, self.long_press_ms)
    }
}

/// `[mix]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MixConfig {
    /// Live bus gain, 0-1.
    pub live: f32,
    /// Loop bus gain, 0-1.
    pub looped: f32,
}

impl Default for MixConfig {
    fn default() -> Self {
        let gains = MixGains::default();
        Self {
            live: gains.live,
            looped: gains.looped,
        }
    }
}

impl MixConfig {
    fn check(&self, c: &mut Checker) {
        c.range("mix.live", self.live, 0.0, 1.0);
        c.range("mix.looped", self.looped, 0.0, 1.0);
    }

    /// The bus gains.
    pub fn gains(&self) -> MixGains {
        MixGains {
            live: self.live,
            looped: self.looped,
        }
    }
}
