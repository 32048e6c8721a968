//! Linear ADSR envelope generator.
//!
//! Each voice owns an [`Envelope`] (stage + level). Stage times and the
//! sustain level are pool-wide [`AdsrParams`]; once per rendered block they
//! are turned into per-sample [`EnvelopeSteps`] and every voice advances with
//! the same steps.
//!
//! ```text
//! Attack   level += 1 / (attack * sr)             reach 1       -> Decay
//! Decay    level -= (1 - sustain) / (decay * sr)  reach sustain -> Sustain
//! Sustain  hold                                    note off      -> Release
//! Release  level -= 1 / (release * sr)            reach 0       -> Off
//! ```
//!
//! A stage time at or below [`INSTANT_STAGE_S`] produces a step of 1.0, so
//! the stage completes in a single sample.

/// Stage times at or below this many seconds complete in one sample.
pub const INSTANT_STAGE_S: f32 = 0.0001;

/// ADSR envelope stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Voice is free; the envelope does not run.
    #[default]
    Off,
    /// Level ramps up toward 1.
    Attack,
    /// Level falls from 1 toward the sustain level.
    Decay,
    /// Level holds at the sustain level until note off.
    Sustain,
    /// Level falls toward 0 after note off.
    Release,
}

/// Envelope shape shared by all voices of a pool.
///
/// ## Parameters
/// - `attack_s`: Attack time in seconds (>= 0, default 0.01)
/// - `decay_s`: Decay time in seconds (>= 0, default 0.1)
/// - `sustain`: Sustain level (0.0 to 1.0, default 0.7)
/// - `release_s`: Release time in seconds (>= 0, default 0.2)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdsrParams {
    /// Attack time in seconds.
    pub attack_s: f32,
    /// Decay time in seconds.
    pub decay_s: f32,
    /// Sustain level.
    pub sustain: f32,
    /// Release time in seconds.
    pub release_s: f32,
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self {
            attack_s: 0.01,
            decay_s: 0.1,
            sustain: 0.7,
            release_s: 0.2,
        }
    }
}

impl AdsrParams {
    /// Copy with times clamped to `>= 0` and sustain to `[0, 1]`.
    ///
    /// Non-finite values fall back to the defaults.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let time = |t: f32, fallback: f32| if t.is_finite() { t.max(0.0) } else { fallback };
        Self {
            attack_s: time(self.attack_s, d.attack_s),
            decay_s: time(self.decay_s, d.decay_s),
            sustain: if self.sustain.is_finite() {
                self.sustain.clamp(0.0, 1.0)
            } else {
                d.sustain
            },
            release_s: time(self.release_s, d.release_s),
        }
    }

    /// Per-sample increments at `sample_rate`.
    pub fn steps(&self, sample_rate: f32) -> EnvelopeSteps {
        EnvelopeSteps {
            attack: stage_step(self.attack_s, 1.0, sample_rate),
            decay: stage_step(self.decay_s, 1.0 - self.sustain, sample_rate),
            release: stage_step(self.release_s, 1.0, sample_rate),
            sustain: self.sustain,
        }
    }
}

/// Per-sample envelope increments, computed once per block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeSteps {
    /// Attack increment per sample.
    pub attack: f32,
    /// Decay decrement per sample.
    pub decay: f32,
    /// Release decrement per sample.
    pub release: f32,
    /// Sustain level.
    pub sustain: f32,
}

#[inline]
fn stage_step(time_s: f32, span: f32, sample_rate: f32) -> f32 {
    if time_s <= INSTANT_STAGE_S {
        1.0
    } else {
        span / (time_s * sample_rate)
    }
}

/// Per-voice envelope state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Envelope {
    stage: EnvelopeStage,
    level: f32,
}

impl Envelope {
    /// An idle envelope at level 0.
    pub const fn new() -> Self {
        Self {
            stage: EnvelopeStage::Off,
            level: 0.0,
        }
    }

    /// Restart from level 0 in Attack.
    pub fn trigger(&mut self) {
        self.stage = EnvelopeStage::Attack;
        self.level = 0.0;
    }

    /// Enter Release from any sounding stage. An idle envelope stays idle.
    pub fn release(&mut self) {
        if self.stage != EnvelopeStage::Off {
            self.stage = EnvelopeStage::Release;
        }
    }

    /// Silence immediately.
    pub fn kill(&mut self) {
        self.stage = EnvelopeStage::Off;
        self.level = 0.0;
    }

    /// Current stage.
    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Current level without advancing.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// True unless the envelope is Off.
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Off
    }

    /// Advance one sample and return the new level.
    #[inline]
    pub fn advance(&mut self, steps: &EnvelopeSteps) -> f32 {
        match self.stage {
            EnvelopeStage::Off => {}
            EnvelopeStage::Attack => {
                self.level += steps.attack;
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }
            EnvelopeStage::Decay => {
                self.level -= steps.decay;
                if self.level <= steps.sustain {
                    self.level = steps.sustain;
                    self.stage = EnvelopeStage::Sustain;
                }
            }
            EnvelopeStage::Sustain => {}
            EnvelopeStage::Release => {
                self.level -= steps.release;
                if self.level <= 0.0 {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Off;
                }
            }
        }
        self.level
    }
}
