//! Property-based tests for loopsynth-core DSP primitives.
//!
//! Tests wavetable wrapping, echo delay integrity and parameter clamping
//! using proptest for randomized input generation.

use loopsynth_core::{
    EchoEffect, Lcg, MAX_ECHO_FEEDBACK, MAX_ECHO_TIME_MS, MIN_ECHO_TIME_MS, OnePole, hard_clip,
    sine_table, soft_clip, to_i16,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any finite phase maps to a table entry, and whole-cycle offsets do
    /// not change the result.
    #[test]
    fn sine_lookup_wraps(phase in 0.0f32..1.0f32, cycles in -8i32..8) {
        let table = sine_table();
        let base = table.lookup(phase);
        prop_assert!((-1.0..=1.0).contains(&base));

        let shifted = table.lookup(phase + cycles as f32);
        // Adding an integer can round the product across a cell edge; allow
        // one table step of slope.
        prop_assert!((shifted - base).abs() < 0.01, "phase {} cycles {}: {} vs {}", phase, cycles, base, shifted);
    }

    /// With feedback 0 and mix 1 the echo is an exact `len`-sample delay.
    #[test]
    fn echo_is_pure_delay(
        time_ms in 30.0f32..200.0f32,
        input in prop::collection::vec(-1.0f32..=1.0f32, 64..400),
    ) {
        let mut echo: EchoEffect<1024> = EchoEffect::new(1000.0);
        echo.set_enabled(true);
        echo.set_feedback(0.0);
        echo.set_mix(1.0);
        echo.set_time_ms(time_ms);
        let len = echo.delay_length();

        for (n, &x) in input.iter().enumerate() {
            let y = echo.process(x);
            let expected = if n >= len { input[n - len] } else { 0.0 };
            prop_assert_eq!(y, expected);
        }
    }

    /// Echo parameters always land inside their ranges, and the ring index
    /// stays inside the active length.
    #[test]
    fn echo_parameters_clamped(
        time_ms in -1000.0f32..5000.0f32,
        feedback in -2.0f32..2.0f32,
        mix in -2.0f32..2.0f32,
        steps in 0usize..3000,
    ) {
        let mut echo: EchoEffect<2048> = EchoEffect::new(44100.0);
        echo.set_enabled(true);
        for _ in 0..steps {
            echo.process(0.5);
        }
        echo.set_time_ms(time_ms);
        echo.set_feedback(feedback);
        echo.set_mix(mix);

        prop_assert!((MIN_ECHO_TIME_MS..=MAX_ECHO_TIME_MS).contains(&echo.time_ms()));
        prop_assert!((0.0..=MAX_ECHO_FEEDBACK).contains(&echo.feedback()));
        prop_assert!((0.0..=1.0).contains(&echo.mix()));
        prop_assert!(echo.delay_length() >= 1 && echo.delay_length() < 2048);
        prop_assert!(echo.index() < echo.delay_length());
    }

    /// Bounded input through maximum feedback stays finite and bounded by
    /// the geometric series `1 / (1 - fb)`.
    #[test]
    fn echo_feedback_stable(input in prop::array::uniform32(-1.0f32..=1.0f32)) {
        let mut echo: EchoEffect<64> = EchoEffect::new(1000.0);
        echo.set_enabled(true);
        echo.set_feedback(1.0);
        echo.set_mix(1.0);
        let bound = 1.0 / (1.0 - MAX_ECHO_FEEDBACK) + 1e-3;
        for _ in 0..100 {
            for &x in &input {
                let y = echo.process(x);
                prop_assert!(y.is_finite() && y.abs() <= bound, "{}", y);
            }
        }
    }

    /// The one-pole output never leaves the hull of its inputs.
    #[test]
    fn one_pole_bounded(a in 0.0f32..=1.0f32, input in prop::array::uniform32(-1.0f32..=1.0f32)) {
        let mut lp = OnePole::from_coefficient(a);
        for &x in &input {
            let y = lp.process(x);
            prop_assert!(y.abs() <= 1.0 + 1e-6, "{}", y);
        }
    }

    /// The output stage never wraps: any finite input quantizes inside the
    /// symmetric 16-bit range.
    #[test]
    fn output_stage_in_range(x in -1.0e6f32..1.0e6f32) {
        let s = to_i16(hard_clip(soft_clip(x), 1.0));
        prop_assert!((-32767..=32767).contains(&s));
        if x.abs() >= 1e-4 {
            prop_assert_eq!(s.signum(), x.signum() as i16);
        }
    }

    /// LCG samples stay in `[0, 1)` for any seed.
    #[test]
    fn lcg_unit_interval(seed in any::<u32>()) {
        let mut rng = Lcg::new(seed);
        for _ in 0..256 {
            let u = rng.next_f32();
            prop_assert!((0.0..1.0).contains(&u));
        }
    }
}
