//! Debounced loop button.
//!
//! The raw level must hold for the debounce window before it is accepted.
//! Presses are reported on release, classified by how long the button was
//! held.

/// Default debounce window.
pub const DEFAULT_DEBOUNCE_MS: u32 = 30;
/// Default hold time for a long press.
pub const DEFAULT_LONG_PRESS_MS: u32 = 3000;

/// A classified press, reported on release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    /// Held for less than the long-press threshold.
    ShortPress,
    /// Held for at least the long-press threshold.
    LongPress,
}

/// Time-based debounce with short/long press detection.
///
/// Feed it the raw level (`true` = pressed) on every control-loop pass.
///
/// # Example
///
/// ```rust
/// use loopsynth_platform::{ButtonEvent, DebouncedButton};
///
/// let mut button = DebouncedButton::new();
/// assert_eq!(button.update(true, 1000), None);
/// assert_eq!(button.update(true, 1030), None); // press accepted
/// assert_eq!(button.update(false, 1200), None);
/// assert_eq!(button.update(false, 1230), Some(ButtonEvent::ShortPress));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DebouncedButton {
    debounce_ms: u32,
    long_press_ms: u32,
    stable: bool,
    last_raw: bool,
    last_change_ms: u32,
    press_start_ms: u32,
}

impl Default for DebouncedButton {
    fn default() -> Self {
        Self::new()
    }
}

impl DebouncedButton {
    /// A released button with default timing.
    pub const fn new() -> Self {
        Self::with_timing(DEFAULT_DEBOUNCE_MS, DEFAULT_LONG_PRESS_MS)
    }

    /// A released button with custom timing.
    pub const fn with_timing(debounce_ms: u32, long_press_ms: u32) -> Self {
        Self {
            debounce_ms,
            long_press_ms,
            stable: false,
            last_raw: false,
            last_change_ms: 0,
            press_start_ms: 0,
        }
    }

    /// Sample the raw level at `now_ms`.
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> Option<ButtonEvent> {
        if pressed != self.last_raw {
            self.last_raw = pressed;
            self.last_change_ms = now_ms;
        }

        if now_ms.wrapping_sub(self.last_change_ms) < self.debounce_ms || pressed == self.stable {
            return None;
        }

        self.stable = pressed;
        if pressed {
            self.press_start_ms = now_ms;
            return None;
        }

        let held = now_ms.wrapping_sub(self.press_start_ms);
        let event = if held >= self.long_press_ms {
            ButtonEvent::LongPress
        } else {
            ButtonEvent::ShortPress
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(held_ms = held, ?event, "button released");
        Some(event)
    }

    /// Debounced level.
    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Debounce window in milliseconds.
    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    /// Long-press threshold in milliseconds.
    pub fn long_press_ms(&self) -> u32 {
        self.long_press_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hold(button: &mut DebouncedButton, pressed: bool, from: u32, to: u32) -> Option<ButtonEvent> {
        let mut out = None;
        for t in from..=to {
            if let Some(e) = button.update(pressed, t) {
                assert!(out.is_none(), "one event per transition");
                out = Some(e);
            }
        }
        out
    }

    #[test]
    fn test_short_press() {
        let mut b = DebouncedButton::new();
        assert_eq!(hold(&mut b, true, 100, 400), None);
        assert!(b.is_pressed());
        assert_eq!(hold(&mut b, false, 401, 500), Some(ButtonEvent::ShortPress));
        assert!(!b.is_pressed());
    }

    #[test]
    fn test_long_press() {
        let mut b = DebouncedButton::new();
        assert_eq!(hold(&mut b, true, 100, 3200), None);
        assert_eq!(hold(&mut b, false, 3201, 3300), Some(ButtonEvent::LongPress));
    }

    #[test]
    fn test_threshold_measured_between_accepted_edges() {
        // Press accepted at 30, release accepted at 3030: held exactly 3000.
        let mut b = DebouncedButton::new();
        hold(&mut b, true, 0, 2999);
        assert_eq!(hold(&mut b, false, 3000, 3030), Some(ButtonEvent::LongPress));

        let mut b = DebouncedButton::new();
        hold(&mut b, true, 0, 2998);
        assert_eq!(hold(&mut b, false, 2999, 3029), Some(ButtonEvent::ShortPress));
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut b = DebouncedButton::new();
        // Chatter shorter than the window never settles.
        for t in 0..200u32 {
            assert_eq!(b.update(t % 20 < 10, t), None);
        }
        assert!(!b.is_pressed());
    }

    #[test]
    fn test_release_glitch_during_hold() {
        let mut b = DebouncedButton::new();
        hold(&mut b, true, 0, 100);
        // 10 ms dropout while held.
        assert_eq!(hold(&mut b, false, 101, 110), None);
        assert_eq!(hold(&mut b, true, 111, 500), None);
        assert!(b.is_pressed());
    }

    #[test]
    fn test_custom_timing_and_wrap() {
        let mut b = DebouncedButton::with_timing(5, 100);
        let start = u32::MAX - 20;
        assert_eq!(b.update(true, start), None);
        assert_eq!(b.update(true, start.wrapping_add(5)), None);
        assert!(b.is_pressed());
        assert_eq!(b.update(false, start.wrapping_add(200)), None);
        assert_eq!(
            b.update(false, start.wrapping_add(205)),
            Some(ButtonEvent::LongPress)
        );
    }
}
