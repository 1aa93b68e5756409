use crate::anim::{RATE_DEFAULT, RATE_MAX, RATE_MIN};

use super::state::InputState;
use super::types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState};

/// Speed slider without a widget: keyboard steps and a full-window drag track.
///
/// - ArrowUp / ArrowRight / `+` step up, ArrowDown / ArrowLeft / `-` step down
/// - `1`, `2`, `3` jump to that multiplier
/// - dragging with the left button maps the pointer's x across the window width
///   onto `[min, max]`
///
/// `handle` returns the new value whenever it changed; the caller forwards it to
/// the rate controller.
#[derive(Debug, Clone)]
pub struct RateSlider {
    /// Current value (clamped to [min, max]).
    value: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl RateSlider {
    pub fn new() -> Self {
        Self {
            value: RATE_DEFAULT,
            min: RATE_MIN,
            max: RATE_MAX,
            step: 0.1,
        }
    }

    pub fn value(mut self, v: f32) -> Self {
        self.value = v.clamp(self.min, self.max);
        self
    }

    pub fn current(&self) -> f32 {
        self.value
    }

    /// Value under horizontal position `x` on a track `width` pixels wide.
    pub fn value_at(&self, x: f32, width: f32) -> f32 {
        if width <= 0.0 {
            return self.value;
        }
        let t = (x / width).clamp(0.0, 1.0);
        self.snap(self.min + t * (self.max - self.min))
    }

    /// Feeds one input event. `input` must already reflect `event`.
    pub fn handle(&mut self, event: &InputEvent, input: &InputState, width: f32) -> Option<f32> {
        let next = match *event {
            InputEvent::Key { key, state: KeyState::Pressed, .. } => match key {
                Key::ArrowUp | Key::ArrowRight | Key::Plus => self.snap(self.value + self.step),
                Key::ArrowDown | Key::ArrowLeft | Key::Minus => self.snap(self.value - self.step),
                Key::Digit1 => 1.0,
                Key::Digit2 => 2.0,
                Key::Digit3 => 3.0,
                _ => return None,
            },

            InputEvent::PointerButton {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
            } => {
                let (x, _) = input.pointer_pos?;
                self.value_at(x, width)
            }

            InputEvent::PointerMoved { x, .. } if input.button_down(MouseButton::Left) => {
                self.value_at(x, width)
            }

            _ => return None,
        };

        let next = next.clamp(self.min, self.max);
        if next == self.value {
            return None;
        }
        self.value = next;
        Some(next)
    }

    /// Rounds to the nearest step so repeated stepping does not accumulate error.
    fn snap(&self, v: f32) -> f32 {
        ((v / self.step).round() * self.step).clamp(self.min, self.max)
    }
}

impl Default for RateSlider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, repeat: false }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    #[test]
    fn arrow_steps() {
        let input = InputState::default();
        let mut slider = RateSlider::new();

        let up = slider.handle(&press(Key::ArrowUp), &input, 100.0).unwrap();
        assert!(close(up, 1.1));

        slider.handle(&press(Key::ArrowDown), &input, 100.0);
        slider.handle(&press(Key::Minus), &input, 100.0);
        assert!(close(slider.current(), 0.9));
    }

    #[test]
    fn stepping_stops_at_bounds() {
        let input = InputState::default();
        let mut slider = RateSlider::new().value(2.95);

        assert_eq!(slider.handle(&press(Key::ArrowUp), &input, 100.0), Some(3.0));
        assert_eq!(slider.handle(&press(Key::ArrowUp), &input, 100.0), None);

        let mut slider = RateSlider::new().value(0.1);
        assert_eq!(slider.handle(&press(Key::ArrowDown), &input, 100.0), None);
    }

    #[test]
    fn digits_jump() {
        let input = InputState::default();
        let mut slider = RateSlider::new();
        assert_eq!(slider.handle(&press(Key::Digit3), &input, 100.0), Some(3.0));
        assert_eq!(slider.handle(&press(Key::Digit1), &input, 100.0), Some(1.0));
        assert_eq!(slider.handle(&press(Key::Digit1), &input, 100.0), None);
    }

    #[test]
    fn release_and_other_keys_ignored() {
        let input = InputState::default();
        let mut slider = RateSlider::new();
        let release = InputEvent::Key {
            key: Key::ArrowUp,
            state: KeyState::Released,
            repeat: false,
        };
        assert_eq!(slider.handle(&release, &input, 100.0), None);
        assert_eq!(slider.handle(&press(Key::Space), &input, 100.0), None);
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn value_at_track_ends() {
        let slider = RateSlider::new();
        assert!(close(slider.value_at(0.0, 290.0), RATE_MIN));
        assert!(close(slider.value_at(290.0, 290.0), RATE_MAX));
        assert!(close(slider.value_at(-50.0, 290.0), RATE_MIN));
        assert!(close(slider.value_at(29.0, 290.0), 0.4));
    }

    #[test]
    fn drag_updates_only_while_held() {
        let mut input = InputState::default();
        let mut slider = RateSlider::new();

        let moved = InputEvent::PointerMoved { x: 290.0, y: 10.0 };
        input.apply_event(&moved);
        assert_eq!(slider.handle(&moved, &input, 290.0), None);

        let down = InputEvent::PointerButton {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
        };
        input.apply_event(&down);
        assert_eq!(slider.handle(&down, &input, 290.0), Some(3.0));

        let moved = InputEvent::PointerMoved { x: 0.0, y: 10.0 };
        input.apply_event(&moved);
        assert!(close(slider.handle(&moved, &input, 290.0).unwrap(), RATE_MIN));
    }

    #[test]
    fn zero_width_keeps_value() {
        let slider = RateSlider::new();
        assert_eq!(slider.value_at(10.0, 0.0), RATE_DEFAULT);
    }
}
