use std::collections::HashSet;

use super::types::{InputEvent, MouseButton, MouseButtonState};

/// Current input state for the window.
///
/// Holds held mouse buttons and the current pointer position, which is what a
/// drag needs. Keys act on press and are not tracked.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match *ev {
            InputEvent::Focused(f) => {
                if !f {
                    // Avoid stuck buttons when focus changes mid-press.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some((x, y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { .. } => {}

            InputEvent::PointerButton { button, state } => match state {
                MouseButtonState::Pressed => {
                    self.buttons_down.insert(button);
                }
                MouseButtonState::Released => {
                    self.buttons_down.remove(&button);
                }
            },
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left(state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton { button: MouseButton::Left, state }
    }

    #[test]
    fn press_then_release() {
        let mut st = InputState::default();
        st.apply_event(&left(MouseButtonState::Pressed));
        assert!(st.button_down(MouseButton::Left));
        assert!(!st.button_down(MouseButton::Right));
        st.apply_event(&left(MouseButtonState::Released));
        assert!(!st.button_down(MouseButton::Left));
    }

    #[test]
    fn focus_loss_clears_held() {
        let mut st = InputState::default();
        st.apply_event(&left(MouseButtonState::Pressed));
        st.apply_event(&InputEvent::Focused(true));
        assert!(st.button_down(MouseButton::Left));
        st.apply_event(&InputEvent::Focused(false));
        assert!(!st.button_down(MouseButton::Left));
    }

    #[test]
    fn pointer_tracks_and_leaves() {
        let mut st = InputState::default();
        st.apply_event(&InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        assert_eq!(st.pointer_pos, Some((3.0, 4.0)));
        st.apply_event(&InputEvent::PointerLeft);
        assert_eq!(st.pointer_pos, None);
    }
}
