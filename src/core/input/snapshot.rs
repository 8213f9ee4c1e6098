//=========================================================================
// Input Snapshot
//=========================================================================
//
// Immutable picture of device state at one instant. The input manager
// keeps a live snapshot that events are folded into, and copies it into
// the frame and fixed-tick pairs.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};
use crate::core::render::Vec2;

//=== InputSnapshot =======================================================

/// Device state at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: Vec2,
    scroll_total: f32,
    modifiers: Modifiers,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event into the snapshot.
    pub fn apply(&mut self, event: &InputEvent) {
        if let Some(modifiers) = event.modifiers() {
            self.modifiers = modifiers;
        }

        match *event {
            InputEvent::KeyDown { key, .. } => {
                self.keys_down.insert(key);
            }
            InputEvent::KeyUp { key, .. } => {
                self.keys_down.remove(&key);
            }
            InputEvent::MouseButtonDown { button, .. } => {
                self.buttons_down.insert(button);
            }
            InputEvent::MouseButtonUp { button, .. } => {
                self.buttons_down.remove(&button);
            }
            InputEvent::MouseMoved { x, y } => self.mouse_position = Vec2::new(x, y),
            InputEvent::MouseScrolled { delta } => self.scroll_total += delta,
            InputEvent::ModifiersChanged(_) => {}
            InputEvent::FocusLost => {
                self.keys_down.clear();
                self.buttons_down.clear();
                self.modifiers = Modifiers::NONE;
            }
        }
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Cumulative wheel position since the game started.
    pub fn scroll_total(&self) -> f32 {
        self.scroll_total
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn keys_down(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_down.iter().copied()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_events_toggle_held_state() {
        let mut snapshot = InputSnapshot::new();
        snapshot.apply(&InputEvent::KeyDown {
            key: KeyCode::KeyW,
            modifiers: Modifiers::SHIFT,
        });
        assert!(snapshot.is_key_down(KeyCode::KeyW));
        assert_eq!(snapshot.modifiers(), Modifiers::SHIFT);

        snapshot.apply(&InputEvent::KeyUp {
            key: KeyCode::KeyW,
            modifiers: Modifiers::NONE,
        });
        assert!(!snapshot.is_key_down(KeyCode::KeyW));
        assert!(snapshot.modifiers().is_empty());
    }

    #[test]
    fn scroll_accumulates() {
        let mut snapshot = InputSnapshot::new();
        snapshot.apply(&InputEvent::MouseScrolled { delta: 1.0 });
        snapshot.apply(&InputEvent::MouseScrolled { delta: 2.0 });
        assert_eq!(snapshot.scroll_total(), 3.0);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut snapshot = InputSnapshot::new();
        snapshot.apply(&InputEvent::KeyDown {
            key: KeyCode::Space,
            modifiers: Modifiers::CTRL,
        });
        snapshot.apply(&InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            modifiers: Modifiers::CTRL,
        });
        snapshot.apply(&InputEvent::MouseMoved { x: 4.0, y: 5.0 });

        snapshot.apply(&InputEvent::FocusLost);

        assert_eq!(snapshot.keys_down().count(), 0);
        assert!(!snapshot.is_button_down(MouseButton::Left));
        assert!(snapshot.modifiers().is_empty());
        assert_eq!(snapshot.mouse_position(), Vec2::new(4.0, 5.0));
    }
}
