//=========================================================================
// Input Manager
//=========================================================================
//
// Snapshot-based input queries for game states.
//
// Architecture:
//   platform ──InputEvent──> handle_event / channel sender
//                                 │
//                                 ▼
//                               live (InputSnapshot)
//          begin_frame ──copy──> current  (last ← previous current)
//   begin_fixed_update ──copy──> fixed    (fixed_last ← previous fixed)
//
// Queries answer from the frame pair, or from the fixed-tick pair while
// `fixed_update_mode` is set. "Pressed" means down in the newer snapshot
// and up in the older one.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::render::Vec2;

//=== Module Declarations =================================================

mod event;
mod snapshot;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use snapshot::InputSnapshot;

//=== InputManager ========================================================

/// Per-frame and per-fixed-tick input state.
#[derive(Debug)]
pub struct InputManager {
    live: InputSnapshot,
    current: InputSnapshot,
    last: InputSnapshot,
    fixed_current: InputSnapshot,
    fixed_last: InputSnapshot,

    /// Set by the loop driver while fixed updates run.
    pub fixed_update_mode: bool,

    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            live: InputSnapshot::default(),
            current: InputSnapshot::default(),
            last: InputSnapshot::default(),
            fixed_current: InputSnapshot::default(),
            fixed_last: InputSnapshot::default(),
            fixed_update_mode: false,
            sender,
            receiver,
        }
    }

    //--- Feeding ----------------------------------------------------------

    /// Sender for events produced off the game thread.
    pub fn sender(&self) -> Sender<InputEvent> {
        self.sender.clone()
    }

    /// Folds an event into the live snapshot.
    pub fn handle_event(&mut self, event: InputEvent) {
        self.live.apply(&event);
    }

    fn drain_channel(&mut self) {
        let mut drained = 0usize;
        for event in self.receiver.try_iter() {
            self.live.apply(&event);
            drained += 1;
        }
        if drained > 0 {
            trace!("Drained {} queued input event(s)", drained);
        }
    }

    //--- Snapshot Rotation ------------------------------------------------

    /// Rotates the frame pair. Called once per frame before `update`.
    pub fn begin_frame(&mut self) {
        self.drain_channel();
        self.last = std::mem::replace(&mut self.current, self.live.clone());
    }

    /// Rotates the fixed-tick pair and switches queries to it.
    pub fn begin_fixed_update(&mut self) {
        self.fixed_last = std::mem::replace(&mut self.fixed_current, self.live.clone());
        self.fixed_update_mode = true;
    }

    pub fn end_fixed_update(&mut self) {
        self.fixed_update_mode = false;
    }

    //--- Queries ----------------------------------------------------------

    /// `(newer, older)` snapshots for the calling context.
    fn pair(&self) -> (&InputSnapshot, &InputSnapshot) {
        if self.fixed_update_mode {
            (&self.fixed_current, &self.fixed_last)
        } else {
            (&self.current, &self.last)
        }
    }

    pub fn current(&self) -> &InputSnapshot {
        self.pair().0
    }

    pub fn previous(&self) -> &InputSnapshot {
        self.pair().1
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.current().is_key_down(key)
    }

    pub fn key_pressed(&self, key: KeyCode) -> bool {
        let (now, before) = self.pair();
        now.is_key_down(key) && !before.is_key_down(key)
    }

    pub fn key_released(&self, key: KeyCode) -> bool {
        let (now, before) = self.pair();
        !now.is_key_down(key) && before.is_key_down(key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.current().is_button_down(button)
    }

    pub fn button_pressed(&self, button: MouseButton) -> bool {
        let (now, before) = self.pair();
        now.is_button_down(button) && !before.is_button_down(button)
    }

    pub fn button_released(&self, button: MouseButton) -> bool {
        let (now, before) = self.pair();
        !now.is_button_down(button) && before.is_button_down(button)
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.current().mouse_position()
    }

    pub fn mouse_delta(&self) -> Vec2 {
        let (now, before) = self.pair();
        now.mouse_position() - before.mouse_position()
    }

    /// Wheel notches scrolled between the two snapshots.
    pub fn scroll_delta(&self) -> f32 {
        let (now, before) = self.pair();
        now.scroll_total() - before.scroll_total()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.current().modifiers()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
