//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit window events into engine InputEvents.
//
// Architecture:
//   winit WindowEvent → InputProcessor → InputEvent → Game::handle_input
//                                                   ↘ input_sender()
//
// Stateful modifier tracking: caches modifier state from ModifiersChanged
// events and stamps it on every subsequent key and button event. Unmapped
// keys (F13-F24, media keys) are filtered out.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== Constants ===========================================================

/// Pixel-precise scroll deltas are reported in notches of this size.
const PIXELS_PER_SCROLL_LINE: f32 = 120.0;

//=== InputProcessor ======================================================

/// Converts winit events to engine input events.
///
/// ```no_run
/// # use cadence_engine::platform::InputProcessor;
/// # use cadence_engine::Game;
/// # fn on_window_event(game: &mut Game, processor: &mut InputProcessor, event: &winit::event::WindowEvent) {
/// if let Some(input) = processor.process_window_event(event) {
///     game.handle_input(input);
/// }
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InputProcessor {
    current_modifiers: Modifiers,
}

impl InputProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    /// Converts one window event. Returns `None` for events that carry no
    /// input (resize, redraw) and for unmapped keys.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => Some(self.update_modifiers(modifiers.state())),
            WindowEvent::KeyboardInput { event, .. } => self.process_key_event(event),
            WindowEvent::MouseInput { state, button, .. } => Some(self.process_mouse_button(*button, *state)),
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.process_mouse_move(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseWheel { delta, .. } => Some(self.process_scroll(*delta)),
            WindowEvent::Focused(false) => {
                self.current_modifiers = Modifiers::NONE;
                Some(InputEvent::FocusLost)
            }
            _ => None,
        }
    }

    //--- Individual Conversions -------------------------------------------

    /// Caches the new modifier state and reports it.
    pub fn update_modifiers(&mut self, state: ModifiersState) -> InputEvent {
        self.current_modifiers = Modifiers::from(state);
        trace!("Modifiers changed: {:?}", self.current_modifiers);
        InputEvent::ModifiersChanged(self.current_modifiers)
    }

    pub fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.process_key(key_event.physical_key, key_event.state)
    }

    pub fn process_key(&self, physical_key: PhysicalKey, state: ElementState) -> Option<InputEvent> {
        let key = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };
        if key == KeyCode::Unidentified {
            trace!("Unmapped key ignored: {:?}", physical_key);
            return None;
        }

        let modifiers = self.current_modifiers;
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        })
    }

    pub fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        let modifiers = self.current_modifiers;
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }

    pub fn process_mouse_move(&self, x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    pub fn process_scroll(&self, delta: MouseScrollDelta) -> InputEvent {
        let delta = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_SCROLL_LINE,
        };
        InputEvent::MouseScrolled { delta }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// winit already maps macOS Cmd → Ctrl and Option → Alt.
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            //--- Digits -------------------------------------------------------
            W::Digit0 => KeyCode::Digit0,
            W::Digit1 => KeyCode::Digit1,
            W::Digit2 => KeyCode::Digit2,
            W::Digit3 => KeyCode::Digit3,
            W::Digit4 => KeyCode::Digit4,
            W::Digit5 => KeyCode::Digit5,
            W::Digit6 => KeyCode::Digit6,
            W::Digit7 => KeyCode::Digit7,
            W::Digit8 => KeyCode::Digit8,
            W::Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------
            W::KeyA => KeyCode::KeyA,
            W::KeyB => KeyCode::KeyB,
            W::KeyC => KeyCode::KeyC,
            W::KeyD => KeyCode::KeyD,
            W::KeyE => KeyCode::KeyE,
            W::KeyF => KeyCode::KeyF,
            W::KeyG => KeyCode::KeyG,
            W::KeyH => KeyCode::KeyH,
            W::KeyI => KeyCode::KeyI,
            W::KeyJ => KeyCode::KeyJ,
            W::KeyK => KeyCode::KeyK,
            W::KeyL => KeyCode::KeyL,
            W::KeyM => KeyCode::KeyM,
            W::KeyN => KeyCode::KeyN,
            W::KeyO => KeyCode::KeyO,
            W::KeyP => KeyCode::KeyP,
            W::KeyQ => KeyCode::KeyQ,
            W::KeyR => KeyCode::KeyR,
            W::KeyS => KeyCode::KeyS,
            W::KeyT => KeyCode::KeyT,
            W::KeyU => KeyCode::KeyU,
            W::KeyV => KeyCode::KeyV,
            W::KeyW => KeyCode::KeyW,
            W::KeyX => KeyCode::KeyX,
            W::KeyY => KeyCode::KeyY,
            W::KeyZ => KeyCode::KeyZ,

            //--- Function keys ------------------------------------------------
            W::F1 => KeyCode::F1,
            W::F2 => KeyCode::F2,
            W::F3 => KeyCode::F3,
            W::F4 => KeyCode::F4,
            W::F5 => KeyCode::F5,
            W::F6 => KeyCode::F6,
            W::F7 => KeyCode::F7,
            W::F8 => KeyCode::F8,
            W::F9 => KeyCode::F9,
            W::F10 => KeyCode::F10,
            W::F11 => KeyCode::F11,
            W::F12 => KeyCode::F12,

            //--- Arrows -------------------------------------------------------
            W::ArrowUp => KeyCode::ArrowUp,
            W::ArrowDown => KeyCode::ArrowDown,
            W::ArrowLeft => KeyCode::ArrowLeft,
            W::ArrowRight => KeyCode::ArrowRight,

            //--- Modifiers ----------------------------------------------------
            W::ShiftLeft => KeyCode::ShiftLeft,
            W::ShiftRight => KeyCode::ShiftRight,
            W::ControlLeft => KeyCode::ControlLeft,
            W::ControlRight => KeyCode::ControlRight,
            W::AltLeft => KeyCode::AltLeft,
            W::AltRight => KeyCode::AltRight,

            //--- Special ------------------------------------------------------
            W::Space => KeyCode::Space,
            W::Enter => KeyCode::Enter,
            W::Escape => KeyCode::Escape,
            W::Tab => KeyCode::Tab,
            W::Backspace => KeyCode::Backspace,
            W::Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            WinitMouseButton::Back => MouseButton::Back,
            WinitMouseButton::Forward => MouseButton::Forward,
            WinitMouseButton::Other(index) => MouseButton::Other(index),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
