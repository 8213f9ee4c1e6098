//=========================================================================
// Input Event Types
//=========================================================================
//
// Engine-side representation of low-level input, independent of the
// windowing backend that produced it.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputManager (live snapshot → frame / fixed-tick snapshots)
//         ↓
//    GameState queries (held / pressed / released)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,

    /// Any other button, by backend index.
    Other(u16),
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the key location, not the character produced, so `KeyA` is
/// the same physical key on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Keys ----------------------------------------------------
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Modifier Keys ----------------------------------------------------
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Key the backend reported but this enum does not cover.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state. Left and right variants are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Cursor moved. Screen space, pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },

    /// Wheel scrolled. Positive `delta` scrolls up, in notches.
    MouseScrolled { delta: f32 },

    /// Modifier state changed without a key event.
    ModifiersChanged(Modifiers),

    /// Window lost focus; everything held is considered released.
    FocusLost,
}

impl InputEvent {
    /// Modifier state carried by the event, if any.
    pub fn modifiers(&self) -> Option<Modifiers> {
        match self {
            Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. }
            | Self::ModifiersChanged(modifiers) => Some(*modifiers),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
