//=========================================================================
// Game Context
//=========================================================================
//
// Explicit context handed to every state callback. Gives states access to
// the engine's subsystems without a back-reference to the loop driver.
//
// Contains:
// - assets: keyed resource cache (swept on state change)
// - input: frame / fixed-tick input snapshots
// - coroutines: scheduler owned by the current state
// - clock snapshot, current state identity, transition request slot
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetsManager, Font};
use crate::core::clock::GameTime;
use crate::core::coroutine::CoroutineManager;
use crate::core::input::InputManager;
use crate::core::render::{DefaultFonts, FontStyle};
use crate::core::state::{GameState, PendingTransition, StateInfo, StateTransition};

//=== GameContext =========================================================

/// Shared engine data accessible to states.
pub struct GameContext {
    /// Resource cache. Entries loaded without the keep flag are released
    /// when the current state changes.
    pub assets: AssetsManager,

    /// Input queries for the current frame or fixed tick.
    pub input: InputManager,

    /// Coroutines of the current state. Replaced with an empty manager on
    /// every state change.
    pub coroutines: CoroutineManager,

    pub(crate) time: GameTime,
    pub(crate) current: Option<StateInfo>,
    pub(crate) pending: PendingTransition,
    pub(crate) default_fonts: DefaultFonts,
    pub(crate) fixed_updates_per_second: f64,
}

impl GameContext {
    pub(crate) fn new(assets: AssetsManager, default_fonts: DefaultFonts, fixed_updates_per_second: f64) -> Self {
        Self {
            assets,
            input: InputManager::new(),
            coroutines: CoroutineManager::new(),
            time: GameTime::default(),
            current: None,
            pending: PendingTransition::new(),
            default_fonts,
            fixed_updates_per_second,
        }
    }

    //--- Clock ------------------------------------------------------------

    pub fn time(&self) -> &GameTime {
        &self.time
    }

    pub fn fixed_updates_per_second(&self) -> f64 {
        self.fixed_updates_per_second
    }

    //--- Transitions ------------------------------------------------------

    /// Requests a switch to `state`. Applied by the loop driver as soon as
    /// the running callback returns.
    pub fn change_state(&mut self, state: impl GameState + 'static) {
        self.change_state_boxed(Box::new(state));
    }

    pub fn change_state_boxed(&mut self, state: Box<dyn GameState>) {
        self.pending.request(StateTransition::Replace(state));
    }

    /// Requests leaving the current state without a successor.
    pub fn clear_state(&mut self) {
        self.pending.request(StateTransition::Clear);
    }

    pub fn has_pending_transition(&self) -> bool {
        self.pending.is_pending()
    }

    /// Identity of the installed state, if any.
    pub fn state_info(&self) -> Option<StateInfo> {
        self.current
    }

    //--- Default Fonts ----------------------------------------------------

    pub fn default_fonts(&self) -> &DefaultFonts {
        &self.default_fonts
    }

    /// The default font for `style`, if configured and loaded.
    pub fn default_font(&self, style: FontStyle) -> Option<Rc<Font>> {
        self.default_fonts
            .name(style)
            .and_then(|name| self.assets.cached::<Font>(name))
    }
}
