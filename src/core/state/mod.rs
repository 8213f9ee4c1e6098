//=========================================================================
// Game State System
//=========================================================================
//
// Mutually exclusive modes of game behavior (menu, gameplay, ...).
//
// Architecture:
//   Game
//     ├─ state: Option<Box<dyn GameState>>   (exactly one current, or none)
//     └─ context: GameContext                (passed to every callback)
//
// Lifecycle:
//   on_enter → { update → fixed_update* → draw }* → on_leave
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::error::StateResult;
use crate::core::render::{Renderer, Vec2};

//=== Module Declarations =================================================

mod transition;

//=== Public API ==========================================================

pub use transition::StateTransition;
pub(crate) use transition::PendingTransition;

//=== StateId =============================================================

/// Identity of one installation of a state.
///
/// Assigned by the loop driver when a state is installed; a state that is
/// removed and installed again gets a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) u64);

impl StateId {
    pub fn get(self) -> u64 {
        self.0
    }
}

//=== StateInfo ===========================================================

/// Identity and name of an installed state, as seen by event listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    pub id: StateId,
    pub name: &'static str,
}

//=== GameState Trait =====================================================

/// Defines state behavior with lifecycle hooks and per-frame logic.
///
/// Every hook has a default no-op implementation, so a state overrides only
/// what it needs.
///
/// ```rust
/// # use cadence_engine::prelude::*;
/// struct Menu;
///
/// impl GameState for Menu {
///     fn update(&mut self, ctx: &mut GameContext, _dt: f64, _total: f64, _count: u64) -> StateResult {
///         if ctx.input.key_pressed(KeyCode::Enter) {
///             ctx.clear_state();
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait GameState {
    /// Human-readable name reported by loop events.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called once when the state becomes current.
    ///
    /// The state is already installed and `ctx.state_info()` reports it.
    fn on_enter(&mut self, _ctx: &mut GameContext, _previous: Option<&dyn GameState>) -> StateResult {
        Ok(())
    }

    /// Called once when the state is superseded, while it is still installed.
    fn on_leave(&mut self, _ctx: &mut GameContext, _next: Option<&dyn GameState>) -> StateResult {
        Ok(())
    }

    /// Called once every frame.
    ///
    /// `delta_time` and `total_time` are in seconds, `count` is the number
    /// of updates completed before this one.
    fn update(
        &mut self,
        _ctx: &mut GameContext,
        _delta_time: f64,
        _total_time: f64,
        _count: u64,
    ) -> StateResult {
        Ok(())
    }

    /// Called at the configured fixed rate.
    fn fixed_update(&mut self, _ctx: &mut GameContext, _count: u64) -> StateResult {
        Ok(())
    }

    /// Called once every frame to render. Receives a read-only context.
    fn draw(&mut self, _ctx: &GameContext, _renderer: &mut dyn Renderer, _screen_size: Vec2) -> StateResult {
        Ok(())
    }
}
