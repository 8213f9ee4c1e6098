//=========================================================================
// Game Events
//=========================================================================
//
// Notifications fired by the loop driver around each phase.
//
// Firing order within one frame:
// ```text
//   BeforeUpdate → (state update, coroutines) → AfterUpdate
//   { BeforeFixedUpdate → (state fixed update) → AfterFixedUpdate }*
// ```
// StateChanged fires between the old state's on_leave and the new state's
// on_enter.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::state::StateInfo;

//=== GameEvent ===========================================================

/// Notification emitted by [`Game`](crate::Game).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Once per frame, before the current state updates.
    ///
    /// `count` is the number of updates completed before this one.
    BeforeUpdate {
        delta_time: f64,
        total_time: f64,
        count: u64,
    },

    /// Once per frame, after the current state updated.
    ///
    /// `count` already includes this update.
    AfterUpdate {
        delta_time: f64,
        total_time: f64,
        count: u64,
    },

    /// Before each fixed update.
    BeforeFixedUpdate { count: u64 },

    /// After each fixed update; `count` already includes it.
    AfterFixedUpdate { count: u64 },

    /// The current state is being replaced. Either side may be empty.
    StateChanged {
        from: Option<StateInfo>,
        to: Option<StateInfo>,
    },
}

impl GameEvent {
    /// Short label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BeforeUpdate { .. } => "before-update",
            Self::AfterUpdate { .. } => "after-update",
            Self::BeforeFixedUpdate { .. } => "before-fixed-update",
            Self::AfterFixedUpdate { .. } => "after-fixed-update",
            Self::StateChanged { .. } => "state-changed",
        }
    }
}
