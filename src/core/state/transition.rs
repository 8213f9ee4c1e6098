//=========================================================================
// State Transitions
//=========================================================================
//
// States request transitions during their callbacks. The loop driver
// applies the request as soon as the requesting callback returns.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::warn;

//=== Internal Dependencies ===============================================

use super::GameState;

//=== StateTransition =====================================================

/// A requested change of the current state.
pub enum StateTransition {
    /// Replace the current state with a new one.
    Replace(Box<dyn GameState>),

    /// Leave the current state without a successor.
    Clear,
}

impl StateTransition {
    /// The state that becomes current once applied.
    pub fn into_next(self) -> Option<Box<dyn GameState>> {
        match self {
            Self::Replace(state) => Some(state),
            Self::Clear => None,
        }
    }
}

impl fmt::Debug for StateTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(state) => f.debug_tuple("Replace").field(&state.name()).finish(),
            Self::Clear => f.write_str("Clear"),
        }
    }
}

//=== PendingTransition ===================================================

/// Single-slot request holder. The latest request wins.
#[derive(Debug, Default)]
pub(crate) struct PendingTransition {
    slot: Option<StateTransition>,
}

impl PendingTransition {
    pub(crate) fn new() -> Self {
        Self { slot: None }
    }

    pub(crate) fn request(&mut self, transition: StateTransition) {
        if let Some(previous) = self.slot.replace(transition) {
            warn!("Pending transition {:?} was overwritten before being applied", previous);
        }
    }

    pub(crate) fn take(&mut self) -> Option<StateTransition> {
        self.slot.take()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.slot.is_some()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Named;
    impl GameState for Named {
        fn name(&self) -> &'static str {
            "named"
        }
    }

    #[test]
    fn empty_slot_takes_nothing() {
        let mut pending = PendingTransition::new();
        assert!(!pending.is_pending());
        assert!(pending.take().is_none());
    }

    #[test]
    fn latest_request_wins() {
        let mut pending = PendingTransition::new();
        pending.request(StateTransition::Replace(Box::new(Named)));
        pending.request(StateTransition::Clear);

        let taken = pending.take().expect("a transition was requested");
        assert!(matches!(taken, StateTransition::Clear));
        assert!(!pending.is_pending());
    }

    #[test]
    fn replace_yields_next_state() {
        let next = StateTransition::Replace(Box::new(Named)).into_next();
        assert_eq!(next.map(|s| s.name()), Some("named"));
        assert!(StateTransition::Clear.into_next().is_none());
    }
}
