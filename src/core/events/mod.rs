//=========================================================================
// Event System
//=========================================================================
//
// Before/after notifications around every loop phase plus state changes.
//
//=========================================================================

//=== Module Declarations =================================================

mod dispatcher;
mod event;

//=== Public API ==========================================================

pub use dispatcher::{EventDispatcher, ListenerId};
pub use event::GameEvent;
