//=========================================================================
// Core Systems
//
// Engine subsystems driven by the game loop in `Game`.
//
// Layout:
// - clock:     frame / fixed-step timing and statistics
// - state:     game state lifecycle trait and transition requests
// - context:   shared data handed to every state callback
// - assets:    keyed resource cache with state-scoped eviction
// - input:     event-fed input snapshots for frames and fixed ticks
// - coroutine: cooperative per-frame tasks owned by the current state
// - tween:     easing curves and time-based interpolated values
// - events:    loop notifications for external listeners
// - render:    renderer abstraction, default fonts, debug overlay
// - error:     engine error type
//
//=========================================================================

pub mod assets;
pub mod clock;
pub mod context;
pub mod coroutine;
pub mod error;
pub mod events;
pub mod input;
pub mod render;
pub mod state;
pub mod tween;
