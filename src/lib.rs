//=========================================================================
// Cadence Engine - Library Root
//
// A 2D game engine core. The host application owns the window, the
// renderer backend and the frame pacing; it calls into `Game` once per
// frame and the engine runs the rest.
//
// Responsibilities:
// - Drive variable-rate updates and fixed-rate catch-up steps
// - Own the active game state and apply requested transitions
// - Cache assets and release state-scoped ones on every state change
// - Schedule coroutines and feed input snapshots to states
//
// Typical usage:
// ```no_run
// use cadence_engine::prelude::*;
//
// let mut game = GameBuilder::new().with_asset_directory("assets").build();
// game.start()?;
// loop {
//     game.update(host_clock_seconds())?;
//     game.draw(&mut renderer, Vec2::new(1280.0, 720.0))?;
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the engine subsystems. Most applications only need the
// prelude.
//
pub mod core;
pub mod prelude;

//--- Platform Adapter ----------------------------------------------------
//
// `platform` converts winit window events into engine input events for
// hosts that use winit.
//
pub mod platform;

//--- Internal Modules ----------------------------------------------------

mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Game, GameBuilder};
