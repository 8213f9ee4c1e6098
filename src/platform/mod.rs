//=========================================================================
// Platform Adapter
//
// Bridges winit (OS-level window events) to the engine's input manager.
//
// The host owns the window and the event loop; the engine only needs the
// input each frame. Events are handed over either directly on the game
// thread or through the input channel when the window lives elsewhere:
// ```text
//  Host Event Loop                     Game Thread
//  ┌──────────────────────────┐       ┌───────────────────────┐
//  │  winit WindowEvent       │       │  Game::update(T)      │
//  │   ↓                      │       │   ↓                   │
//  │  InputProcessor          │       │  InputManager         │
//  │   ├─ converts keys/mouse │       │   ├─ drains channel   │
//  │   └─ tracks modifiers    │       │   └─ rotates snapshots│
//  │   ↓                      │       │                       │
//  │  Sender<InputEvent> ─────┼──────▶│                       │
//  └──────────────────────────┘       └───────────────────────┘
// ```
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== Public API ==========================================================

pub use input_processor::InputProcessor;
