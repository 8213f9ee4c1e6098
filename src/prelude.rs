//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use cadence_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Game, GameBuilder};
pub use crate::core::clock::{FrameStats, GameTime};
pub use crate::core::context::GameContext;
pub use crate::core::error::{GameError, StateResult};

// State lifecycle
pub use crate::core::state::{GameState, StateId, StateInfo, StateTransition};

// Loop events
pub use crate::core::events::{GameEvent, ListenerId};

// Assets
pub use crate::core::assets::{
    AssetError, AssetSource, AssetsManager, DirectorySource, Font, MemorySource, Music, ResourceFactory,
    Shader, Sound, Texture,
};

// Input system
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

// Coroutines
pub use crate::core::coroutine::{CoroutineManager, CoroutineOperation, Sequence, Step, Wait};

// Tweening
pub use crate::core::tween::{Easing, TweenedDouble, TweenedRect, TweenedVector2};

// Rendering
pub use crate::core::render::{Color, DebugOverlay, FontStyle, Rect, Renderer, Vec2};
