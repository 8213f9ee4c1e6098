//=========================================================================
// Coroutine Manager
//=========================================================================
//
// Cooperative, externally stepped scheduler for multi-frame sequences.
//
// Architecture:
//   CoroutineManager
//     └─ active: Vec<ActiveCoroutine>
//          ├─ coroutine: Box<dyn Coroutine>            (resumable sequence)
//          └─ current: Option<Box<dyn CoroutineOperation>>  (blocking wait)
//
// advance(time, steps):
//   for each active coroutine, up to `steps` times:
//     current pending? ──yes──> stop for this coroutine
//     resume() → Next | Wait(op) | Done (removed)
//
// Each installed state gets its own manager. Dropping the manager is the
// only way to cancel; abandoned coroutines are not notified.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::clock::GameTime;

//=== Module Declarations =================================================

mod operation;

//=== Public API ==========================================================

pub use operation::{CoroutineOperation, Wait};

//=== Step ================================================================

/// Result of resuming a coroutine once.
pub enum Step {
    /// Continue on the next advance step.
    Next,

    /// Block until the operation reports completion.
    Wait(Box<dyn CoroutineOperation>),

    /// The sequence is exhausted.
    Done,
}

impl Step {
    pub fn wait(operation: impl CoroutineOperation + 'static) -> Self {
        Self::Wait(Box::new(operation))
    }
}

impl From<Wait> for Step {
    fn from(wait: Wait) -> Self {
        Self::wait(wait)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => f.write_str("Next"),
            Self::Wait(_) => f.write_str("Wait(..)"),
            Self::Done => f.write_str("Done"),
        }
    }
}

//=== Coroutine Trait =====================================================

/// A resumable sequence of operations.
///
/// Implemented for `FnMut(&GameTime) -> Step` closures, which makes small
/// state machines easy to write inline:
///
/// ```rust
/// # use cadence_engine::prelude::*;
/// let mut phase = 0;
/// let blink = move |_time: &GameTime| {
///     phase += 1;
///     match phase {
///         1 => Wait::seconds(0.5).into(),
///         2 => Step::Next,
///         _ => Step::Done,
///     }
/// };
/// let mut coroutines = CoroutineManager::new();
/// coroutines.start(|| blink);
/// ```
pub trait Coroutine {
    fn resume(&mut self, time: &GameTime) -> Step;
}

impl<F> Coroutine for F
where
    F: FnMut(&GameTime) -> Step,
{
    fn resume(&mut self, time: &GameTime) -> Step {
        self(time)
    }
}

//=== Sequence ============================================================

/// Adapts a lazy iterator of steps into a coroutine.
///
/// The sequence ends when the iterator does, or at an explicit `Step::Done`.
pub struct Sequence<I> {
    steps: I,
}

impl<I: Iterator<Item = Step>> Sequence<I> {
    pub fn new(steps: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            steps: steps.into_iter(),
        }
    }
}

impl<I: Iterator<Item = Step>> Coroutine for Sequence<I> {
    fn resume(&mut self, _time: &GameTime) -> Step {
        self.steps.next().unwrap_or(Step::Done)
    }
}

//=== CoroutineId =========================================================

/// Handle returned when a coroutine is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoroutineId(u64);

//=== CoroutineManager ====================================================

struct ActiveCoroutine {
    id: CoroutineId,
    coroutine: Box<dyn Coroutine>,
    current: Option<Box<dyn CoroutineOperation>>,
}

/// Per-state scheduler for active coroutines.
#[derive(Default)]
pub struct CoroutineManager {
    active: Vec<ActiveCoroutine>,
    next_id: u64,
}

impl CoroutineManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `factory` once and registers the coroutine it returns.
    pub fn start<C, F>(&mut self, factory: F) -> CoroutineId
    where
        C: Coroutine + 'static,
        F: FnOnce() -> C,
    {
        self.add_existing(factory())
    }

    /// Registers an already constructed coroutine.
    pub fn add_existing(&mut self, coroutine: impl Coroutine + 'static) -> CoroutineId {
        self.next_id += 1;
        let id = CoroutineId(self.next_id);
        self.active.push(ActiveCoroutine {
            id,
            coroutine: Box::new(coroutine),
            current: None,
        });
        trace!("Started coroutine {:?}", id);
        id
    }

    /// Advances every active coroutine by up to `steps` resumptions.
    ///
    /// A coroutine stops early while its current operation is incomplete,
    /// and is removed as soon as its sequence is exhausted.
    pub fn advance(&mut self, time: &GameTime, steps: u32) {
        self.active.retain_mut(|active| {
            for _ in 0..steps {
                if let Some(operation) = &active.current {
                    if !operation.completed(time) {
                        return true;
                    }
                }

                match active.coroutine.resume(time) {
                    Step::Next => active.current = None,
                    Step::Wait(mut operation) => {
                        operation.start(time);
                        active.current = Some(operation);
                    }
                    Step::Done => {
                        debug!("Coroutine {:?} finished", active.id);
                        return false;
                    }
                }
            }
            true
        });
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, id: CoroutineId) -> bool {
        self.active.iter().any(|active| active.id == id)
    }
}

impl fmt::Debug for CoroutineManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoroutineManager")
            .field("active", &self.active.len())
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================
