//=========================================================================
// Coroutine Operations
//=========================================================================
//
// What a coroutine blocks on between steps. The manager re-polls
// `completed` on every advance instead of suspending anything.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::clock::GameTime;

//=== CoroutineOperation Trait ============================================

/// A pollable wait condition yielded by a coroutine.
pub trait CoroutineOperation {
    /// Called once when the manager receives the operation.
    fn start(&mut self, _time: &GameTime) {}

    /// Whether the coroutine may continue.
    fn completed(&self, time: &GameTime) -> bool;
}

//=== Wait ================================================================

const FRAME_SENTINEL: f64 = -1.0;

/// Time-based wait keyed off the game clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wait {
    duration: f64,
    deadline: Option<f64>,
}

impl Wait {
    /// Waits `seconds` from the moment the operation is yielded.
    ///
    /// Non-positive and NaN durations complete on the next poll.
    pub fn seconds(seconds: f64) -> Self {
        Self {
            duration: if seconds > 0.0 { seconds } else { 0.0 },
            deadline: None,
        }
    }

    /// Continues on the next advance.
    pub fn frame() -> Self {
        Self {
            duration: FRAME_SENTINEL,
            deadline: None,
        }
    }

    /// Waits until the game clock reaches `time`.
    pub fn until(time: f64) -> Self {
        Self {
            duration: 0.0,
            deadline: Some(time),
        }
    }

    pub fn is_frame(&self) -> bool {
        self.duration == FRAME_SENTINEL
    }

    /// Absolute completion time, once armed.
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }
}

impl CoroutineOperation for Wait {
    fn start(&mut self, time: &GameTime) {
        if self.deadline.is_none() && !self.is_frame() {
            self.deadline = Some(time.time + self.duration);
        }
    }

    fn completed(&self, time: &GameTime) -> bool {
        if self.is_frame() {
            return true;
        }
        self.deadline.is_some_and(|deadline| time.time >= deadline)
    }
}

//=========================================================================
// Tests
//=========================================================================
