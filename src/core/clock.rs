//=========================================================================
// Frame Clock
//=========================================================================
//
// Wall-time bookkeeping for the loop driver.
//
// Architecture:
//   host total time → begin_frame() → delta
//                   → accumulate(delta) → end_frame()
//                   → fixed_step_ready()/consume_fixed_step()
//
// The frame is closed before any fixed step runs, so a failing fixed update
// never makes the next frame count the same time again.
//
// The first frame seeds the previous timestamp with the current one so the
// very first delta is zero instead of "time since process start".
//
//=========================================================================

//=== GameTime ============================================================

/// Snapshot of the loop driver's clock, readable from every callback.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameTime {
    /// Seconds elapsed since the game started (monotonic, host supplied).
    pub time: f64,

    /// Seconds between the current and the previous update.
    pub delta_time: f64,

    /// Updates completed since the game started.
    pub total_updates: u64,

    /// Fixed updates completed since the game started.
    pub total_fixed_updates: u64,
}

//=== FrameStats ==========================================================

/// Per-frame timing statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frames counted during the last full second.
    pub fps: u64,

    /// Milliseconds spent in the variable update phase.
    pub update_ms: f64,

    /// Milliseconds spent in fixed-update catch-up.
    pub fixed_update_ms: f64,

    /// Milliseconds spent drawing.
    pub draw_ms: f64,
}

//=== FrameClock ==========================================================

/// Delta derivation and fixed-step accumulator.
#[derive(Debug, Clone)]
pub(crate) struct FrameClock {
    last_update_time: Option<f64>,
    accum_time: f64,
    fixed_updates_per_second: f64,
    max_fixed_updates_per_frame: Option<u32>,

    //--- FPS counter ------------------------------------------------------
    frames_since_fps_reset: u64,
    accum_since_fps_reset: f64,
    fps: u64,
}

impl FrameClock {
    pub(crate) fn new(fixed_updates_per_second: f64, max_fixed_updates_per_frame: Option<u32>) -> Self {
        Self {
            last_update_time: None,
            accum_time: 0.0,
            fixed_updates_per_second,
            max_fixed_updates_per_frame,
            frames_since_fps_reset: 0,
            accum_since_fps_reset: 0.0,
            fps: 0,
        }
    }

    //--- Frame Boundaries -------------------------------------------------

    /// Returns the delta since the previous frame, seeding on first use.
    pub(crate) fn begin_frame(&mut self, total_time: f64) -> f64 {
        let last = *self.last_update_time.get_or_insert(total_time);
        total_time - last
    }

    pub(crate) fn end_frame(&mut self, total_time: f64) {
        self.last_update_time = Some(total_time);
    }

    //--- Accumulator ------------------------------------------------------

    /// Adds the frame delta to the fixed-step budget and the FPS window.
    pub(crate) fn accumulate(&mut self, delta_time: f64) {
        self.accum_time += delta_time;

        self.frames_since_fps_reset += 1;
        self.accum_since_fps_reset += delta_time;
        if self.accum_since_fps_reset >= 1.0 {
            self.fps = self.frames_since_fps_reset;
            self.frames_since_fps_reset = 0;
            self.accum_since_fps_reset -= 1.0;
        }
    }

    pub(crate) fn fixed_step(&self) -> f64 {
        1.0 / self.fixed_updates_per_second
    }

    pub(crate) fn fixed_step_ready(&self) -> bool {
        self.accum_time >= self.fixed_step()
    }

    pub(crate) fn consume_fixed_step(&mut self) {
        self.accum_time -= self.fixed_step();
    }

    /// Whether `steps_this_frame` has reached the configured catch-up cap.
    pub(crate) fn cap_reached(&self, steps_this_frame: u32) -> bool {
        self.max_fixed_updates_per_frame
            .map_or(false, |max| steps_this_frame >= max)
    }

    /// Discards whole pending steps, keeping the sub-step residual.
    ///
    /// Returns the number of seconds dropped.
    pub(crate) fn drop_backlog(&mut self) -> f64 {
        let step = self.fixed_step();
        let residual = self.accum_time % step;
        let dropped = self.accum_time - residual;
        self.accum_time = residual;
        dropped
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn accumulated(&self) -> f64 {
        self.accum_time
    }

    pub(crate) fn fps(&self) -> u64 {
        self.fps
    }

    pub(crate) fn fixed_updates_per_second(&self) -> f64 {
        self.fixed_updates_per_second
    }

    pub(crate) fn set_fixed_updates_per_second(&mut self, rate: f64) {
        self.fixed_updates_per_second = rate;
    }
}

//=========================================================================
// Tests
//=========================================================================
