//=========================================================================
// Tweened Values
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{ease, Easing};
use crate::core::coroutine::Wait;
use crate::core::render::{Rect, Vec2};

//=== TweenedDouble =======================================================

/// A scalar moving from a source to a target value over time.
///
/// All timestamps are game-clock seconds (`GameTime::time`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenedDouble {
    source: f64,
    target: f64,
    easing: Easing,
    start_time: f64,
    duration: f64,
}

impl TweenedDouble {
    /// A tween resting at `value`.
    pub fn new(value: f64) -> Self {
        Self {
            source: value,
            target: value,
            easing: Easing::Linear,
            start_time: 0.0,
            duration: 0.0,
        }
    }

    /// Starts moving from the current value towards `target`.
    pub fn tween_to(&mut self, now: f64, target: f64, easing: Easing, duration: f64) {
        self.source = self.value(now);
        self.target = target;
        self.easing = easing;
        self.start_time = now;
        self.duration = duration.max(0.0);
    }

    /// Jumps to `value` without animating.
    pub fn set(&mut self, value: f64) {
        *self = Self::new(value);
    }

    pub fn value(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return self.target;
        }
        let amount = 1.0 - (self.completion_time() - now) / self.duration;
        ease(self.easing, amount.clamp(0.0, 1.0), self.source, self.target - self.source)
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn completion_time(&self) -> f64 {
        self.start_time + self.duration
    }

    pub fn is_complete(&self, now: f64) -> bool {
        now >= self.completion_time()
    }

    /// Coroutine wait that completes together with the tween.
    pub fn completion_wait(&self) -> Wait {
        Wait::until(self.completion_time())
    }
}

//=== TweenedVector2 ======================================================

/// Per-component tween of a [`Vec2`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenedVector2 {
    x: TweenedDouble,
    y: TweenedDouble,
}

impl TweenedVector2 {
    pub fn new(value: Vec2) -> Self {
        Self {
            x: TweenedDouble::new(value.x as f64),
            y: TweenedDouble::new(value.y as f64),
        }
    }

    pub fn tween_to(&mut self, now: f64, target: Vec2, easing: Easing, duration: f64) {
        self.x.tween_to(now, target.x as f64, easing, duration);
        self.y.tween_to(now, target.y as f64, easing, duration);
    }

    pub fn set(&mut self, value: Vec2) {
        *self = Self::new(value);
    }

    pub fn value(&self, now: f64) -> Vec2 {
        Vec2::new(self.x.value(now) as f32, self.y.value(now) as f32)
    }

    pub fn target(&self) -> Vec2 {
        Vec2::new(self.x.target() as f32, self.y.target() as f32)
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.x.is_complete(now) && self.y.is_complete(now)
    }

    pub fn completion_wait(&self) -> Wait {
        self.x.completion_wait()
    }
}

//=== TweenedRect =========================================================

/// Per-component tween of a [`Rect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenedRect {
    position: TweenedVector2,
    size: TweenedVector2,
}

impl TweenedRect {
    pub fn new(value: Rect) -> Self {
        Self {
            position: TweenedVector2::new(value.position()),
            size: TweenedVector2::new(value.size()),
        }
    }

    pub fn tween_to(&mut self, now: f64, target: Rect, easing: Easing, duration: f64) {
        self.position.tween_to(now, target.position(), easing, duration);
        self.size.tween_to(now, target.size(), easing, duration);
    }

    pub fn set(&mut self, value: Rect) {
        *self = Self::new(value);
    }

    pub fn value(&self, now: f64) -> Rect {
        let position = self.position.value(now);
        let size = self.size.value(now);
        Rect::new(position.x, position.y, size.x, size.y)
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.position.is_complete(now) && self.size.is_complete(now)
    }

    pub fn completion_wait(&self) -> Wait {
        self.position.completion_wait()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::GameTime;
    use crate::core::coroutine::CoroutineOperation;

    #[test]
    fn resting_tween_reports_its_value() {
        let tween = TweenedDouble::new(3.0);
        assert_eq!(tween.value(0.0), 3.0);
        assert_eq!(tween.value(100.0), 3.0);
        assert!(tween.is_complete(0.0));
    }

    #[test]
    fn linear_tween_progresses_with_time() {
        let mut tween = TweenedDouble::new(0.0);
        tween.tween_to(1.0, 10.0, Easing::Linear, 2.0);

        assert_eq!(tween.value(0.0), 0.0);
        assert_eq!(tween.value(1.0), 0.0);
        assert_eq!(tween.value(2.0), 5.0);
        assert_eq!(tween.value(3.0), 10.0);
        assert_eq!(tween.value(9.0), 10.0);
        assert!(!tween.is_complete(2.5));
        assert!(tween.is_complete(3.0));
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut tween = TweenedDouble::new(0.0);
        tween.tween_to(0.0, 10.0, Easing::Linear, 1.0);
        tween.tween_to(0.5, 0.0, Easing::Linear, 1.0);

        assert_eq!(tween.value(0.5), 5.0);
        assert_eq!(tween.value(1.0), 2.5);
        assert_eq!(tween.target(), 0.0);
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let mut tween = TweenedDouble::new(1.0);
        tween.tween_to(4.0, 2.0, Easing::OutQuad, 0.0);
        assert_eq!(tween.value(4.0), 2.0);
    }

    #[test]
    fn completion_wait_finishes_with_tween() {
        let mut tween = TweenedDouble::new(0.0);
        tween.tween_to(2.0, 1.0, Easing::InOutSine, 0.5);

        let mut wait = tween.completion_wait();
        let at = |time| GameTime {
            time,
            ..GameTime::default()
        };
        wait.start(&at(2.0));
        assert!(!wait.completed(&at(2.25)));
        assert!(wait.completed(&at(2.5)));
    }

    #[test]
    fn vector_and_rect_tween_per_component() {
        let mut position = TweenedVector2::new(Vec2::ZERO);
        position.tween_to(0.0, Vec2::new(4.0, -2.0), Easing::Linear, 2.0);
        assert_eq!(position.value(1.0), Vec2::new(2.0, -1.0));
        assert_eq!(position.target(), Vec2::new(4.0, -2.0));

        let mut rect = TweenedRect::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        rect.tween_to(0.0, Rect::new(10.0, 0.0, 20.0, 0.0), Easing::Linear, 1.0);
        assert_eq!(rect.value(0.5), Rect::new(5.0, 0.0, 15.0, 5.0));
        assert!(rect.is_complete(1.0));
    }
}
