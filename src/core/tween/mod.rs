//=========================================================================
// Tweening
//=========================================================================
//
// Time-parameterized interpolation between a source and a target value.
//
// A tween stores only its endpoints, easing and timing; the current value
// is recomputed from the caller's clock on every read.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f64::consts::PI;

//=== Module Declarations =================================================

mod tweened;

//=== Public API ==========================================================

pub use tweened::{TweenedDouble, TweenedRect, TweenedVector2};

//=== Easing ==============================================================

/// Named easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    #[default]
    Linear,

    InQuad,
    OutQuad,
    InOutQuad,

    InCubic,
    OutCubic,
    InOutCubic,

    InQuart,
    OutQuart,
    InOutQuart,

    InSine,
    OutSine,
    InOutSine,

    InExpo,
    OutExpo,
    InOutExpo,

    InCirc,
    OutCirc,
    InOutCirc,
}

impl Easing {
    pub const ALL: [Easing; 19] = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
        Easing::InExpo,
        Easing::OutExpo,
        Easing::InOutExpo,
        Easing::InCirc,
        Easing::OutCirc,
        Easing::InOutCirc,
    ];
}

//=== ease ================================================================

/// Eased value at `amount` (0..=1) of the way from `start` to
/// `start + change`.
pub fn ease(easing: Easing, amount: f64, start: f64, change: f64) -> f64 {
    let t = amount.clamp(0.0, 1.0);
    let b = start;
    let c = change;

    match easing {
        Easing::Linear => c * t + b,

        //--- Polynomial ---------------------------------------------------
        Easing::InQuad => c * t * t + b,
        Easing::OutQuad => -c * t * (t - 2.0) + b,
        Easing::InOutQuad => {
            let t = t * 2.0;
            if t < 1.0 {
                c / 2.0 * t * t + b
            } else {
                let t = t - 1.0;
                -c / 2.0 * (t * (t - 2.0) - 1.0) + b
            }
        }

        Easing::InCubic => c * t.powi(3) + b,
        Easing::OutCubic => c * ((t - 1.0).powi(3) + 1.0) + b,
        Easing::InOutCubic => {
            let t = t * 2.0;
            if t < 1.0 {
                c / 2.0 * t.powi(3) + b
            } else {
                c / 2.0 * ((t - 2.0).powi(3) + 2.0) + b
            }
        }

        Easing::InQuart => c * t.powi(4) + b,
        Easing::OutQuart => -c * ((t - 1.0).powi(4) - 1.0) + b,
        Easing::InOutQuart => {
            let t = t * 2.0;
            if t < 1.0 {
                c / 2.0 * t.powi(4) + b
            } else {
                -c / 2.0 * ((t - 2.0).powi(4) - 2.0) + b
            }
        }

        //--- Trigonometric ------------------------------------------------
        Easing::InSine => -c * (t * PI / 2.0).cos() + c + b,
        Easing::OutSine => c * (t * PI / 2.0).sin() + b,
        Easing::InOutSine => -c / 2.0 * ((PI * t).cos() - 1.0) + b,

        //--- Exponential --------------------------------------------------
        Easing::InExpo => {
            if t == 0.0 {
                b
            } else {
                c * 2f64.powf(10.0 * (t - 1.0)) + b
            }
        }
        Easing::OutExpo => {
            if t == 1.0 {
                b + c
            } else {
                c * (1.0 - 2f64.powf(-10.0 * t)) + b
            }
        }
        Easing::InOutExpo => {
            if t == 0.0 {
                return b;
            }
            if t == 1.0 {
                return b + c;
            }
            let t = t * 2.0;
            if t < 1.0 {
                c / 2.0 * 2f64.powf(10.0 * (t - 1.0)) + b
            } else {
                c / 2.0 * (2.0 - 2f64.powf(-10.0 * (t - 1.0))) + b
            }
        }

        //--- Circular -----------------------------------------------------
        Easing::InCirc => -c * ((1.0 - t * t).sqrt() - 1.0) + b,
        Easing::OutCirc => {
            let t = t - 1.0;
            c * (1.0 - t * t).sqrt() + b
        }
        Easing::InOutCirc => {
            let t = t * 2.0;
            if t < 1.0 {
                -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b
            } else {
                let t = t - 2.0;
                c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
            }
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn every_curve_hits_both_endpoints() {
        for easing in Easing::ALL {
            assert!(close(ease(easing, 0.0, 10.0, 5.0), 10.0), "{:?} start", easing);
            assert!(close(ease(easing, 1.0, 10.0, 5.0), 15.0), "{:?} end", easing);
        }
    }

    #[test]
    fn in_out_curves_are_symmetric_at_midpoint() {
        for easing in [
            Easing::Linear,
            Easing::InOutQuad,
            Easing::InOutCubic,
            Easing::InOutQuart,
            Easing::InOutSine,
            Easing::InOutExpo,
            Easing::InOutCirc,
        ] {
            assert!(close(ease(easing, 0.5, 0.0, 2.0), 1.0), "{:?}", easing);
        }
    }

    #[test]
    fn in_is_slow_and_out_is_fast_early() {
        assert!(close(ease(Easing::InQuad, 0.5, 0.0, 1.0), 0.25));
        assert!(close(ease(Easing::OutQuad, 0.5, 0.0, 1.0), 0.75));
        assert!(close(ease(Easing::InCubic, 0.5, 0.0, 1.0), 0.125));
        assert!(close(ease(Easing::OutCubic, 0.5, 0.0, 1.0), 0.875));
    }

    #[test]
    fn amount_is_clamped() {
        assert_eq!(ease(Easing::Linear, -1.0, 3.0, 4.0), 3.0);
        assert_eq!(ease(Easing::Linear, 2.0, 3.0, 4.0), 7.0);
    }
}
