//=========================================================================
// Debug Overlay
//=========================================================================
//
// Diagnostic text drawn after the current state. Also hosts the
// placeholder line shown while no state is installed.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Color, Rect, Renderer, Vec2};
use crate::core::assets::Font;
use crate::core::clock::{FrameStats, GameTime};
use crate::core::state::StateInfo;

//=== Constants ===========================================================

const PLACEHOLDER_TEXT: &str = "No game state set";
const PLACEHOLDER_SIZE: f32 = 24.0;

const TEXT_SIZE: f32 = 14.0;
const LINE_HEIGHT: f32 = 18.0;
const MARGIN: f32 = 8.0;
const PADDING: f32 = 4.0;
const CROSSHAIR: f32 = 6.0;

//=== DebugOverlay ========================================================

/// Which overlay sections are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugOverlay {
    /// Frames per second.
    pub fps: bool,

    /// State, clock, counters, asset and timing statistics.
    pub general: bool,

    /// Pointer position and crosshair.
    pub pointer: bool,
}

impl DebugOverlay {
    pub const OFF: Self = Self {
        fps: false,
        general: false,
        pointer: false,
    };

    pub const ALL: Self = Self {
        fps: true,
        general: true,
        pointer: true,
    };

    pub fn is_enabled(&self) -> bool {
        self.fps || self.general || self.pointer
    }
}

//=== OverlayReport =======================================================

/// Everything the overlay reports, gathered by the loop driver.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OverlayReport {
    pub(crate) stats: FrameStats,
    pub(crate) time: GameTime,
    pub(crate) state: Option<StateInfo>,
    pub(crate) fixed_updates_per_second: f64,
    pub(crate) loaded_assets: usize,
    pub(crate) state_loaded_assets: usize,
    pub(crate) pointer: Vec2,
}

impl OverlayReport {
    fn lines(&self, overlay: DebugOverlay) -> Vec<String> {
        let mut lines = Vec::new();

        if overlay.fps {
            lines.push(format!("{} FPS", self.stats.fps));
        }

        if overlay.general {
            lines.push(format!(
                "State: {}",
                self.state.map_or("(none)", |info| info.name)
            ));
            lines.push(format!("Time: {:.2}s (dt {:.4}s)", self.time.time, self.time.delta_time));
            lines.push(format!(
                "Updates: {}, fixed: {} @ {}/s",
                self.time.total_updates, self.time.total_fixed_updates, self.fixed_updates_per_second
            ));
            lines.push(format!(
                "Assets: {} loaded, {} state-scoped",
                self.loaded_assets, self.state_loaded_assets
            ));
            lines.push(format!(
                "Update {:.2} ms, fixed {:.2} ms, draw {:.2} ms",
                self.stats.update_ms, self.stats.fixed_update_ms, self.stats.draw_ms
            ));
        }

        if overlay.pointer {
            lines.push(format!("Pointer: {:.0}, {:.0}", self.pointer.x, self.pointer.y));
        }

        lines
    }
}

//=== Drawing =============================================================

/// Draws the enabled overlay sections in the top-left corner.
pub(crate) fn draw_overlay(renderer: &mut dyn Renderer, font: &Font, overlay: DebugOverlay, report: &OverlayReport) {
    let lines = report.lines(overlay);

    if !lines.is_empty() {
        let width = lines
            .iter()
            .map(|line| renderer.measure_text(font, TEXT_SIZE, line).x)
            .fold(0.0_f32, f32::max);
        let height = lines.len() as f32 * LINE_HEIGHT;

        renderer.draw_rectangle(
            Rect::new(MARGIN - PADDING, MARGIN - PADDING, width + PADDING * 2.0, height + PADDING * 2.0),
            Color::BLACK.with_alpha(0.6),
        );

        for (index, line) in lines.iter().enumerate() {
            let position = Vec2::new(MARGIN, MARGIN + index as f32 * LINE_HEIGHT);
            renderer.draw_text(font, TEXT_SIZE, line, position, Color::WHITE);
        }
    }

    if overlay.pointer {
        let p = report.pointer;
        renderer.draw_line(Vec2::new(p.x - CROSSHAIR, p.y), Vec2::new(p.x + CROSSHAIR, p.y), 1.0, Color::RED);
        renderer.draw_line(Vec2::new(p.x, p.y - CROSSHAIR), Vec2::new(p.x, p.y + CROSSHAIR), 1.0, Color::RED);
    }
}

/// Centered notice drawn while no state is installed.
pub(crate) fn draw_placeholder(renderer: &mut dyn Renderer, font: &Font, screen_size: Vec2) {
    let size = renderer.measure_text(font, PLACEHOLDER_SIZE, PLACEHOLDER_TEXT);
    let position = Vec2::new(
        ((screen_size.x - size.x) / 2.0).floor(),
        ((screen_size.y - size.y) / 2.0).floor(),
    );
    renderer.draw_text(font, PLACEHOLDER_SIZE, PLACEHOLDER_TEXT, position, Color::WHITE.with_alpha(0.5));
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::{ResourceId, Texture};

    #[derive(Default)]
    struct TextLog {
        texts: Vec<(String, Vec2)>,
        rects: usize,
        lines: usize,
    }

    impl Renderer for TextLog {
        fn draw_texture(&mut self, _texture: &Texture, _dest: Rect, _tint: Color) {}
        fn draw_rectangle(&mut self, _rect: Rect, _color: Color) {
            self.rects += 1;
        }
        fn draw_line(&mut self, _from: Vec2, _to: Vec2, _thickness: f32, _color: Color) {
            self.lines += 1;
        }
        fn draw_text(&mut self, _font: &Font, _size: f32, text: &str, position: Vec2, _color: Color) {
            self.texts.push((text.to_string(), position));
        }
    }

    fn font() -> Font {
        Font {
            id: ResourceId(1),
            name: "mono".into(),
        }
    }

    fn report() -> OverlayReport {
        OverlayReport {
            stats: FrameStats {
                fps: 59,
                ..FrameStats::default()
            },
            time: GameTime::default(),
            state: None,
            fixed_updates_per_second: 60.0,
            loaded_assets: 3,
            state_loaded_assets: 1,
            pointer: Vec2::new(10.0, 20.0),
        }
    }

    #[test]
    fn fps_only_draws_one_line() {
        let mut log = TextLog::default();
        let overlay = DebugOverlay {
            fps: true,
            ..DebugOverlay::OFF
        };
        draw_overlay(&mut log, &font(), overlay, &report());

        assert_eq!(log.texts.len(), 1);
        assert_eq!(log.texts[0].0, "59 FPS");
        assert_eq!(log.rects, 1);
        assert_eq!(log.lines, 0);
    }

    #[test]
    fn general_section_reports_assets() {
        let mut log = TextLog::default();
        let overlay = DebugOverlay {
            general: true,
            ..DebugOverlay::OFF
        };
        draw_overlay(&mut log, &font(), overlay, &report());

        assert!(log.texts.iter().any(|(text, _)| text == "State: (none)"));
        assert!(log
            .texts
            .iter()
            .any(|(text, _)| text == "Assets: 3 loaded, 1 state-scoped"));
    }

    #[test]
    fn pointer_draws_crosshair() {
        let mut log = TextLog::default();
        let overlay = DebugOverlay {
            pointer: true,
            ..DebugOverlay::OFF
        };
        draw_overlay(&mut log, &font(), overlay, &report());

        assert_eq!(log.lines, 2);
        assert_eq!(log.texts[0].0, "Pointer: 10, 20");
    }

    #[test]
    fn placeholder_is_centered() {
        let mut log = TextLog::default();
        draw_placeholder(&mut log, &font(), Vec2::new(800.0, 600.0));

        // 17 chars * 12 px estimate = 204 px wide, 24 px tall
        let (text, position) = &log.texts[0];
        assert_eq!(text, PLACEHOLDER_TEXT);
        assert_eq!(*position, Vec2::new(298.0, 288.0));
    }
}
