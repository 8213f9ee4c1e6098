//=========================================================================
// Rendering Collaborator
//=========================================================================
//
// Narrow draw-primitive surface the engine draws through. Only `draw`
// callbacks ever receive a renderer.
//
// Architecture:
//   Game::draw(renderer, screen_size)
//     ├─ GameState::draw(ctx, renderer, screen_size)
//     ├─ placeholder text          (no current state)
//     └─ debug overlay             (optional)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::ops::{Add, Mul, Sub};

//=== Internal Dependencies ===============================================

use crate::core::assets::{Font, Texture};

//=== Module Declarations =================================================

mod overlay;

//=== Public API ==========================================================

pub use overlay::DebugOverlay;
pub(crate) use overlay::{draw_overlay, draw_placeholder, OverlayReport};

//=== Vec2 ================================================================

/// 2D vector in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const RED: Self = Self::rgba(255, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled by `factor` (clamped to 0..=1).
    pub fn with_alpha(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

//=== Renderer Trait ======================================================

/// Draw primitives provided by the graphics backend.
pub trait Renderer {
    fn draw_texture(&mut self, texture: &Texture, dest: Rect, tint: Color);

    fn draw_rectangle(&mut self, rect: Rect, color: Color);

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);

    fn draw_text(&mut self, font: &Font, size: f32, text: &str, position: Vec2, color: Color);

    /// Size of `text` when drawn. Backends without glyph metrics get a
    /// half-em-per-character estimate.
    fn measure_text(&self, _font: &Font, size: f32, text: &str) -> Vec2 {
        Vec2::new(text.chars().count() as f32 * size * 0.5, size)
    }
}

//=== Default Fonts =======================================================

/// Styles of the engine's default font set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
    BoldItalic,
    Mono,
    MonoBold,
}

/// Asset names of the persistent fonts loaded when the game starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultFonts {
    names: BTreeMap<FontStyle, String>,
}

impl DefaultFonts {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The Roboto family bundled under `engine/`.
    pub fn standard() -> Self {
        let mut fonts = Self::new();
        fonts.set(FontStyle::Normal, "engine/Roboto-Regular.ttf");
        fonts.set(FontStyle::Bold, "engine/Roboto-Bold.ttf");
        fonts.set(FontStyle::Italic, "engine/Roboto-Italic.ttf");
        fonts.set(FontStyle::BoldItalic, "engine/Roboto-BoldItalic.ttf");
        fonts.set(FontStyle::Mono, "engine/RobotoMono-Regular.ttf");
        fonts.set(FontStyle::MonoBold, "engine/RobotoMono-Bold.ttf");
        fonts
    }

    pub fn set(&mut self, style: FontStyle, name: impl Into<String>) {
        self.names.insert(style, name.into());
    }

    pub fn name(&self, style: FontStyle) -> Option<&str> {
        self.names.get(&style).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FontStyle, &str)> {
        self.names.iter().map(|(style, name)| (*style, name.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(0.5, -1.0);
        assert_eq!(a + b, Vec2::new(1.5, 1.0));
        assert_eq!(a - b, Vec2::new(0.5, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(rect.contains(Vec2::ZERO));
        assert!(!rect.contains(Vec2::new(10.0, 2.0)));
        assert_eq!(rect.center(), Vec2::new(5.0, 2.5));
    }

    #[test]
    fn with_alpha_scales_and_clamps() {
        assert_eq!(Color::WHITE.with_alpha(0.5).a, 128);
        assert_eq!(Color::WHITE.with_alpha(2.0).a, 255);
        assert_eq!(Color::BLACK.with_alpha(-1.0), Color::TRANSPARENT);
    }

    #[test]
    fn standard_fonts_cover_every_style() {
        let fonts = DefaultFonts::standard();
        assert_eq!(fonts.iter().count(), 6);
        assert_eq!(fonts.name(FontStyle::Mono), Some("engine/RobotoMono-Regular.ttf"));
        assert!(DefaultFonts::new().is_empty());
    }
}
