//=========================================================================
// Canvas
//=========================================================================
//
// Write-only view of the display handed to entities while a scene draws.
//
// Carries the owning scene's style so entities without colors of their
// own inherit it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::Display;
use crate::core::style::{Color, Style};

//=== Canvas ==============================================================

pub struct Canvas<'a> {
    display: &'a mut dyn Display,
    style: Style,
    writes: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(display: &'a mut dyn Display, style: Style) -> Self {
        Self {
            display,
            style,
            writes: 0,
        }
    }

    /// The owning scene's style.
    pub fn style(&self) -> Style {
        self.style
    }

    /// Scene style with optional per-entity overrides applied.
    pub fn resolve(&self, fg: Option<Color>, bg: Option<Color>) -> Style {
        self.style.patched(fg, bg)
    }

    /// Writes one glyph at `(x, y)`.
    pub fn put(&mut self, x: i32, y: i32, glyph: char, style: Style) {
        self.display.set_cell(x, y, glyph, style);
        self.writes += 1;
    }

    /// Number of glyphs written through this canvas.
    pub fn writes(&self) -> usize {
        self.writes
    }
}
