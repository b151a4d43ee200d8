//=========================================================================
// Text
//=========================================================================
//
// A one-line string rendered as an EntityGroup with one glyph entity per
// character, starting at the group's top-left corner.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::{Entity, EntityBase, EntityGroup};
use crate::core::canvas::Canvas;
use crate::core::context::Context;
use crate::core::style::Color;

//=== Text ================================================================

pub struct Text {
    group: EntityGroup,
    text: String,
}

impl Text {
    pub fn new(x: i32, y: i32, text: impl Into<String>) -> Self {
        let text = text.into();
        let (glyphs, width) = to_entities(&text);

        Self {
            group: EntityGroup::new(x, y, width, 1, glyphs),
            text,
        }
    }

    /// Colors every character; the scene style is used otherwise.
    pub fn with_colors(mut self, fg: Color, bg: Color) -> Self {
        self.group.base_mut().set_colors(Some(fg), Some(bg));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text, rebuilding the glyphs and the clip width.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }

        let (glyphs, width) = to_entities(&text);
        self.group.replace_children(glyphs);
        self.group.set_width(width);
        self.text = text;
    }

    pub fn group(&self) -> &EntityGroup {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut EntityGroup {
        &mut self.group
    }

    /// `(width, height)` in cells.
    pub fn dimensions(&self) -> (i32, i32) {
        self.group.dimensions()
    }
}

/// One glyph entity per character plus the resulting width.
pub fn to_entities(text: &str) -> (Vec<Box<dyn Entity>>, i32) {
    let glyphs: Vec<Box<dyn Entity>> = text
        .chars()
        .enumerate()
        .map(|(index, c)| Box::new(EntityBase::with_sprite(index as i32, 0, c)) as Box<dyn Entity>)
        .collect();

    let width = glyphs.len() as i32;
    (glyphs, width)
}

//=== Entity Implementation ===============================================

impl Entity for Text {
    fn init(&mut self, ctx: &mut Context) {
        self.group.init(ctx);
    }

    fn update(&mut self, ctx: &mut Context, delta: f64) {
        self.group.update(ctx, delta);
    }

    fn draw(&self, canvas: &mut Canvas) {
        self.group.draw(canvas);
    }

    fn is_dirty(&self) -> bool {
        self.group.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.group.mark_clean();
    }

    fn base(&self) -> &EntityBase {
        self.group.base()
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        self.group.base_mut()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::Style;
    use crate::platform::HeadlessDisplay;

    #[test]
    fn text_is_laid_out_left_to_right() {
        let (mut display, probe) = HeadlessDisplay::new(40, 10);
        let text = Text::new(2, 1, "Hi!");

        let mut canvas = Canvas::new(&mut display, Style::DEFAULT);
        text.draw(&mut canvas);

        assert_eq!(canvas.writes(), 3);
        assert_eq!(probe.pending_text(2, 1, 3), "Hi!");
        assert_eq!(text.dimensions(), (3, 1));
    }

    #[test]
    fn set_text_rebuilds_glyphs_and_width() {
        let mut text = Text::new(0, 0, "Score: 0");
        assert!(!text.is_dirty());

        text.set_text("Score: 10");

        assert!(text.is_dirty());
        assert_eq!(text.text(), "Score: 10");
        assert_eq!(text.dimensions(), (9, 1));
        assert_eq!(text.group().children().len(), 9);
    }

    #[test]
    fn set_same_text_is_not_a_change() {
        let mut text = Text::new(0, 0, "PAUSED");
        text.set_text("PAUSED");
        assert!(!text.is_dirty());
    }

    #[test]
    fn colors_apply_to_every_glyph() {
        let (mut display, probe) = HeadlessDisplay::new(40, 10);
        let text = Text::new(0, 0, "ok").with_colors(Color::Yellow, Color::DarkBlue);

        let mut canvas = Canvas::new(&mut display, Style::DEFAULT);
        text.draw(&mut canvas);

        let style = Style::new(Color::Yellow, Color::DarkBlue);
        assert_eq!(probe.pending_cell(0, 0), Some(('o', style)));
        assert_eq!(probe.pending_cell(1, 0), Some(('k', style)));
    }

    #[test]
    fn multibyte_text_counts_chars() {
        let (_, width) = to_entities("héllo");
        assert_eq!(width, 5);
    }
}
