//=========================================================================
// Entity Group
//=========================================================================
//
// A set of child entities drawn relative to the group's position and
// clipped to the group's bounds.
//
// Clipping rule: a child at local `(x, y)` is drawn iff
//   0 <= x <= width  and  0 <= y <= height
// The upper bound is inclusive.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::{Entity, EntityBase};
use crate::core::canvas::Canvas;
use crate::core::context::Context;

//=== EntityGroup =========================================================

pub struct EntityGroup {
    base: EntityBase,
    width: i32,
    height: i32,
    children: Vec<Box<dyn Entity>>,
}

impl EntityGroup {
    pub fn new(x: i32, y: i32, width: i32, height: i32, children: Vec<Box<dyn Entity>>) -> Self {
        Self {
            base: EntityBase::new(x, y),
            width,
            height,
            children,
        }
    }

    //--- Bounds -----------------------------------------------------------

    /// `(width, height)` of the clip area.
    pub fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn set_width(&mut self, width: i32) {
        if width != self.width {
            self.width = width;
            self.base.mark_dirty();
        }
    }

    pub fn set_height(&mut self, height: i32) {
        if height != self.height {
            self.height = height;
            self.base.mark_dirty();
        }
    }

    /// True if a child at local `(x, y)` falls inside the clip area.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..=self.width).contains(&x) && (0..=self.height).contains(&y)
    }

    //--- Children ---------------------------------------------------------

    pub fn children(&self) -> &[Box<dyn Entity>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn Entity>] {
        &mut self.children
    }

    pub fn push_child(&mut self, child: Box<dyn Entity>) {
        self.children.push(child);
        self.base.mark_dirty();
    }

    /// Swaps in a new child list.
    pub fn replace_children(&mut self, children: Vec<Box<dyn Entity>>) {
        self.children = children;
        self.base.mark_dirty();
    }
}

//=== Entity Implementation ===============================================

impl Entity for EntityGroup {
    fn init(&mut self, ctx: &mut Context) {
        for child in &mut self.children {
            child.init(ctx);
        }
    }

    fn update(&mut self, ctx: &mut Context, delta: f64) {
        for child in &mut self.children {
            child.update(ctx, delta);
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        let (group_fg, group_bg) = self.base.colors();

        for child in &self.children {
            let local = child.base();

            if !self.contains(local.x(), local.y()) {
                continue;
            }

            let Some(glyph) = local.sprite() else {
                continue;
            };

            let (fg, bg) = local.colors();
            let style = canvas.resolve(fg.or(group_fg), bg.or(group_bg));
            canvas.put(self.base.x() + local.x(), self.base.y() + local.y(), glyph, style);
        }
    }

    fn is_dirty(&self) -> bool {
        self.base.is_dirty() || self.children.iter().any(|child| child.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.base.mark_clean();
        for child in &mut self.children {
            child.mark_clean();
        }
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
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
    use crate::core::style::{Color, Style};
    use crate::platform::HeadlessDisplay;

    fn glyph(x: i32, y: i32, c: char) -> Box<dyn Entity> {
        Box::new(EntityBase::with_sprite(x, y, c))
    }

    #[test]
    fn child_on_width_boundary_is_drawn() {
        let (mut display, probe) = HeadlessDisplay::new(40, 20);
        let group = EntityGroup::new(10, 3, 5, 1, vec![glyph(5, 0, 'x'), glyph(6, 0, 'y')]);

        let mut canvas = Canvas::new(&mut display, Style::DEFAULT);
        group.draw(&mut canvas);
        assert_eq!(canvas.writes(), 1);

        assert_eq!(probe.pending_cell(15, 3).map(|c| c.0), Some('x'));
        assert_eq!(probe.pending_cell(16, 3), None, "x = width + 1 is clipped");
    }

    #[test]
    fn negative_and_tall_children_are_clipped() {
        let (mut display, probe) = HeadlessDisplay::new(40, 20);
        let group = EntityGroup::new(
            0,
            0,
            3,
            2,
            vec![glyph(-1, 0, 'a'), glyph(0, -1, 'b'), glyph(1, 2, 'c'), glyph(1, 3, 'd')],
        );

        let mut canvas = Canvas::new(&mut display, Style::DEFAULT);
        group.draw(&mut canvas);

        assert_eq!(canvas.writes(), 1);
        assert_eq!(probe.pending_cell(1, 2).map(|c| c.0), Some('c'));
    }

    #[test]
    fn children_are_offset_by_group_position() {
        let (mut display, probe) = HeadlessDisplay::new(40, 20);
        let mut group = EntityGroup::new(4, 7, 2, 2, vec![glyph(1, 1, 'z')]);
        group.base_mut().set_colors(Some(Color::Green), None);

        let mut canvas = Canvas::new(&mut display, Style::DEFAULT);
        group.draw(&mut canvas);

        assert_eq!(
            probe.pending_cell(5, 8),
            Some(('z', Style::new(Color::Green, Color::Black)))
        );
    }

    #[test]
    fn dirty_child_makes_group_dirty() {
        let mut group = EntityGroup::new(0, 0, 5, 5, vec![glyph(0, 0, 'a')]);
        assert!(!group.is_dirty());

        group.children_mut()[0].base_mut().set_position(1, 0);
        assert!(group.is_dirty());

        group.mark_clean();
        assert!(!group.is_dirty());
        assert!(!group.children()[0].is_dirty());
    }

    #[test]
    fn resizing_marks_dirty() {
        let mut group = EntityGroup::new(0, 0, 5, 5, Vec::new());

        group.set_width(5);
        assert!(!group.is_dirty());

        group.set_height(8);
        assert!(group.is_dirty());
        assert_eq!(group.dimensions(), (5, 8));
    }
}
