//=========================================================================
// Entity Base
//=========================================================================
//
// The default entity: one optional glyph at a grid position, with
// optional colors that fall back to the owning scene's style.
//
// Every setter that changes something visible marks the entity dirty so
// the owning scene knows to redraw.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use log::warn;

//=== Internal Dependencies ===============================================

use super::{Entity, EntityId, SceneBinding, SceneId};
use crate::core::canvas::Canvas;
use crate::core::style::Color;

//=== EntityBase ==========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct EntityBase {
    binding: Option<SceneBinding>,
    x: i32,
    y: i32,
    sprite: Option<char>,
    foreground: Option<Color>,
    background: Option<Color>,
    dirty: bool,
}

impl EntityBase {
    //--- Construction -----------------------------------------------------

    /// Creates an invisible entity at `(x, y)`.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            binding: None,
            x,
            y,
            sprite: None,
            foreground: None,
            background: None,
            dirty: false,
        }
    }

    /// Creates an entity drawn as `sprite` at `(x, y)`.
    pub fn with_sprite(x: i32, y: i32, sprite: char) -> Self {
        Self {
            sprite: Some(sprite),
            ..Self::new(x, y)
        }
    }

    /// Sets explicit colors, overriding the scene's.
    pub fn with_colors(mut self, fg: Color, bg: Color) -> Self {
        self.foreground = Some(fg);
        self.background = Some(bg);
        self
    }

    //--- Scene Binding ----------------------------------------------------

    pub(crate) fn bind(&mut self, binding: SceneBinding) {
        if let Some(previous) = self.binding {
            warn!(
                "Entity {:?} rebound from scene {:?} to {:?}",
                previous.entity, previous.scene, binding.scene
            );
        }
        self.binding = Some(binding);
    }

    pub(crate) fn unbind(&mut self) {
        self.binding = None;
    }

    /// Id issued by the owning scene; `None` while detached.
    pub fn id(&self) -> Option<EntityId> {
        self.binding.map(|b| b.entity)
    }

    /// Owning scene; `None` while detached.
    pub fn scene(&self) -> Option<SceneId> {
        self.binding.map(|b| b.scene)
    }

    //--- Position ---------------------------------------------------------

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn set_x(&mut self, x: i32) {
        self.set_position(x, self.y);
    }

    pub fn set_y(&mut self, y: i32) {
        self.set_position(self.x, y);
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        if (x, y) != (self.x, self.y) {
            self.x = x;
            self.y = y;
            self.dirty = true;
        }
    }

    /// Moves by `(dx, dy)` cells.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.set_position(self.x + dx, self.y + dy);
    }

    //--- Appearance -------------------------------------------------------

    pub fn sprite(&self) -> Option<char> {
        self.sprite
    }

    /// Sets the glyph; `None` makes the entity invisible.
    pub fn set_sprite(&mut self, sprite: Option<char>) {
        if sprite != self.sprite {
            self.sprite = sprite;
            self.dirty = true;
        }
    }

    /// Explicit colors as `(foreground, background)`.
    pub fn colors(&self) -> (Option<Color>, Option<Color>) {
        (self.foreground, self.background)
    }

    /// Sets colors; `None` inherits from the scene.
    pub fn set_colors(&mut self, fg: Option<Color>, bg: Option<Color>) {
        if (fg, bg) != (self.foreground, self.background) {
            self.foreground = fg;
            self.background = bg;
            self.dirty = true;
        }
    }

    //--- Collision --------------------------------------------------------

    /// True if both entities occupy the same cell.
    pub fn overlaps(&self, other: &EntityBase) -> bool {
        self.position() == other.position()
    }

    /// True if moving by `(dx, dy)` would land on `other`.
    pub fn would_collide(&self, dx: i32, dy: i32, other: &EntityBase) -> bool {
        (self.x + dx, self.y + dy) == other.position()
    }

    //--- Redraw Tracking --------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flags a visible change made outside the setters.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

//=== Entity Implementation ===============================================

impl Entity for EntityBase {
    fn draw(&self, canvas: &mut Canvas) {
        if let Some(glyph) = self.sprite {
            let style = canvas.resolve(self.foreground, self.background);
            canvas.put(self.x, self.y, glyph, style);
        }
    }

    fn base(&self) -> &EntityBase {
        self
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        self
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
