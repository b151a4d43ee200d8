//=========================================================================
// Entity System
//=========================================================================
//
// The capability contract for anything placed in a scene, plus the
// built-in entity shapes.
//
// Architecture:
//   Entity (trait)
//     ├─ EntityBase   single glyph at (x, y)
//     ├─ EntityGroup  EntityBase + clipped children
//     └─ Text         EntityGroup built from a string
//
// Specialization is by composition: a custom entity holds an EntityBase
// (or a group) and forwards `base()` / `base_mut()` to it.
//
// Lifecycle per frame:
//   init (once) → update(delta) → draw(canvas)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::core::canvas::Canvas;
use crate::core::context::Context;

//=== Module Declarations =================================================

mod base;
mod group;
mod text;

//=== Public API ==========================================================

pub use base::EntityBase;
pub use group::EntityGroup;
pub use text::Text;

//=== Identity ============================================================

/// Identity of an entity, issued when it is added to a scene.
///
/// Two entities with identical fields still have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identity of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(u64);

impl SceneId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Back-reference stamped onto an entity when it joins a scene.
///
/// A plain value used for lookups; it never keeps anything alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneBinding {
    pub scene: SceneId,
    pub entity: EntityId,
}

//=== Entity Trait ========================================================

/// Defines entity behavior with lifecycle hooks.
///
/// Only `draw`, `base`, `base_mut` and the `Any` accessors are required.
///
/// # Minimal Implementation
///
/// ```rust
/// # use terminus::prelude::*;
/// # use std::any::Any;
/// struct Blinker {
///     base: EntityBase,
///     elapsed: f64,
/// }
///
/// impl Entity for Blinker {
///     fn update(&mut self, _ctx: &mut Context, delta: f64) {
///         self.elapsed += delta;
///         if self.elapsed > 0.5 {
///             self.elapsed = 0.0;
///             let next = if self.base.sprite().is_some() { None } else { Some('*') };
///             self.base.set_sprite(next);
///         }
///     }
///
///     fn draw(&self, canvas: &mut Canvas) {
///         self.base.draw(canvas);
///     }
///
///     fn base(&self) -> &EntityBase { &self.base }
///     fn base_mut(&mut self) -> &mut EntityBase { &mut self.base }
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
/// ```
pub trait Entity: Any {
    /// Called once, before the first frame the entity takes part in.
    fn init(&mut self, _ctx: &mut Context) {}

    /// Called every frame with the seconds elapsed since the last one.
    ///
    /// May move or restyle the entity; must not draw.
    fn update(&mut self, _ctx: &mut Context, _delta: f64) {}

    /// Writes the entity's glyphs. Runs after every entity has updated.
    fn draw(&self, canvas: &mut Canvas);

    /// Stamps the scene back-reference. Called by `SceneBase::add`.
    fn add_to_scene(&mut self, binding: SceneBinding) {
        self.base_mut().bind(binding);
    }

    /// Clears the back-reference. Called by `SceneBase::remove`.
    fn remove_from_scene(&mut self) {
        self.base_mut().unbind();
    }

    /// True if something visible changed since the last draw.
    fn is_dirty(&self) -> bool {
        self.base().is_dirty()
    }

    /// Acknowledges that the current state has been drawn.
    fn mark_clean(&mut self) {
        self.base_mut().mark_clean();
    }

    fn base(&self) -> &EntityBase;

    fn base_mut(&mut self) -> &mut EntityBase;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = EntityId::next();
        let b = EntityId::next();
        assert_ne!(a, b);

        assert_ne!(SceneId::next(), SceneId::next());
    }
}
