//=========================================================================
// Scene System
//=========================================================================
//
// Top-level screens of a game. The Game holds an ordered list of scenes
// and exactly one of them is active.
//
// Architecture:
//   Scene (trait)
//     └─ SceneBase   entities + colors + redraw flag
//
// Flow per frame (active scene only):
//   update() → entity updates → draw() → switches applied
//
// Activation:
//   setup() (first activation only) → init() (every activation)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::Context;
use crate::core::platform_bridge::{Display, DisplayError};

//=== Module Declarations =================================================

mod scene_base;
pub mod switch;

//=== Public API ==========================================================

pub use scene_base::SceneBase;
pub use switch::{SceneSwitch, SwitchQueue};

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks.
///
/// Only `base()` and `base_mut()` are required; every hook defaults to
/// the behavior of a plain [`SceneBase`].
///
/// # Minimal Implementation
///
/// ```rust
/// # use terminus::prelude::*;
/// struct Title {
///     base: SceneBase,
/// }
///
/// impl Scene for Title {
///     fn setup(&mut self, _ctx: &mut Context) {
///         self.base.add(Text::new(2, 2, "Press Enter"));
///     }
///
///     fn update(&mut self, ctx: &mut Context, _delta: f64) {
///         if ctx.pressed(KeyCode::Enter) {
///             ctx.next_scene();
///         }
///     }
///
///     fn base(&self) -> &SceneBase { &self.base }
///     fn base_mut(&mut self) -> &mut SceneBase { &mut self.base }
/// }
/// ```
pub trait Scene {
    /// Called once, the first time the scene becomes active.
    ///
    /// Entities that should survive repeated `init` calls are added here.
    fn setup(&mut self, _ctx: &mut Context) {}

    /// Called every time the scene becomes active.
    fn init(&mut self, display: &mut dyn Display) {
        self.base_mut().init(display);
    }

    /// Scene-level logic. Runs before the entity updates each frame.
    fn update(&mut self, _ctx: &mut Context, _delta: f64) {}

    /// Presents the scene if anything changed. Returns whether it drew.
    fn draw(&mut self, display: &mut dyn Display) -> Result<bool, DisplayError> {
        self.base_mut().draw(display)
    }

    fn base(&self) -> &SceneBase;

    fn base_mut(&mut self) -> &mut SceneBase;
}
