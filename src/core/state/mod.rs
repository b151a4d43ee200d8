//=========================================================================
// State System
//=========================================================================
//
// Generic finite-state machine usable by any owner.
//
// Architecture:
//   StateManager<K, W>
//     ├─ states: HashMap<K, Box<dyn State<K, W>>>
//     ├─ current / previous / default: K
//     └─ hooks receive `&mut W` (the owner's data) and the frame Context
//
// Flow:
//   update() → (enter default on first call) → tick() → apply Transition
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::Context;

//=== Module Declarations =================================================

mod state_manager;

//=== Public API ==========================================================

pub use state_manager::{StateKey, StateManager, Transition};

//=== State Trait =========================================================

/// Defines state behavior with enter/exit hooks and a per-frame tick.
///
/// Only `tick()` is required:
///
/// ```rust
/// # use terminus::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Mode { Running, Paused }
/// # impl StateKey for Mode {}
/// struct Running;
///
/// impl State<Mode, SceneBase> for Running {
///     fn tick(&mut self, _scene: &mut SceneBase, ctx: &mut Context, _delta: f64) -> Transition<Mode> {
///         if ctx.pressed(KeyCode::Char('p')) {
///             Transition::Change(Mode::Paused)
///         } else {
///             Transition::Stay
///         }
///     }
/// }
/// ```
pub trait State<K: StateKey, W: ?Sized> {
    /// Called when the state becomes current.
    fn on_enter(&mut self, _owner: &mut W, _ctx: &mut Context) {}

    /// Called when the state stops being current, before the next
    /// state's `on_enter`.
    fn on_exit(&mut self, _owner: &mut W, _ctx: &mut Context) {}

    /// Called by `StateManager::update` while the state is current.
    fn tick(&mut self, owner: &mut W, ctx: &mut Context, delta: f64) -> Transition<K>;
}
