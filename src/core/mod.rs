//=========================================================================
// Core Systems
//
// Everything the game loop drives, independent of any terminal backend.
//
// Responsibilities:
// - Entities and the scenes that own them
// - The generic state machine scenes use for modes (paused, running, ...)
// - Input events and the handoff from the input thread
// - The Display contract backends implement
//
// Notes:
// All state here lives on the game thread. The only thing shared with
// the input thread is the key slot and the cached screen size, both in
// `input` / `platform_bridge`.
//
//=========================================================================

//=== Modules =============================================================

pub mod canvas;
pub mod context;
pub mod entity;
pub mod input;
pub mod platform_bridge;
pub mod scene;
pub mod state;
pub mod style;

//=== Re-exports ==========================================================

pub use canvas::Canvas;
pub use context::Context;
pub use entity::{Entity, EntityBase, EntityGroup, EntityId, SceneBinding, SceneId, Text};
pub use input::{Event, KeyCode, KeyEvent, Modifiers};
pub use platform_bridge::{Display, DisplayError, EventSource};
pub use scene::{Scene, SceneBase, SceneSwitch, SwitchQueue};
pub use state::{State, StateKey, StateManager, Transition};
pub use style::{Color, Style};

//=== FrameControl ========================================================
//
// Control flow for a single loop iteration. Each game frame (and each
// input-thread poll) signals either to keep going or to stop.
//
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Exit,
}
