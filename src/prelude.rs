//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use terminus::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Game runtime
pub use crate::{Game, GameBuilder, GameError};

// Displays
pub use crate::core::platform_bridge::{Display, DisplayError};
pub use crate::platform::{HeadlessDisplay, TerminalDisplay};

// Entities and drawing
pub use crate::core::canvas::Canvas;
pub use crate::core::context::Context;
pub use crate::core::entity::{Entity, EntityBase, EntityGroup, EntityId, Text};

// Scene system
pub use crate::core::scene::{Scene, SceneBase};

// State machine
pub use crate::core::state::{State, StateKey, StateManager, Transition};

// Input and colors
pub use crate::core::input::{KeyCode, KeyEvent, Modifiers};
pub use crate::core::style::{Color, Style};
