//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges terminal backends (crossterm, headless) with core systems.
//
// This module defines the contract between display implementations and
// the game loop, so backends can be swapped without touching core code.
//
// Components:
// - `interface`: Display / EventSource traits and DisplayError
// - `input_pump`: the input thread and the shared screen size
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod input_pump;
pub mod interface;

//=== Public API ==========================================================

pub use interface::{Display, DisplayError, EventSource};
