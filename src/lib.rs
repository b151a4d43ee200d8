//=========================================================================
// Terminus — Library Root
//
// A small real-time loop engine for character-grid (terminal) games.
//
// Responsibilities:
// - Expose the game runtime (`Game`, `GameBuilder`)
// - Expose the building blocks games are made of: scenes, entities,
//   states, input and colors (`core`)
// - Provide the terminal and headless display backends (`platform`)
//
// Typical usage:
// ```no_run
// use terminus::prelude::*;
//
// fn main() -> Result<(), GameError> {
//     let mut game = GameBuilder::new().build(TerminalDisplay::new());
//
//     let mut scene = SceneBase::new();
//     scene.add(EntityBase::with_sprite(1, 1, '@'));
//
//     game.init(vec![Box::new(scene)])?;
//     game.start()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything the loop drives and is independent of any
// terminal library. `platform` holds the concrete displays; crossterm is
// only referenced there.
//
pub mod core;
pub mod logging;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `game` defines the main entry point; its types are re-exported below.
//
mod game;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the runtime so applications can `use terminus::Game;`
// without knowing the internal module structure.
//
pub use game::{Game, GameBuilder, GameError, DEFAULT_FPS};
