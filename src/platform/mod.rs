//=========================================================================
// Platform Subsystem
//
// Concrete Display backends for the core's platform bridge.
//
// Architecture:
// ```text
//  Game (main thread)                 Input thread
//  ┌──────────────────────────┐      ┌──────────────────────────┐
//  │  Box<dyn Display>        │      │  Box<dyn EventSource>    │
//  │   ├─ TerminalDisplay     │      │   ├─ TerminalEvents      │
//  │   │   └─ FrameBuffer     │      │   │   └─ event_mapper    │
//  │   └─ HeadlessDisplay     │      │   └─ HeadlessEvents      │
//  └──────────────────────────┘      └──────────────────────────┘
// ```
//
// Key Design Decisions:
// - **crossterm stays here**: the core only sees `Display` and engine
//   event types; `event_mapper` is the single conversion point
// - **Headless is public**: tests and tools drive a full Game against
//   an in-memory display and inspect it through `HeadlessProbe`
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod frame_buffer;
pub mod headless;
pub mod terminal;

//=== Public API ==========================================================

pub use headless::{DisplayCalls, HeadlessDisplay, HeadlessProbe};
pub use terminal::TerminalDisplay;
