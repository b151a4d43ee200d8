//=========================================================================
// Input
//
// Key/resize event types and the latest-wins handoff that carries key
// presses from the input thread into the game loop.
//
// Architecture:
//   EventSource (input thread) → Event → SlotSender ─┐
//                                                   bounded(1)
//   Game loop ← Option<KeyEvent> ← SlotReceiver ────┘
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
pub mod slot;

//=== Public API ==========================================================

pub use event::{Event, KeyCode, KeyEvent, Modifiers};
pub use slot::{input_slot, Offer, SlotReceiver, SlotSender};
