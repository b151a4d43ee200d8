//=========================================================================
// Input Slot
//
// Single-slot handoff between the input thread and the game loop.
//
// Architecture:
// ```text
//   Input thread                         Game loop
//   SlotSender::offer(key) ──┐      ┌── SlotReceiver::take()
//                            ▼      │     (non-blocking, once per frame)
//                      bounded(1) channel
// ```
//
// Policy (latest event wins):
// - The consumer never blocks: an empty slot yields `None`.
// - The producer never blocks: if the slot is still full, the pending
//   event is displaced and the new one takes its place. Several keys
//   arriving within one frame therefore collapse to the last one.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::trace;

//=== Internal Dependencies ===============================================

use super::event::KeyEvent;

//=== Offer ===============================================================

/// Outcome of handing an event to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// The slot was empty; the event is now pending.
    Delivered,

    /// An undelivered event was dropped to make room for this one.
    Displaced,
}

//=== Construction ========================================================

/// Creates a connected sender/receiver pair sharing one slot.
pub fn input_slot() -> (SlotSender, SlotReceiver) {
    let (tx, rx) = bounded(1);

    (
        SlotSender {
            tx,
            displace: rx.clone(),
        },
        SlotReceiver { rx },
    )
}

//=== SlotSender ==========================================================

/// Producer half, owned by the input thread.
pub struct SlotSender {
    tx: Sender<KeyEvent>,

    /// Receiver clone used only to evict a stale pending event.
    displace: Receiver<KeyEvent>,
}

impl SlotSender {
    /// Hands `event` to the game loop without blocking.
    pub fn offer(&self, event: KeyEvent) -> Offer {
        let mut displaced = false;
        let mut pending = event;

        loop {
            match self.tx.try_send(pending) {
                Ok(()) if displaced => return Offer::Displaced,
                Ok(()) => return Offer::Delivered,
                Err(TrySendError::Full(back)) => {
                    if let Ok(stale) = self.displace.try_recv() {
                        trace!(target: "terminus::input", "Displacing unread key {:?}", stale);
                        displaced = true;
                    }
                    pending = back;
                }
                // `displace` keeps a receiver alive for as long as `self`.
                Err(TrySendError::Disconnected(_)) => unreachable!("input slot lost its receiver"),
            }
        }
    }
}

//=== SlotReceiver ========================================================

/// Consumer half, owned by the game loop.
pub struct SlotReceiver {
    rx: Receiver<KeyEvent>,
}

impl SlotReceiver {
    /// Takes the pending event, if one arrived since the last call.
    pub fn take(&self) -> Option<KeyEvent> {
        self.rx.try_recv().ok()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use std::thread;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c))
    }

    #[test]
    fn take_on_empty_slot_is_none() {
        let (_tx, rx) = input_slot();
        assert_eq!(rx.take(), None);
    }

    #[test]
    fn offered_event_is_taken_once() {
        let (tx, rx) = input_slot();

        assert_eq!(tx.offer(key('a')), Offer::Delivered);
        assert_eq!(rx.take(), Some(key('a')));
        assert_eq!(rx.take(), None, "A key must not be re-delivered");
    }

    #[test]
    fn newer_event_displaces_unread_one() {
        let (tx, rx) = input_slot();

        assert_eq!(tx.offer(key('a')), Offer::Delivered);
        assert_eq!(tx.offer(key('b')), Offer::Displaced);
        assert_eq!(tx.offer(key('c')), Offer::Displaced);

        assert_eq!(rx.take(), Some(key('c')), "Latest event wins");
        assert_eq!(rx.take(), None);
    }

    #[test]
    fn offer_after_take_is_delivered_again() {
        let (tx, rx) = input_slot();

        tx.offer(key('a'));
        rx.take();

        assert_eq!(tx.offer(key('b')), Offer::Delivered);
        assert_eq!(rx.take(), Some(key('b')));
    }

    #[test]
    fn offer_never_blocks_from_another_thread() {
        let (tx, rx) = input_slot();

        let producer = thread::spawn(move || {
            for c in 'a'..='z' {
                tx.offer(key(c));
            }
        });
        producer.join().unwrap();

        assert_eq!(rx.take(), Some(key('z')));
    }
}
