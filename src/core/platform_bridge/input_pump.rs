//=========================================================================
// Input Pump
//=========================================================================
//
// Background thread that drains a display's event source.
//
// Architecture:
//   EventSource::poll_event() → forward()
//                                 ├─ Key    → SlotSender::offer()
//                                 ├─ Resize → SharedSize::store()
//                                 └─ other  → ignored
//
// The thread is never joined. A shared `running` flag is lowered before
// the display is torn down; the pump stops forwarding as soon as it sees
// it, and the bounded poll wait guarantees it sees it promptly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::interface::EventSource;
use crate::core::input::{Event, Offer, SlotSender};
use crate::core::FrameControl;

/// Upper bound on a single blocking wait for input.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

//=== SharedSize ==========================================================

/// Screen size written by the input thread and read by the game loop.
///
/// Width and height are packed into one atomic so readers never see a
/// torn pair.
#[derive(Debug)]
pub(crate) struct SharedSize(AtomicU32);

impl SharedSize {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self(AtomicU32::new(pack(width, height)))
    }

    pub(crate) fn store(&self, width: u16, height: u16) {
        self.0.store(pack(width, height), Ordering::Release);
    }

    pub(crate) fn load(&self) -> (u16, u16) {
        let packed = self.0.load(Ordering::Acquire);
        ((packed >> 16) as u16, packed as u16)
    }
}

fn pack(width: u16, height: u16) -> u32 {
    (u32::from(width) << 16) | u32::from(height)
}

//=== forward() ===========================================================

/// Routes one raw event to its destination.
pub(crate) fn forward(event: Event, slot: &SlotSender, size: &SharedSize) {
    match event {
        Event::Key(key) => {
            if slot.offer(key) == Offer::Displaced {
                trace!(target: "terminus::input", "Key {:?} replaced an unread key", key.code);
            } else {
                trace!(target: "terminus::input", "Key {:?} forwarded", key.code);
            }
        }
        Event::Resize { width, height } => {
            debug!(target: "terminus::input", "Resize to {}x{}", width, height);
            size.store(width, height);
        }
        Event::Unidentified => {}
    }
}

//=== pump_once() =========================================================

/// Polls the source once and forwards whatever arrived.
///
/// Returns `Exit` when the pump should stop: shutdown was requested or
/// the source failed.
pub(crate) fn pump_once(
    source: &mut dyn EventSource,
    slot: &SlotSender,
    size: &SharedSize,
    running: &AtomicBool,
) -> FrameControl {
    if !running.load(Ordering::Acquire) {
        return FrameControl::Exit;
    }

    match source.poll_event(POLL_INTERVAL) {
        Ok(Some(event)) => {
            // The display may already be torn down.
            if !running.load(Ordering::Acquire) {
                return FrameControl::Exit;
            }
            forward(event, slot, size);
            FrameControl::Continue
        }
        Ok(None) => FrameControl::Continue,
        Err(e) => {
            warn!(target: "terminus::input", "Input source stopped: {}", e);
            // Without input the exit key can never arrive.
            running.store(false, Ordering::Release);
            FrameControl::Exit
        }
    }
}

//=== spawn() =============================================================

/// Spawns the input thread.
pub(crate) fn spawn(
    mut source: Box<dyn EventSource>,
    slot: SlotSender,
    size: Arc<SharedSize>,
    running: Arc<AtomicBool>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("terminus-input".to_string())
        .spawn(move || {
            debug!(target: "terminus::input", "Input thread started");
            while pump_once(source.as_mut(), &slot, &size, &running) == FrameControl::Continue {}
            debug!(target: "terminus::input", "Input thread exiting");
        })
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{input_slot, KeyCode, KeyEvent};
    use crate::core::platform_bridge::DisplayError;
    use std::collections::VecDeque;

    struct Scripted {
        events: VecDeque<Result<Option<Event>, ()>>,
    }

    impl Scripted {
        fn new(events: Vec<Result<Option<Event>, ()>>) -> Self {
            Self {
                events: events.into(),
            }
        }
    }

    impl EventSource for Scripted {
        fn poll_event(&mut self, _timeout: Duration) -> Result<Option<Event>, DisplayError> {
            match self.events.pop_front() {
                Some(Ok(event)) => Ok(event),
                Some(Err(())) | None => Err(DisplayError::EventSourceClosed),
            }
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    #[test]
    fn shared_size_round_trips_extremes() {
        let size = SharedSize::new(0, u16::MAX);
        assert_eq!(size.load(), (0, u16::MAX));

        size.store(u16::MAX, 1);
        assert_eq!(size.load(), (u16::MAX, 1));
    }

    #[test]
    fn key_events_reach_the_slot() {
        let (tx, rx) = input_slot();
        let size = SharedSize::new(80, 24);

        forward(key(KeyCode::Enter), &tx, &size);

        assert_eq!(rx.take(), Some(KeyEvent::new(KeyCode::Enter)));
        assert_eq!(size.load(), (80, 24));
    }

    #[test]
    fn resize_events_update_shared_size_only() {
        let (tx, rx) = input_slot();
        let size = SharedSize::new(80, 24);

        forward(Event::Resize { width: 100, height: 40 }, &tx, &size);

        assert_eq!(size.load(), (100, 40));
        assert_eq!(rx.take(), None);
    }

    #[test]
    fn pump_stops_when_running_is_lowered() {
        let (tx, rx) = input_slot();
        let size = SharedSize::new(80, 24);
        let running = AtomicBool::new(false);
        let mut source = Scripted::new(vec![Ok(Some(key(KeyCode::Escape)))]);

        let control = pump_once(&mut source, &tx, &size, &running);

        assert_eq!(control, FrameControl::Exit);
        assert_eq!(rx.take(), None, "Nothing is forwarded after shutdown");
    }

    #[test]
    fn pump_continues_on_idle_poll() {
        let (tx, rx) = input_slot();
        let size = SharedSize::new(80, 24);
        let running = AtomicBool::new(true);
        let mut source = Scripted::new(vec![Ok(None), Ok(Some(key(KeyCode::Up)))]);

        assert_eq!(pump_once(&mut source, &tx, &size, &running), FrameControl::Continue);
        assert_eq!(rx.take(), None);

        assert_eq!(pump_once(&mut source, &tx, &size, &running), FrameControl::Continue);
        assert_eq!(rx.take(), Some(KeyEvent::new(KeyCode::Up)));
    }

    #[test]
    fn pump_exits_on_source_error() {
        let (tx, _rx) = input_slot();
        let size = SharedSize::new(80, 24);
        let running = AtomicBool::new(true);
        let mut source = Scripted::new(vec![Err(())]);

        assert_eq!(pump_once(&mut source, &tx, &size, &running), FrameControl::Exit);
        assert!(!running.load(Ordering::Acquire), "Source failure stops the game");
    }

    #[test]
    fn spawned_pump_forwards_then_exits_when_source_closes() {
        let (tx, rx) = input_slot();
        let size = Arc::new(SharedSize::new(80, 24));
        let running = Arc::new(AtomicBool::new(true));
        let source = Scripted::new(vec![
            Ok(Some(Event::Resize { width: 120, height: 50 })),
            Ok(Some(key(KeyCode::Char('q')))),
        ]);

        let handle = spawn(Box::new(source), tx, size.clone(), running).unwrap();
        handle.join().unwrap();

        assert_eq!(size.load(), (120, 50));
        assert_eq!(rx.take(), Some(KeyEvent::new(KeyCode::Char('q'))));
    }
}
