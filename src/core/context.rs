//=========================================================================
// Frame Context
//=========================================================================
//
// Per-frame view of the game handed to scenes, entities and states.
//
// Carries what entities would otherwise reach through back-pointers:
// - input: the key pressed this frame (if any)
// - screen_size: cached terminal size
// - switches: queue for scene changes, applied at the frame boundary
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, KeyEvent};
use crate::core::scene::{SceneSwitch, SwitchQueue};

//=== Context =============================================================

/// Read access to frame data plus a handle for requesting scene switches.
pub struct Context<'a> {
    input: Option<KeyEvent>,
    screen_size: (i32, i32),
    switches: &'a mut SwitchQueue,
}

impl<'a> Context<'a> {
    /// Builds a context around an existing switch queue.
    ///
    /// The Game builds one per frame; tests and tools can build their own.
    pub fn new(
        input: Option<KeyEvent>,
        screen_size: (i32, i32),
        switches: &'a mut SwitchQueue,
    ) -> Self {
        Self {
            input,
            screen_size,
            switches,
        }
    }

    /// The key pressed this frame, `None` if nothing arrived.
    pub fn input(&self) -> Option<&KeyEvent> {
        self.input.as_ref()
    }

    /// Shorthand for the code of this frame's key.
    pub fn key(&self) -> Option<KeyCode> {
        self.input.map(|event| event.code)
    }

    /// Returns true if `code` was pressed this frame.
    pub fn pressed(&self, code: KeyCode) -> bool {
        self.key() == Some(code)
    }

    /// Screen size in cells as `(width, height)`.
    pub fn screen_size(&self) -> (i32, i32) {
        self.screen_size
    }

    /// Requests a switch to the next scene at the end of this frame.
    pub fn next_scene(&mut self) {
        self.switches.push(SceneSwitch::Next);
    }

    /// Requests a switch to the previous scene at the end of this frame.
    pub fn prev_scene(&mut self) {
        self.switches.push(SceneSwitch::Previous);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_frame_input() {
        let mut queue = SwitchQueue::new();
        let ctx = Context::new(Some(KeyEvent::new(KeyCode::Left)), (80, 24), &mut queue);

        assert_eq!(ctx.key(), Some(KeyCode::Left));
        assert!(ctx.pressed(KeyCode::Left));
        assert!(!ctx.pressed(KeyCode::Right));
        assert_eq!(ctx.screen_size(), (80, 24));
    }

    #[test]
    fn no_input_means_no_key() {
        let mut queue = SwitchQueue::new();
        let ctx = Context::new(None, (10, 10), &mut queue);

        assert!(ctx.input().is_none());
        assert_eq!(ctx.key(), None);
    }

    #[test]
    fn scene_requests_are_queued() {
        let mut queue = SwitchQueue::new();
        {
            let mut ctx = Context::new(None, (10, 10), &mut queue);
            ctx.next_scene();
            ctx.prev_scene();
        }

        assert_eq!(queue.take(), vec![SceneSwitch::Next, SceneSwitch::Previous]);
    }
}
