//=========================================================================
// Scene Switch Queue
//=========================================================================
//
// Queue for scene switches requested during a frame.
//
// Scenes and entities cannot reach the Game while it is updating them,
// so they queue switches here (through `Context`). The Game applies the
// queue at the frame boundary, after drawing.
//
//=========================================================================

//=== SceneSwitch =========================================================

/// A request to move the active scene index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSwitch {
    /// Advance to the next scene (no-op at the last one).
    Next,

    /// Go back to the previous scene (no-op at the first one).
    Previous,
}

//=== SwitchQueue =========================================================

/// FIFO of pending scene switches.
#[derive(Debug, Default)]
pub struct SwitchQueue {
    queue: Vec<SceneSwitch>,
}

impl SwitchQueue {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a switch to be applied at the next frame boundary.
    pub fn push(&mut self, switch: SceneSwitch) {
        self.queue.push(switch);
    }

    /// Returns an iterator over the queued switches.
    pub fn iter(&self) -> impl Iterator<Item = &SceneSwitch> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all switches, leaving the queue empty.
    pub fn take(&mut self) -> Vec<SceneSwitch> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_preserves_order_and_empties() {
        let mut queue = SwitchQueue::new();
        queue.push(SceneSwitch::Next);
        queue.push(SceneSwitch::Previous);
        queue.push(SceneSwitch::Next);

        assert_eq!(queue.len(), 3);
        assert_eq!(
            queue.take(),
            vec![SceneSwitch::Next, SceneSwitch::Previous, SceneSwitch::Next]
        );
        assert!(queue.is_empty());
    }
}
