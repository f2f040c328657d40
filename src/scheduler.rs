//! Frame scheduling, modeled on a display's "call me before the next repaint" primitive.

/// Identifies one frame request. Ids are never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

pub trait FrameScheduler {
    /// Ask for a callback on the next frame.
    fn request_frame(&mut self) -> FrameId;

    /// Withdraw a request. Cancelling a request that already fired, or was already cancelled, does
    /// nothing.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Single-threaded frame queue. The host drains it once per refresh with [`FrameQueue::take_due`]
/// and runs one callback per returned id. Anything requested while those callbacks run waits for
/// the next refresh.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    requested: Vec<FrameId>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that are due this refresh, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.requested)
    }

    pub fn pending(&self) -> usize {
        self.requested.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        self.requested.push(id);

        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.requested.retain(|&r| r != id);
    }
}
