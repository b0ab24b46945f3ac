//! Single-slot, freshest-wins frame handoff between the capture loop and a
//! display consumer.

use parking_lot::Mutex;
use std::sync::Arc;

/// Latest-value cell shared between one writer and any number of readers.
///
/// Cloning the publisher shares the slot. `publish` replaces whatever is
/// held; unread frames are dropped, never queued. Each published frame gets
/// a sequence number starting at 1 so readers can tell whether they have
/// already seen it.
#[derive(Debug)]
pub struct FramePublisher<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

#[derive(Debug)]
struct Slot<T> {
    sequence: u64,
    frame: Option<T>,
}

impl<T> Clone for FramePublisher<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for FramePublisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FramePublisher<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                sequence: 0,
                frame: None,
            })),
        }
    }

    /// Replace the held frame, returning its sequence number
    pub fn publish(&self, frame: T) -> u64 {
        let (superseded, sequence) = {
            let mut slot = self.slot.lock();
            slot.sequence += 1;
            (slot.frame.replace(frame), slot.sequence)
        };
        // Freed outside the critical section
        drop(superseded);
        sequence
    }

    /// Sequence number of the latest frame, 0 if none was published
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.slot.lock().sequence
    }
}

impl<T: Clone> FramePublisher<T> {
    /// Copy of the latest frame, if any
    #[must_use]
    pub fn read(&self) -> Option<T> {
        self.slot.lock().frame.clone()
    }

    /// Copy of the latest frame together with its sequence number
    #[must_use]
    pub fn read_with_sequence(&self) -> Option<(u64, T)> {
        let slot = self.slot.lock();
        slot.frame.as_ref().map(|frame| (slot.sequence, frame.clone()))
    }
}
