use std::collections::VecDeque;

use crate::event::DeviceEvent;

/// Strict FIFO buffer of pending device events
///
/// Insertion order equals dispatch order. The queue performs no
/// deduplication and enforces no capacity bound; bursts of device events
/// are expected to be small, on the order of attached devices.
///
/// Exclusively owned by the [`EventModerator`](crate::EventModerator).
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<DeviceEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event at the back
    pub fn add(&mut self, event: DeviceEvent) {
        self.events.push_back(event);
    }

    /// Peek at the front event without removing it
    #[must_use]
    pub fn head(&self) -> Option<&DeviceEvent> {
        self.events.front()
    }

    /// Remove the front event
    ///
    /// Callers must check [`EventQueue::head()`] first. Removing from an
    /// empty queue is a programming error.
    pub fn remove(&mut self) {
        let removed = self.events.pop_front();
        debug_assert!(removed.is_some());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    #[test]
    fn fifo_order() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.head(), None);

        queue.add(DeviceEvent::new(EventKind::DeviceAdded, "/dev/sda"));
        queue.add(DeviceEvent::new(EventKind::DiskAdded, "/dev/sda1"));
        queue.add(DeviceEvent::new(EventKind::DiskAdded, "/dev/sda2"));
        assert_eq!(queue.len(), 3);

        assert_eq!(
            queue.head(),
            Some(&DeviceEvent::new(EventKind::DeviceAdded, "/dev/sda"))
        );
        // Peeking must not mutate
        assert_eq!(queue.len(), 3);

        queue.remove();
        assert_eq!(
            queue.head(),
            Some(&DeviceEvent::new(EventKind::DiskAdded, "/dev/sda1"))
        );
        queue.remove();
        assert_eq!(
            queue.head(),
            Some(&DeviceEvent::new(EventKind::DiskAdded, "/dev/sda2"))
        );
        queue.remove();
        assert!(queue.is_empty());
        assert_eq!(queue.head(), None);
    }

    #[test]
    fn duplicates_are_preserved() {
        let mut queue = EventQueue::new();
        let event = DeviceEvent::new(EventKind::DiskChanged, "/dev/sdb1");
        queue.add(event.clone());
        queue.add(event.clone());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.head(), Some(&event));
        queue.remove();
        assert_eq!(queue.head(), Some(&event));
    }
}
