//=========================================================================
// Event Queue
//
// FIFO buffer between the platform backend (producer) and the polling
// application (consumer).
//
// Responsibilities:
// - Preserve native delivery order within one window
// - Grow on demand (unbounded by default)
// - Optionally cap memory: when a limit is configured, the oldest
//   pending event is discarded to make room
//
// Notes:
// No internal locking. The producer and consumer are the same thread in
// every backend of this crate; callers that split them must synchronize
// externally.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::VecDeque;

//=== External Crates =====================================================
use log::warn;

//=== Internal Modules ====================================================
use crate::core::event::Event;

//=== EventQueue ==========================================================

/// Ordered, growable buffer of pending [`Event`]s for one window.
#[derive(Debug)]
pub struct EventQueue {
    events: VecDeque<Event>,
    limit: Option<usize>,
    dropped: u64,
    overflowing: bool,
}

impl EventQueue {
    //--- Construction -----------------------------------------------------

    /// Creates an unbounded queue.
    pub fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: VecDeque::with_capacity(BASE_CAPACITY),
            limit: None,
            dropped: 0,
            overflowing: false,
        }
    }

    /// Creates a queue holding at most `limit` events (`None` = unbounded).
    ///
    /// # Panics
    ///
    /// Panics if `limit == Some(0)`.
    pub fn with_limit(limit: Option<usize>) -> Self {
        assert!(limit != Some(0), "Event queue limit must be positive");
        Self {
            limit,
            ..Self::new()
        }
    }

    //--- Producer ---------------------------------------------------------

    /// Appends an event at the tail.
    ///
    /// With a limit configured and the queue full, the head event is
    /// discarded first. The first discard of an overflow episode is logged;
    /// the episode ends once the consumer drains the queue.
    pub fn push(&mut self, event: Event) {
        if let Some(limit) = self.limit {
            if self.events.len() >= limit {
                self.events.pop_front();
                self.dropped += 1;
                if !self.overflowing {
                    self.overflowing = true;
                    warn!(
                        target: "platform::input",
                        "Event queue full ({} events), discarding oldest",
                        limit
                    );
                }
            }
        }
        self.events.push_back(event);
    }

    //--- Consumer ---------------------------------------------------------

    /// Removes and returns the head event, or `None` when empty.
    pub fn pop(&mut self) -> Option<Event> {
        let event = self.events.pop_front();
        if self.events.is_empty() {
            self.overflowing = false;
        }
        event
    }

    //--- Utilities --------------------------------------------------------

    /// Discards every pending event while keeping the allocation.
    pub fn clear(&mut self) {
        self.events.clear();
        self.overflowing = false;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Total events discarded because of the limit.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: i32) -> Event {
        Event::MouseMoved { x, y: 0 }
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut queue = EventQueue::new();
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn preserves_fifo_order() {
        let mut queue = EventQueue::new();
        queue.push(Event::GainedFocus);
        queue.push(moved(1));
        queue.push(Event::Closed);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(Event::GainedFocus));
        assert_eq!(queue.pop(), Some(moved(1)));
        assert_eq!(queue.pop(), Some(Event::Closed));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn unbounded_queue_grows_without_dropping() {
        let mut queue = EventQueue::new();
        for i in 0..10_000 {
            queue.push(moved(i));
        }
        assert_eq!(queue.len(), 10_000);
        assert_eq!(queue.dropped(), 0);
        assert_eq!(queue.pop(), Some(moved(0)));
    }

    #[test]
    fn limited_queue_discards_oldest() {
        let mut queue = EventQueue::with_limit(Some(3));
        for i in 0..5 {
            queue.push(moved(i));
        }

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dropped(), 2);
        assert_eq!(queue.pop(), Some(moved(2)));
        assert_eq!(queue.pop(), Some(moved(3)));
        assert_eq!(queue.pop(), Some(moved(4)));
    }

    #[test]
    #[should_panic(expected = "limit must be positive")]
    fn zero_limit_is_rejected() {
        let _ = EventQueue::with_limit(Some(0));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut queue = EventQueue::new();
        for i in 0..256 {
            queue.push(moved(i));
        }
        let capacity = queue.events.capacity();

        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.events.capacity(), capacity);
    }
}
