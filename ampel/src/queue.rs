//! A generic, unbounded handoff queue with a suspending receive side.
//!
//! This is the synchronization primitive the light uses to announce phase
//! changes to observers. Producers push and wake exactly one waiting
//! consumer; consumers suspend until a value is available instead of
//! polling. Removal order is FIFO: observers see historical events in the
//! exact order they were produced, which the phase-waiting logic relies on.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tokio::sync::Notify;

/// An unbounded FIFO queue that suspends consumers until data arrives.
///
/// Every value passed to [`send`](BlockingQueue::send) is returned by
/// exactly one [`receive`](BlockingQueue::receive) call; nothing is
/// duplicated or lost. With several consumers blocked at once, each `send`
/// wakes exactly one of them, so values are handed off rather than
/// broadcast.
#[derive(Debug)]
pub struct BlockingQueue<T> {
    items: Mutex<VecDeque<T>>,
    available: Notify,
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BlockingQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Notify::new(),
        }
    }

    /// Appends a value and wakes one waiting consumer, if any.
    ///
    /// Never suspends and never fails; the queue is unbounded. Safe to
    /// call from synchronous or asynchronous code. If no consumer is
    /// currently parked, the wakeup is stored so the next `receive` cannot
    /// miss it.
    pub fn send(&self, value: T) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(value);
        self.available.notify_one();
    }

    /// Removes and returns the oldest value, suspending until one exists.
    ///
    /// The non-empty predicate is re-checked after every wakeup, so a
    /// consumer that was woken but lost the race to another consumer simply
    /// goes back to waiting. The internal lock is only held for the pop
    /// itself, never across a suspension point.
    pub async fn receive(&self) -> T {
        loop {
            // A send landing between the empty check and the await still
            // wakes us: with no parked waiter, notify_one stores a permit
            // that awaiting this future consumes.
            let notified = self.available.notified();

            if let Some(value) = self
                .items
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
            {
                return value;
            }

            notified.await;
        }
    }

    /// Returns the number of values currently queued.
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no values are currently queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn delivers_values_in_fifo_order() {
        let queue = BlockingQueue::new();
        for n in 0..8 {
            queue.send(n);
        }
        for n in 0..8 {
            assert_eq!(queue.receive().await, n);
        }
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn receive_suspends_until_a_send_arrives() {
        let queue = Arc::new(BlockingQueue::new());

        let consumer = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.receive().await })
        };

        // Give the consumer time to park on the empty queue.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!consumer.is_finished());

        queue.send(42u32);

        let received = tokio::time::timeout(Duration::from_secs(1), consumer)
            .await
            .expect("receiver should unblock promptly after the send")
            .expect("receiver task should not panic");
        assert_eq!(received, 42);
    }

    #[tokio::test]
    async fn send_before_park_is_not_lost() {
        let queue = BlockingQueue::new();
        queue.send("early");
        // The wakeup permit from the send above must survive until the
        // first receive, even though nobody was waiting yet.
        assert_eq!(queue.receive().await, "early");
    }

    #[tokio::test]
    async fn each_value_is_consumed_exactly_once() {
        let queue = Arc::new(BlockingQueue::new());
        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                tokio::spawn(async move { queue.receive().await })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(50)).await;
        for n in 0..4u32 {
            queue.send(n);
        }

        let mut seen: Vec<u32> = Vec::new();
        for consumer in consumers {
            let value = tokio::time::timeout(Duration::from_secs(1), consumer)
                .await
                .expect("every consumer should be woken")
                .expect("consumer task should not panic");
            seen.push(value);
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert!(queue.is_empty());
    }
}
