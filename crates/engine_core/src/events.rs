//! Subscription-based event channels.
//!
//! Producers publish between ticks; each subscriber owns a queue that it drains
//! at the start of its own tick. Unsubscribing drops the queue, so nothing
//! published before or after the detach reaches the old subscriber.

use std::collections::VecDeque;

/// Handle returned by [`EventChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug)]
struct Subscriber<E> {
    id: SubscriptionId,
    queue: VecDeque<E>,
}

/// Fan-out queue of events of one kind.
#[derive(Debug)]
pub struct EventChannel<E> {
    next_id: u64,
    subscribers: Vec<Subscriber<E>>,
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<E: Clone> EventChannel<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a new subscriber. Only events published after this call are delivered.
    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            queue: VecDeque::new(),
        });
        id
    }

    /// Detach a subscriber and discard its pending events. Returns false if
    /// the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        let removed = self.subscribers.len() != before;
        if !removed {
            log::debug!("unsubscribe of unknown subscription {:?}", id);
        }
        removed
    }

    /// Number of attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Queue an event for every current subscriber. Returns how many received it.
    pub fn publish(&mut self, event: E) -> usize {
        for subscriber in &mut self.subscribers {
            subscriber.queue.push_back(event.clone());
        }
        self.subscribers.len()
    }

    /// Take every pending event for `id`, oldest first. Unknown ids get nothing.
    pub fn drain(&mut self, id: SubscriptionId) -> Vec<E> {
        self.subscribers
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| s.queue.drain(..).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_subscriber_gets_its_own_copy() {
        let mut channel = EventChannel::new();
        let a = channel.subscribe();
        let b = channel.subscribe();
        assert_eq!(channel.publish(7u32), 2);
        assert_eq!(channel.drain(a), vec![7]);
        assert_eq!(channel.drain(b), vec![7]);
        assert!(channel.drain(a).is_empty());
    }

    #[test]
    fn events_before_subscribe_are_not_delivered() {
        let mut channel = EventChannel::new();
        channel.publish(1u32);
        let id = channel.subscribe();
        channel.publish(2);
        assert_eq!(channel.drain(id), vec![2]);
    }

    #[test]
    fn unsubscribe_discards_pending_and_future_events() {
        let mut channel = EventChannel::new();
        let id = channel.subscribe();
        channel.publish("queued");
        assert!(channel.unsubscribe(id));
        channel.publish("late");
        assert_eq!(channel.subscriber_count(), 0);
        assert!(channel.drain(id).is_empty());
        assert!(!channel.unsubscribe(id));
    }

    #[test]
    fn resubscribe_gets_fresh_id() {
        let mut channel: EventChannel<u8> = EventChannel::new();
        let first = channel.subscribe();
        channel.unsubscribe(first);
        let second = channel.subscribe();
        assert_ne!(first, second);
        assert_eq!(channel.subscriber_count(), 1);
    }
}
