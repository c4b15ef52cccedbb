//! Typed callback registry for consumers of formatted records.

use p3a_interfaces::SubscriptionId;
use std::fmt;

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Callbacks notified, in subscription order, for every event of type `T`.
pub struct SubscriberList<T> {
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Default for SubscriberList<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            subscribers: Vec::new(),
        }
    }
}

impl<T> SubscriberList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` and returns the id needed to remove it again.
    /// Ids are never reused.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        log::debug!("Added subscriber {}", id);
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        let removed = self.subscribers.len() != before;
        if !removed {
            log::warn!("Attempted to remove unknown subscriber {}", id);
        }
        removed
    }

    pub fn notify(&self, event: &T) {
        for (_, callback) in &self.subscribers {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<T> fmt::Debug for SubscriberList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<SubscriptionId> = self.subscribers.iter().map(|(id, _)| *id).collect();
        f.debug_struct("SubscriberList")
            .field("next_id", &self.next_id)
            .field("subscribers", &ids)
            .finish()
    }
}
