/// Handle returned by [`Observers::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// Synchronous subscriber list. Callbacks run in subscription order, inside `notify`.
pub struct Observers<E> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<E> Observers<E> {
    /// Register `callback`; it runs on every later `notify` until unsubscribed.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Call every subscriber with `event`.
    pub fn notify(&mut self, event: &E) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// No live subscriptions.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/projection/observer.rs"]
mod tests;
