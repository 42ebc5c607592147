//! Publish snapshots to observers that recompute derived views.

use crate::snapshot::Snapshot;

/// Identifies a subscription so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Snapshot)>;

/// Holds the latest [Snapshot] and notifies subscribers whenever a new one
/// is published.
#[derive(Default)]
pub struct SnapshotFeed {
    latest: Option<Snapshot>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl SnapshotFeed {
    /// Create a feed with no snapshot and no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `subscriber`.
    ///
    /// If a snapshot has already been published the subscriber is called with
    /// it straight away.
    pub fn subscribe<F>(&mut self, mut subscriber: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        if let Some(snapshot) = &self.latest {
            subscriber(snapshot);
        }

        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns whether `id` was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(subscribed, _)| *subscribed != id);
        before != self.subscribers.len()
    }

    /// Replace the latest snapshot and notify every subscriber in the order
    /// they subscribed.
    pub fn publish(&mut self, snapshot: Snapshot) {
        tracing::debug!(
            "Publishing snapshot with {} transactions and {} goals to {} subscribers",
            snapshot.transactions.len(),
            snapshot.goals.len(),
            self.subscribers.len()
        );

        for (_, subscriber) in &mut self.subscribers {
            subscriber(&snapshot);
        }

        self.latest = Some(snapshot);
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    /// How many subscribers are registered.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use time::macros::date;

    use crate::{feed::SnapshotFeed, snapshot::Snapshot, test_utils::expense};

    fn snapshot_with(count: usize) -> Snapshot {
        let transactions = (0..count)
            .map(|i| expense(&i.to_string(), 1.0, date!(2025 - 01 - 01), "food"))
            .collect();

        Snapshot::new(transactions, Vec::new())
    }

    #[test]
    fn publish_notifies_subscribers() {
        let mut feed = SnapshotFeed::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        feed.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.transactions.len()));

        feed.publish(snapshot_with(1));
        feed.publish(snapshot_with(3));

        assert_eq!(*seen.borrow(), vec![1, 3]);
        assert_eq!(feed.latest().map(|s| s.transactions.len()), Some(3));
    }

    #[test]
    fn late_subscriber_receives_latest_snapshot() {
        let mut feed = SnapshotFeed::new();
        feed.publish(snapshot_with(2));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        feed.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.transactions.len()));

        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn unsubscribed_observer_is_not_notified() {
        let mut feed = SnapshotFeed::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = feed.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(feed.unsubscribe(id));
        assert!(!feed.unsubscribe(id));
        feed.publish(snapshot_with(1));

        assert_eq!(*calls.borrow(), 0);
        assert_eq!(feed.subscriber_count(), 0);
    }
}
