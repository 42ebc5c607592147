use std::{cell::RefCell, rc::Rc};

use crate::{
    clock::Clock,
    dashboard::Dashboard,
    feed::{SnapshotFeed, SubscriptionId},
};

/// A dashboard kept up to date by a [SnapshotFeed].
///
/// Each published snapshot recomputes the dashboard using the clock's date
/// at the time of publication.
pub struct LiveDashboard {
    current: Rc<RefCell<Option<Dashboard>>>,
    subscription: SubscriptionId,
}

impl LiveDashboard {
    /// Subscribe a new dashboard to `feed`.
    pub fn follow<C>(feed: &mut SnapshotFeed, clock: C) -> Self
    where
        C: Clock + 'static,
    {
        let current = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&current);

        let subscription = feed.subscribe(move |snapshot| {
            *sink.borrow_mut() = Some(Dashboard::compute(snapshot, clock.today()));
        });

        Self {
            current,
            subscription,
        }
    }

    /// The dashboard for the latest snapshot, if one has been published.
    pub fn current(&self) -> Option<Dashboard> {
        self.current.borrow().clone()
    }

    /// Stop following `feed`. The last computed dashboard stays available.
    pub fn detach(&self, feed: &mut SnapshotFeed) -> bool {
        feed.unsubscribe(self.subscription)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        clock::FixedClock,
        dashboard::LiveDashboard,
        feed::SnapshotFeed,
        snapshot::Snapshot,
        test_utils::{expense, income},
    };

    #[test]
    fn recomputes_on_each_publish() {
        let mut feed = SnapshotFeed::new();
        let live = LiveDashboard::follow(&mut feed, FixedClock(date!(2025 - 06 - 18)));
        assert_eq!(live.current(), None);

        feed.publish(Snapshot::new(
            vec![income("a", 100.0, date!(2025 - 06 - 01), "salary")],
            Vec::new(),
        ));
        assert_eq!(live.current().unwrap().totals.net, 100.0);

        feed.publish(Snapshot::new(
            vec![
                income("a", 100.0, date!(2025 - 06 - 01), "salary"),
                expense("b", 30.0, date!(2025 - 06 - 02), "food"),
            ],
            Vec::new(),
        ));
        assert_eq!(live.current().unwrap().totals.net, 70.0);
    }

    #[test]
    fn detached_dashboard_keeps_last_value() {
        let mut feed = SnapshotFeed::new();
        let live = LiveDashboard::follow(&mut feed, FixedClock(date!(2025 - 06 - 18)));
        feed.publish(Snapshot::new(
            vec![income("a", 100.0, date!(2025 - 06 - 01), "salary")],
            Vec::new(),
        ));

        assert!(live.detach(&mut feed));
        feed.publish(Snapshot::default());

        assert_eq!(live.current().unwrap().totals.income, 100.0);
    }
}
