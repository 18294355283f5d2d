//! Shared coordination point over one broadcast hub.
//!
//! Constructed once at startup and handed to every component by `Rc`.

use super::hub::BroadcastHub;
use super::{Observer, PublishError};
use crate::model::snapshot::Snapshot;
use std::rc::Rc;

/// Facade delegating 1:1 to a single `BroadcastHub`.
#[derive(Default)]
pub struct Controller {
    hub: BroadcastHub,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the shared handle passed to components.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    pub fn attach(&self, observer: Rc<dyn Observer>) {
        self.hub.subscribe(observer);
    }

    pub fn detach(&self, observer: &Rc<dyn Observer>) -> bool {
        self.hub.unsubscribe(observer)
    }

    pub fn publish(&self, snapshot: &Snapshot) -> Result<(), PublishError> {
        self.hub.publish(snapshot)
    }

    /// Publishes the empty snapshot (`{}`) used when no payload is given.
    pub fn publish_default(&self) -> Result<(), PublishError> {
        self.hub.publish(&Snapshot::default())
    }

    pub fn observer_count(&self) -> usize {
        self.hub.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Controller;
    use crate::broadcast::{Observer, ObserverError};
    use crate::model::snapshot::Snapshot;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct LastSeen {
        seen: RefCell<Vec<Snapshot>>,
    }

    impl Observer for LastSeen {
        fn name(&self) -> &str {
            "last_seen"
        }

        fn update(&self, snapshot: &Snapshot) -> Result<(), ObserverError> {
            self.seen.borrow_mut().push(snapshot.clone());
            Ok(())
        }
    }

    #[test]
    fn publish_default_delivers_empty_snapshot() {
        let controller = Controller::new();
        let observer = Rc::new(LastSeen::default());
        controller.attach(observer.clone());

        controller.publish_default().unwrap();

        assert_eq!(*observer.seen.borrow(), vec![Snapshot::default()]);
    }

    #[test]
    fn detach_reports_membership() {
        let controller = Controller::new();
        let observer: Rc<dyn Observer> = Rc::new(LastSeen::default());
        controller.attach(Rc::clone(&observer));

        assert_eq!(controller.observer_count(), 1);
        assert!(controller.detach(&observer));
        assert!(!controller.detach(&observer));
        assert_eq!(controller.observer_count(), 0);
    }
}
