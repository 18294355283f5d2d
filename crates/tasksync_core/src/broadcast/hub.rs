//! Observer registry and fan-out.

use super::{Observer, PublishError};
use crate::model::snapshot::Snapshot;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;

/// Ordered observer registry with synchronous delivery.
#[derive(Default)]
pub struct BroadcastHub {
    observers: RefCell<Vec<Rc<dyn Observer>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an observer to the registry.
    ///
    /// No duplicate check: an observer added twice is delivered to twice.
    pub fn subscribe(&self, observer: Rc<dyn Observer>) {
        debug!(
            "event=observer_attach module=broadcast name={}",
            observer.name()
        );
        self.observers.borrow_mut().push(observer);
    }

    /// Removes the first registered occurrence of `observer` by identity.
    ///
    /// Returns `false` and leaves the registry untouched when absent.
    pub fn unsubscribe(&self, observer: &Rc<dyn Observer>) -> bool {
        let mut observers = self.observers.borrow_mut();
        let Some(position) = observers
            .iter()
            .position(|registered| same_observer(registered, observer))
        else {
            return false;
        };

        observers.remove(position);
        debug!(
            "event=observer_detach module=broadcast name={} position={}",
            observer.name(),
            position
        );
        true
    }

    /// Delivers `snapshot` to every observer in registration order.
    ///
    /// # Errors
    /// Returns the first observer failure; observers registered after the
    /// failing one do not receive this snapshot.
    pub fn publish(&self, snapshot: &Snapshot) -> Result<(), PublishError> {
        // Observers may attach/detach while handling an update; deliver to
        // the registry as it was when publishing started.
        let observers = self.observers.borrow().clone();
        debug!(
            "event=publish module=broadcast observers={} pending={} completed={}",
            observers.len(),
            snapshot.pending_count(),
            snapshot.completed_count()
        );

        for (position, observer) in observers.iter().enumerate() {
            if let Err(source) = observer.update(snapshot) {
                warn!(
                    "event=publish module=broadcast status=error observer={} position={} error={}",
                    observer.name(),
                    position,
                    source
                );
                return Err(PublishError {
                    observer: observer.name().to_string(),
                    position,
                    source,
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.borrow().is_empty()
    }
}

fn same_observer(left: &Rc<dyn Observer>, right: &Rc<dyn Observer>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(left), Rc::as_ptr(right))
}

#[cfg(test)]
mod tests {
    use super::BroadcastHub;
    use crate::broadcast::{Observer, ObserverError};
    use crate::model::snapshot::Snapshot;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Observer for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn update(&self, _snapshot: &Snapshot) -> Result<(), ObserverError> {
            self.log.borrow_mut().push(self.name);
            Ok(())
        }
    }

    struct Failing {
        calls: Cell<usize>,
    }

    impl Observer for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn update(&self, _snapshot: &Snapshot) -> Result<(), ObserverError> {
            self.calls.set(self.calls.get() + 1);
            Err(ObserverError::Rejected("boom".to_string()))
        }
    }

    fn recorder(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Rc<dyn Observer> {
        Rc::new(Recorder {
            name,
            log: Rc::clone(log),
        })
    }

    #[test]
    fn publish_delivers_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let hub = BroadcastHub::new();
        hub.subscribe(recorder("list", &log));
        hub.subscribe(recorder("summary", &log));
        hub.subscribe(recorder("storage", &log));

        hub.publish(&Snapshot::default()).unwrap();

        assert_eq!(*log.borrow(), vec!["list", "summary", "storage"]);
    }

    #[test]
    fn unsubscribe_removes_only_first_occurrence() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let hub = BroadcastHub::new();
        let twice = recorder("twice", &log);
        hub.subscribe(Rc::clone(&twice));
        hub.subscribe(Rc::clone(&twice));

        assert!(hub.unsubscribe(&twice));
        assert_eq!(hub.len(), 1);

        hub.publish(&Snapshot::default()).unwrap();
        assert_eq!(*log.borrow(), vec!["twice"]);
    }

    #[test]
    fn unsubscribe_distinguishes_observers_with_same_name() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let hub = BroadcastHub::new();
        let registered = recorder("same", &log);
        let stranger = recorder("same", &log);
        hub.subscribe(Rc::clone(&registered));

        assert!(!hub.unsubscribe(&stranger));
        assert_eq!(hub.len(), 1);
    }

    #[test]
    fn failing_observer_stops_fan_out() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let hub = BroadcastHub::new();
        let failing = Rc::new(Failing {
            calls: Cell::new(0),
        });
        hub.subscribe(recorder("before", &log));
        hub.subscribe(failing.clone());
        hub.subscribe(recorder("after", &log));

        let err = hub.publish(&Snapshot::default()).unwrap_err();

        assert_eq!(err.observer, "failing");
        assert_eq!(err.position, 1);
        assert_eq!(failing.calls.get(), 1);
        assert_eq!(*log.borrow(), vec!["before"]);
    }

    #[test]
    fn publish_on_empty_registry_is_ok() {
        let hub = BroadcastHub::new();
        assert!(hub.is_empty());
        hub.publish(&Snapshot::default()).unwrap();
    }
}
