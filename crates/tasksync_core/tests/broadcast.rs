use std::cell::RefCell;
use std::rc::Rc;
use tasksync_core::{Controller, Observer, ObserverError, Snapshot, TaskStore};

struct Counter {
    name: &'static str,
    received: RefCell<Vec<Snapshot>>,
}

impl Counter {
    fn new(name: &'static str) -> Rc<Self> {
        Rc::new(Self {
            name,
            received: RefCell::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.received.borrow().len()
    }
}

impl Observer for Counter {
    fn name(&self) -> &str {
        self.name
    }

    fn update(&self, snapshot: &Snapshot) -> Result<(), ObserverError> {
        self.received.borrow_mut().push(snapshot.clone());
        Ok(())
    }
}

#[test]
fn detached_observer_no_longer_receives_publishes() {
    let controller = Controller::new();
    let kept = Counter::new("kept");
    let dropped = Counter::new("dropped");
    let dropped_handle: Rc<dyn Observer> = dropped.clone();
    controller.attach(kept.clone());
    controller.attach(Rc::clone(&dropped_handle));

    assert!(controller.detach(&dropped_handle));
    controller.publish(&Snapshot::default()).unwrap();

    assert_eq!(kept.calls(), 1);
    assert_eq!(dropped.calls(), 0);
}

#[test]
fn detaching_unknown_observer_leaves_registry_unchanged() {
    let controller = Controller::new();
    let registered = Counter::new("registered");
    let stranger: Rc<dyn Observer> = Counter::new("stranger");
    controller.attach(registered.clone());

    assert!(!controller.detach(&stranger));
    assert_eq!(controller.observer_count(), 1);

    controller.publish_default().unwrap();
    assert_eq!(registered.calls(), 1);
}

#[test]
fn duplicate_registration_delivers_twice_per_publish() {
    let controller = Controller::new();
    let observer = Counter::new("twice");
    controller.attach(observer.clone());
    controller.attach(observer.clone());

    controller.publish_default().unwrap();

    assert_eq!(controller.observer_count(), 2);
    assert_eq!(observer.calls(), 2);
}

#[test]
fn observers_see_snapshots_in_publish_order() {
    let controller = Rc::new(Controller::new());
    let observer = Counter::new("ordered");
    controller.attach(observer.clone());
    let mut store = TaskStore::new(Rc::clone(&controller));

    store.add("first").unwrap();
    store.add("second").unwrap();

    let received = observer.received.borrow();
    let pending_counts: Vec<usize> = received.iter().map(Snapshot::pending_count).collect();
    assert_eq!(pending_counts, vec![1, 2]);
}
