// Lifetime scenarios through the public API
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use weak_action::{BindingConfig, Callable, MethodRef, WeakAction, WeakActionError};

#[derive(Default)]
struct Subscriber {
    pings: AtomicUsize,
}

impl Subscriber {
    fn ping(&self) {
        self.pings.fetch_add(1, Ordering::SeqCst);
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn dropped_receiver_is_never_called() {
    init_logging();
    let a = Arc::new(Subscriber::default());
    let weak = Arc::downgrade(&a);
    let action = WeakAction::new(Callable::method(&a, Subscriber::ping), BindingConfig::new());

    drop(a);
    assert!(weak.upgrade().is_none());
    assert!(!action.is_alive());

    action.execute();
    assert!(action.target().is_none());
    assert_eq!(action.method_name(), Some("ping"));
}

#[test]
fn counter_stays_at_zero_after_drop() {
    let counter = Arc::new(AtomicUsize::new(0));

    struct Pinger {
        counter: Arc<AtomicUsize>,
    }

    impl Pinger {
        fn ping(&self) {
            self.counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    let a = Arc::new(Pinger { counter: counter.clone() });
    let action = WeakAction::new(Callable::method(&a, Pinger::ping), BindingConfig::new());

    drop(a);
    action.execute();
    action.execute();
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn kept_alive_receiver_is_still_called() {
    init_logging();
    let a = Arc::new(Subscriber::default());
    let weak = Arc::downgrade(&a);
    let action = WeakAction::new(
        Callable::method(&a, Subscriber::ping),
        BindingConfig::new().with_keep_target_alive(true),
    );

    drop(a);
    let still_there = weak.upgrade().expect("binding keeps the receiver alive");
    assert!(action.is_alive());

    action.execute();
    assert_eq!(still_there.pings.load(Ordering::SeqCst), 1);

    drop(still_there);
    drop(action);
    assert!(weak.upgrade().is_none());
}

#[test]
fn closure_without_keep_alive_dies_with_its_handle() {
    let hits = Arc::new(AtomicUsize::new(0));
    let owner = Arc::new(Subscriber::default());

    let captured = hits.clone();
    let closure = Arc::new(move || {
        captured.fetch_add(1, Ordering::SeqCst);
    });
    let action =
        WeakAction::with_target(Some(&owner), Callable::closure(&closure), BindingConfig::new());

    action.execute();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    drop(closure);
    assert!(!action.is_alive());
    assert_eq!(action.try_execute(), Err(WeakActionError::ReceiverDropped));
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // The owner is still around even though the closure is not
    assert!(action.target().is_some());
}

#[test]
fn kept_alive_closure_outlives_its_owner() {
    let hits = Arc::new(AtomicUsize::new(0));
    let owner = Arc::new(Subscriber::default());

    let captured = hits.clone();
    let action = WeakAction::with_target(
        Some(&owner),
        Callable::closure(&Arc::new(move || {
            captured.fetch_add(1, Ordering::SeqCst);
        })),
        BindingConfig::new().with_keep_target_alive(true),
    );

    action.execute();
    action.execute();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert!(action.target_as::<Subscriber>().is_some());

    drop(owner);
    assert!(action.target().is_none());
    assert!(action.is_alive());
    assert_eq!(action.try_execute(), Ok(()));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[test]
fn invalidation_is_idempotent() {
    let a = Arc::new(Subscriber::default());
    let mut action = WeakAction::new(Callable::method(&a, Subscriber::ping), BindingConfig::new());

    action.mark_for_deletion();
    let once = (action.is_alive(), action.target().is_none(), action.method_name().is_none());
    action.mark_for_deletion();
    let twice = (action.is_alive(), action.target().is_none(), action.method_name().is_none());

    assert_eq!(once, (false, true, true));
    assert_eq!(once, twice);

    action.execute();
    assert_eq!(a.pings.load(Ordering::SeqCst), 0);
}

#[test]
fn invalidated_static_action_never_runs() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    fn tick() {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }

    let mut action = WeakAction::new(Callable::function(tick), BindingConfig::new());
    assert!(action.is_alive());
    assert_eq!(action.method_name(), Some("tick"));
    action.execute();

    action.mark_for_deletion();
    action.execute();
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    assert!(!action.is_alive());
}

#[test]
fn panics_propagate_to_caller() {
    fn explode() {
        panic!("boom");
    }

    let action = WeakAction::new(Callable::function(explode), BindingConfig::new());
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| action.execute()));
    assert!(result.is_err());
}

#[test]
fn shared_across_threads() {
    let a = Arc::new(Subscriber::default());
    let action = Arc::new(Mutex::new(WeakAction::new(
        Callable::method(&a, Subscriber::ping),
        BindingConfig::new(),
    )));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let action = action.clone();
            std::thread::spawn(move || action.lock().unwrap().execute())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(a.pings.load(Ordering::SeqCst), 4);

    action.lock().unwrap().mark_for_deletion();
    action.lock().unwrap().execute();
    assert_eq!(a.pings.load(Ordering::SeqCst), 4);
}

#[test]
fn receiver_of_the_wrong_type_is_reported() {
    let a = Arc::new(Subscriber::default());
    let callable = Callable::Bound {
        receiver: Arc::new(String::from("not a subscriber")),
        method: MethodRef::new(Subscriber::ping),
    };
    let action = WeakAction::with_target(Some(&a), callable, BindingConfig::new());

    assert_eq!(action.try_execute(), Err(WeakActionError::ReceiverMismatch));
    assert_eq!(a.pings.load(Ordering::SeqCst), 0);
}

#[test]
fn config_from_json() {
    let json = r#"{ "keep_target_alive": true, "method_name": "on_saved" }"#;
    let config: BindingConfig = serde_json::from_str(json).unwrap();

    let a = Arc::new(Subscriber::default());
    let action = WeakAction::new(Callable::method(&a, Subscriber::ping), config);
    assert_eq!(action.method_name(), Some("on_saved"));
    assert_eq!(Arc::strong_count(&a), 2);
}
