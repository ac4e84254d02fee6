//! Subscription walkthrough
//!
//! Registers a few weak actions the way a notification hub would, then drops
//! and unsubscribes owners to show which callbacks still run.
//!
//! Usage:
//!   RUST_LOG=trace cargo run --example subscribe

use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use weak_action::{BindingConfig, Callable, WeakAction};

struct Panel {
    name: &'static str,
    refreshes: AtomicUsize,
}

impl Panel {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            refreshes: AtomicUsize::new(0),
        })
    }

    fn refresh(&self) {
        let count = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
        println!("  {} refreshed ({} total)", self.name, count);
    }
}

fn heartbeat() {
    println!("  heartbeat");
}

fn notify_all(round: usize, actions: &[WeakAction]) {
    println!("\nRound {}:", round);
    for action in actions {
        let name = action.method_name().unwrap_or("<invalidated>");
        if action.is_alive() {
            println!("  -> {}", name);
        } else {
            println!("  -> {} (dead, skipped)", name);
        }
        action.execute();
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let sidebar = Panel::new("sidebar");
    let editor = Panel::new("editor");
    let toasts = Arc::new(AtomicUsize::new(0));

    let toast_counter = toasts.clone();
    let mut actions = vec![
        WeakAction::new(Callable::function(heartbeat), BindingConfig::new()),
        WeakAction::new(Callable::method(&sidebar, Panel::refresh), BindingConfig::new()),
        WeakAction::new(Callable::method(&editor, Panel::refresh), BindingConfig::new()),
        // Nothing else holds this closure, so the binding must keep it alive
        WeakAction::with_target(
            Some(&editor),
            Callable::closure(&Arc::new(move || {
                toast_counter.fetch_add(1, Ordering::SeqCst);
            })),
            BindingConfig::new()
                .with_keep_target_alive(true)
                .with_method_name("show_toast"),
        ),
    ];

    notify_all(1, &actions);

    println!("\nClosing sidebar");
    drop(sidebar);
    notify_all(2, &actions);

    println!("\nUnsubscribing editor");
    actions[2].mark_for_deletion();
    notify_all(3, &actions);

    println!("\n=== SUMMARY ===");
    println!("Editor refreshes: {}", editor.refreshes.load(Ordering::SeqCst));
    println!("Toasts shown: {}", toasts.load(Ordering::SeqCst));

    actions.retain(WeakAction::is_alive);
    println!("Live bindings: {}", actions.len());

    Ok(())
}
