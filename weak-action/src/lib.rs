//! Weak Action Library
//!
//! A deferred zero-argument callback that does not keep its owner alive.
//!
//! # Architecture
//!
//! A [`WeakAction`] is built from a [`Callable`] and a [`BindingConfig`]:
//! - Static callables (no receiver) are stored as-is and always run
//! - Bound callables keep only a weak handle to their receiver and are skipped
//!   once the receiver or the declared owner has been dropped
//! - `keep_target_alive` opts in to a strong handle, for closures whose
//!   captured state nothing else holds
//! - [`WeakAction::mark_for_deletion`] invalidates a binding immediately
//!
//! The library does NOT:
//! - Dispatch events to lists of subscribers
//! - Resolve methods from argument lists
//! - Synchronize concurrent invalidation (that needs `&mut`)
//!
//! Registration and fan-out belong to the caller.
//!
//! # Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use weak_action::{BindingConfig, Callable, WeakAction};
//!
//! struct View {
//!     redraws: AtomicUsize,
//! }
//!
//! impl View {
//!     fn redraw(&self) {
//!         self.redraws.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let view = Arc::new(View { redraws: AtomicUsize::new(0) });
//! let callable = Callable::method(&view, View::redraw);
//! let mut on_change = WeakAction::new(callable, BindingConfig::new());
//!
//! on_change.execute();
//! assert_eq!(view.redraws.load(Ordering::SeqCst), 1);
//!
//! // Unsubscribe without waiting for the view to go away
//! on_change.mark_for_deletion();
//! on_change.execute();
//! assert_eq!(view.redraws.load(Ordering::SeqCst), 1);
//! assert!(!on_change.is_alive());
//! ```

// Public modules
pub mod callable;
pub mod config;
pub mod types;
pub mod weak_action;

// Re-export main types for convenience
pub use callable::{Callable, MethodRef, StaticAction};
pub use config::BindingConfig;
pub use types::{Object, ObjectRef, Result, WeakActionError, WeakObjectRef};
pub use weak_action::WeakAction;

// Internal modules (not exposed in public API)
mod tracker;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
