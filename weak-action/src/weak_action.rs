//! Weak action API
//!
//! [`WeakAction`] is the entry point of the library. It stores a callable without
//! keeping the callable's owner alive, and at call time either runs the callable
//! or does nothing if the owner is gone.

use crate::callable::{Callable, MethodRef, StaticAction};
use crate::config::BindingConfig;
use crate::tracker::TargetTracker;
use crate::types::{erase, ObjectRef, Result, WeakActionError};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A deferred zero-argument callback that does not keep its owner alive
///
/// Exactly one of the static action or the method descriptor is set from
/// construction until [`WeakAction::mark_for_deletion`] clears both.
#[derive(Clone, Default)]
pub struct WeakAction {
    static_action: Option<StaticAction>,
    method: Option<MethodRef>,
    tracker: TargetTracker,
}

impl WeakAction {
    /// Create a binding whose owner is the callable's own receiver
    ///
    /// Static callables have no receiver, so the binding has no owner and stays
    /// alive until invalidated.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use weak_action::{BindingConfig, Callable, WeakAction};
    ///
    /// struct Counter(AtomicUsize);
    ///
    /// impl Counter {
    ///     fn ping(&self) {
    ///         self.0.fetch_add(1, Ordering::SeqCst);
    ///     }
    /// }
    ///
    /// let counter = Arc::new(Counter(AtomicUsize::new(0)));
    /// let callable = Callable::method(&counter, Counter::ping);
    /// let action = WeakAction::new(callable, BindingConfig::new());
    ///
    /// action.execute();
    /// assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    ///
    /// drop(counter);
    /// assert!(!action.is_alive());
    /// action.execute();
    /// ```
    pub fn new(callable: Callable, config: BindingConfig) -> Self {
        let owner = callable.receiver().cloned();
        Self::build(owner, callable, config)
    }

    /// Create a binding gated on an explicit owner
    ///
    /// For a static callable the owner only affects [`WeakAction::is_alive`];
    /// for a bound callable the owner must also be alive for the call to run.
    pub fn with_target<T>(
        target: Option<&Arc<T>>,
        callable: Callable,
        config: BindingConfig,
    ) -> Self
    where
        T: Any + Send + Sync,
    {
        let owner = target.map(erase);
        Self::build(owner, callable, config)
    }

    fn build(owner: Option<ObjectRef>, callable: Callable, config: BindingConfig) -> Self {
        let action = match callable {
            Callable::Static(mut action) => {
                if let Some(name) = config.method_name {
                    action = action.named(name);
                }
                Self {
                    static_action: Some(action),
                    method: None,
                    tracker: TargetTracker::for_static(owner.as_ref()),
                }
            }
            Callable::Bound { receiver, mut method } => {
                if let Some(name) = config.method_name {
                    method = method.named(name);
                }
                Self {
                    static_action: None,
                    method: Some(method),
                    tracker: TargetTracker::for_bound(
                        &receiver,
                        owner.as_ref(),
                        config.keep_target_alive,
                    ),
                }
            }
        };

        log::debug!(
            "Created {} weak action '{}' (owner: {}, keep alive: {})",
            if action.is_static() { "static" } else { "bound" },
            action.method_name().unwrap_or_default(),
            owner.is_some(),
            action.tracker.keeps_receiver_alive()
        );
        action
    }

    /// True if the wrapped callable has no receiver
    pub fn is_static(&self) -> bool {
        self.static_action.is_some()
    }

    /// Diagnostic name of the wrapped function or method; `None` once invalidated
    pub fn method_name(&self) -> Option<&str> {
        if let Some(action) = &self.static_action {
            return Some(action.name());
        }
        self.method.as_ref().map(MethodRef::name)
    }

    /// Whether a call would currently run
    ///
    /// This is a snapshot; the owner may be dropped right after. Use
    /// [`WeakAction::execute`] to check and call in one step.
    pub fn is_alive(&self) -> bool {
        self.liveness().is_ok()
    }

    /// The owner, if it is still reachable
    pub fn target(&self) -> Option<ObjectRef> {
        self.tracker.target()
    }

    /// The owner downcast to `T`
    pub fn target_as<T>(&self) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.target()?.downcast::<T>().ok()
    }

    /// Effective receiver of a bound method, the kept-alive handle first
    pub(crate) fn receiver(&self) -> Option<ObjectRef> {
        self.tracker.resolve_receiver()
    }

    /// Run the callable if its owner is alive, otherwise do nothing
    ///
    /// Panics raised by the callable propagate to the caller.
    pub fn execute(&self) {
        if let Err(reason) = self.try_execute() {
            log::trace!(
                "Skipped weak action '{}': {}",
                self.method_name().unwrap_or("<invalidated>"),
                reason
            );
        }
    }

    /// Like [`WeakAction::execute`], but report why the call was skipped
    ///
    /// Static actions always run, even when their declared owner is gone.
    pub fn try_execute(&self) -> Result<()> {
        if let Some(action) = &self.static_action {
            action.invoke();
            return Ok(());
        }

        let method = self.method.as_ref().ok_or(WeakActionError::Invalidated)?;
        // Held across the liveness check and the call so the receiver cannot drop in between
        let receiver = self.receiver().ok_or(WeakActionError::ReceiverDropped)?;
        self.liveness()?;

        method.invoke(&*receiver)
    }

    /// Permanently invalidate the binding
    ///
    /// Drops every handle, including a kept-alive receiver. Idempotent.
    pub fn mark_for_deletion(&mut self) {
        if self.static_action.is_some() || self.method.is_some() {
            log::debug!(
                "Marking weak action '{}' for deletion",
                self.method_name().unwrap_or_default()
            );
        }
        self.static_action = None;
        self.method = None;
        self.tracker.clear();
    }

    fn liveness(&self) -> Result<()> {
        if self.static_action.is_none() && self.tracker.is_empty() {
            return Err(WeakActionError::Invalidated);
        }

        if self.static_action.is_some() {
            return if self.tracker.owner_alive() {
                Ok(())
            } else {
                Err(WeakActionError::OwnerDropped)
            };
        }

        if self.method.is_none() {
            return Err(WeakActionError::Invalidated);
        }
        if self.tracker.keeps_receiver_alive() {
            return Ok(());
        }
        if !self.tracker.receiver_alive() {
            return Err(WeakActionError::ReceiverDropped);
        }
        if !self.tracker.owner_alive() {
            return Err(WeakActionError::OwnerDropped);
        }
        Ok(())
    }
}

impl fmt::Debug for WeakAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakAction")
            .field("method_name", &self.method_name())
            .field("is_static", &self.is_static())
            .field("is_alive", &self.is_alive())
            .field("tracker", &self.tracker)
            .finish()
    }
}
