//! Target tracking
//!
//! Holds the handles that decide whether a binding may still run: a weak handle
//! to the logical owner, a weak handle to the method's receiver, and optionally a
//! strong handle to the receiver when the caller asked for it to be kept alive.
//! Owner and receiver are tracked separately because they are often different
//! objects (a closure's captured state vs. the subscriber that registered it).

use crate::types::{ObjectRef, WeakObjectRef};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Default)]
pub(crate) struct TargetTracker {
    owner: Option<WeakObjectRef>,
    receiver: Option<WeakObjectRef>,
    live_receiver: Option<ObjectRef>,
}

impl TargetTracker {
    /// Tracker for a static action; only the owner, if any, is observed
    pub(crate) fn for_static(owner: Option<&ObjectRef>) -> Self {
        Self {
            owner: owner.map(Arc::downgrade),
            receiver: None,
            live_receiver: None,
        }
    }

    /// Tracker for a bound method
    pub(crate) fn for_bound(
        receiver: &ObjectRef,
        owner: Option<&ObjectRef>,
        keep_alive: bool,
    ) -> Self {
        Self {
            owner: owner.map(Arc::downgrade),
            receiver: Some(Arc::downgrade(receiver)),
            live_receiver: keep_alive.then(|| receiver.clone()),
        }
    }

    /// No handles at all: invalidated or never initialized
    pub(crate) fn is_empty(&self) -> bool {
        self.owner.is_none() && self.receiver.is_none() && self.live_receiver.is_none()
    }

    /// True when no owner was declared or the declared owner is still reachable
    pub(crate) fn owner_alive(&self) -> bool {
        self.owner.as_ref().map_or(true, |owner| owner.strong_count() > 0)
    }

    pub(crate) fn receiver_alive(&self) -> bool {
        self.live_receiver.is_some()
            || self.receiver.as_ref().is_some_and(|receiver| receiver.strong_count() > 0)
    }

    pub(crate) fn keeps_receiver_alive(&self) -> bool {
        self.live_receiver.is_some()
    }

    /// Upgrade the owner handle
    pub(crate) fn target(&self) -> Option<ObjectRef> {
        self.owner.as_ref()?.upgrade()
    }

    /// Effective receiver: the kept-alive handle first, else an upgrade of the weak one
    pub(crate) fn resolve_receiver(&self) -> Option<ObjectRef> {
        if let Some(receiver) = &self.live_receiver {
            return Some(receiver.clone());
        }
        self.receiver.as_ref()?.upgrade()
    }

    pub(crate) fn clear(&mut self) {
        self.owner = None;
        self.receiver = None;
        self.live_receiver = None;
    }
}

impl fmt::Debug for TargetTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetTracker")
            .field("has_owner", &self.owner.is_some())
            .field("owner_alive", &self.owner_alive())
            .field("receiver_alive", &self.receiver_alive())
            .field("keeps_receiver_alive", &self.keeps_receiver_alive())
            .finish()
    }
}
