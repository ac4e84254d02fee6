//! Callable classification
//!
//! A [`Callable`] is what a caller hands to [`crate::WeakAction`]. It is either a
//! static action with no receiver, or a method descriptor paired with the object
//! it must be invoked against. The binding only keeps the receiver weakly; the
//! strong handle held here is released once the binding has been built.

use crate::types::{erase, short_type_name, Object, ObjectRef, Result, WeakActionError};
use std::any::{type_name, Any};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A zero-argument callable with no receiver
#[derive(Clone)]
pub struct StaticAction {
    name: Cow<'static, str>,
    func: Arc<dyn Fn() + Send + Sync>,
}

impl StaticAction {
    /// Wrap a function; the name is derived from its type
    pub fn new<F>(func: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            name: short_type_name(type_name::<F>()),
            func: Arc::new(func),
        }
    }

    /// Replace the diagnostic name
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Diagnostic name of the wrapped function
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn invoke(&self) {
        (self.func)()
    }
}

impl fmt::Debug for StaticAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticAction")
            .field("name", &self.name)
            .finish()
    }
}

/// Identifies a zero-argument method on a receiver of a known type
///
/// The receiver is supplied at call time as a type-erased [`Object`] and is
/// downcast back to the type the descriptor was created for.
#[derive(Clone)]
pub struct MethodRef {
    name: Cow<'static, str>,
    dispatch: Arc<dyn Fn(&Object) -> bool + Send + Sync>,
}

impl MethodRef {
    /// Describe `method` as a method of `R`
    pub fn new<R, F>(method: F) -> Self
    where
        R: Any + Send + Sync,
        F: Fn(&R) + Send + Sync + 'static,
    {
        let name = short_type_name(type_name::<F>());
        let dispatch = move |receiver: &Object| match receiver.downcast_ref::<R>() {
            Some(receiver) => {
                method(receiver);
                true
            }
            None => {
                log::warn!(
                    "Receiver is not a {}, skipping {}",
                    type_name::<R>(),
                    type_name::<F>()
                );
                false
            }
        };

        Self {
            name,
            dispatch: Arc::new(dispatch),
        }
    }

    /// Replace the diagnostic name
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Diagnostic name of the method
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the method against `receiver`; fails if it is not the expected type
    pub(crate) fn invoke(&self, receiver: &Object) -> Result<()> {
        if (self.dispatch)(receiver) {
            Ok(())
        } else {
            Err(WeakActionError::ReceiverMismatch)
        }
    }
}

impl fmt::Debug for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRef")
            .field("name", &self.name)
            .finish()
    }
}

/// A callable classified as static or bound to a receiver
#[derive(Debug, Clone)]
pub enum Callable {
    /// No receiver; invoked directly
    Static(StaticAction),

    /// Invoked against `receiver` through `method`
    Bound {
        /// Object the method runs on
        receiver: ObjectRef,
        /// Which method to run
        method: MethodRef,
    },
}

impl Callable {
    /// A free function or non-capturing closure
    pub fn function<F>(func: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Callable::Static(StaticAction::new(func))
    }

    /// A method of `receiver`, e.g. `Callable::method(&counter, Counter::ping)`
    pub fn method<R, F>(receiver: &Arc<R>, method: F) -> Self
    where
        R: Any + Send + Sync,
        F: Fn(&R) + Send + Sync + 'static,
    {
        Callable::Bound {
            receiver: erase(receiver),
            method: MethodRef::new(method),
        }
    }

    /// A capturing closure whose captured state is the receiver
    ///
    /// The closure object is usually not the logical owner of the callback, so
    /// pair this with [`crate::WeakAction::with_target`], and with
    /// `keep_target_alive` if nothing else holds the closure.
    pub fn closure<F>(closure: &Arc<F>) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let method =
            MethodRef::new(|closure: &F| closure()).named(short_type_name(type_name::<F>()));
        Callable::Bound {
            receiver: erase(closure),
            method,
        }
    }

    /// True if the callable has no receiver
    pub fn is_static(&self) -> bool {
        matches!(self, Callable::Static(_))
    }

    /// The object a bound callable is invoked against
    pub fn receiver(&self) -> Option<&ObjectRef> {
        match self {
            Callable::Static(_) => None,
            Callable::Bound { receiver, .. } => Some(receiver),
        }
    }

    /// Diagnostic name of the callable
    pub fn name(&self) -> &str {
        match self {
            Callable::Static(action) => action.name(),
            Callable::Bound { method, .. } => method.name(),
        }
    }
}
