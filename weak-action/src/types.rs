//! Core types for the weak action library
//!
//! This module defines the handle types shared by every part of the library and
//! the error type used to report why a call was skipped. Skipping a call is the
//! normal outcome for a binding whose owner is gone, so the error is only surfaced
//! through [`crate::WeakAction::try_execute`].

use std::any::Any;
use std::borrow::Cow;
use std::sync::{Arc, Weak};

/// Type-erased object a binding can observe or invoke against
pub type Object = dyn Any + Send + Sync;

/// Strong handle to an [`Object`]
pub type ObjectRef = Arc<Object>;

/// Weak, non-owning handle to an [`Object`]
pub type WeakObjectRef = Weak<Object>;

/// Result type for weak action operations
pub type Result<T> = std::result::Result<T, WeakActionError>;

/// Reasons a binding declined to invoke its callable
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WeakActionError {
    #[error("Binding was invalidated or never initialized")]
    Invalidated,

    #[error("Owner of the binding has been dropped")]
    OwnerDropped,

    #[error("Receiver of the bound method has been dropped")]
    ReceiverDropped,

    #[error("Receiver is not of the type the method was built for")]
    ReceiverMismatch,
}

/// Erase the concrete type of a shared handle
pub(crate) fn erase<T: Any + Send + Sync>(handle: &Arc<T>) -> ObjectRef {
    handle.clone()
}

/// Shorten a `std::any::type_name` to the final path segment
///
/// Generic arguments are stripped first, so `a::Outer<x::Y>::call` yields `call`.
/// Closure names keep their `{{closure}}` marker.
pub(crate) fn short_type_name(full: &'static str) -> Cow<'static, str> {
    if !full.contains('<') {
        return Cow::Borrowed(last_segment(full));
    }

    let mut depth = 0usize;
    let mut stripped = String::with_capacity(full.len());
    for ch in full.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => stripped.push(ch),
            _ => {}
        }
    }
    Cow::Owned(last_segment(&stripped).to_string())
}

fn last_segment(path: &str) -> &str {
    let path = path.trim_end_matches("::");
    match path.rfind("::") {
        Some(pos) => &path[pos + 2..],
        None => path,
    }
}
