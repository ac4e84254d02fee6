//! Binding configuration types
//!
//! Options a registration layer passes when it creates a binding. Kept
//! serializable so the options can live in the caller's own configuration files.

use serde::{Deserialize, Serialize};

/// Configuration for a single binding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Hold a strong handle to the receiver for the lifetime of the binding.
    ///
    /// Needed when the binding is the only thing that would keep a closure's
    /// captured state reachable. May keep the receiver alive longer than its
    /// natural scope.
    #[serde(default)]
    pub keep_target_alive: bool,

    /// Optional diagnostic name overriding the one derived from the callable
    #[serde(default)]
    pub method_name: Option<String>,
}

impl BindingConfig {
    /// Create a new binding configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: keep the receiver alive through the binding
    pub fn with_keep_target_alive(mut self, enabled: bool) -> Self {
        self.keep_target_alive = enabled;
        self
    }

    /// Builder method: set the diagnostic method name
    pub fn with_method_name(mut self, name: impl Into<String>) -> Self {
        self.method_name = Some(name.into());
        self
    }
}
