// Logging utilities for the Vuex value utilities
//
// This module provides a small component-based logger on top of the `log`
// facade. Binaries pick the backend (env_logger in the example binary).

use log::{debug, error, info, warn};

/// Predefined components for logging categorization
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    Copy,
    Assert,
    Custom(&'static str),
}

impl Component {
    /// Get the string representation of the component
    pub fn as_str(&self) -> &str {
        match self {
            Component::Copy => "Copy",
            Component::Assert => "Assert",
            Component::Custom(name) => name,
        }
    }
}

/// A helper for creating component-specific loggers
#[derive(Clone)]
pub struct Logger {
    /// Component this logger is for
    component: Component,
    /// Scope label shown ahead of the component (store or module name)
    scope: String,
    /// Parent component for hierarchical logging (if any)
    parent_component: Option<Component>,
}

impl Logger {
    /// Create a root logger for a component under the given scope
    pub fn new_root(component: Component, scope: &str) -> Self {
        Self {
            component,
            scope: scope.to_string(),
            parent_component: None,
        }
    }

    /// Create a child logger with the same scope but different component
    pub fn with_component(&self, component: Component) -> Self {
        Self {
            component,
            scope: self.scope.clone(),
            parent_component: Some(self.component),
        }
    }

    /// Get the scope label
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Get the component prefix for logging, including parent if available
    fn component_prefix(&self) -> String {
        match self.parent_component {
            Some(parent) => format!("{}.{}", parent.as_str(), self.component.as_str()),
            None => self.component.as_str().to_string(),
        }
    }

    /// Log a debug message
    pub fn debug(&self, message: impl Into<String>) {
        if log::log_enabled!(log::Level::Debug) {
            debug!("[{}][{}] {}", self.scope, self.component_prefix(), message.into());
        }
    }

    /// Log an info message
    pub fn info(&self, message: impl Into<String>) {
        if log::log_enabled!(log::Level::Info) {
            info!("[{}][{}] {}", self.scope, self.component_prefix(), message.into());
        }
    }

    /// Log a warning message
    pub fn warn(&self, message: impl Into<String>) {
        if log::log_enabled!(log::Level::Warn) {
            warn!("[{}][{}] {}", self.scope, self.component_prefix(), message.into());
        }
    }

    /// Log an error message
    pub fn error(&self, message: impl Into<String>) {
        if log::log_enabled!(log::Level::Error) {
            error!("[{}][{}] {}", self.scope, self.component_prefix(), message.into());
        }
    }
}

/// Logger used by the free functions in `utils`
pub(crate) fn default_logger(component: Component) -> Logger {
    Logger::new_root(component, "vuex")
}
