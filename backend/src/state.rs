//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Immutable after creation**: State is read-only during request handling
//! 2. **Cheap cloning**: All fields are Arc'd, cloning is O(1)
//! 3. **Injected capabilities**: The advice provider is a trait object so
//!    tests swap in stubs without touching the router

use crate::config::AppConfig;
use crate::services::AdviceGenerator;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Generative advice provider
    pub advice: Arc<dyn AdviceGenerator>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: AppConfig, advice: Arc<dyn AdviceGenerator>) -> Self {
        Self {
            config: Arc::new(config),
            advice,
        }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the advice provider
    #[inline]
    pub fn advice(&self) -> &dyn AdviceGenerator {
        self.advice.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::DisabledAdviceGenerator;

    #[test]
    fn test_state_clone_is_cheap() {
        // Clone should be O(1) - just Arc increments
        let state = AppState::new(AppConfig::default(), Arc::new(DisabledAdviceGenerator));
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
    }
}
