//! services/app/src/error.rs
//!
//! Defines the primary error type for the application service.

use crate::config::ConfigError;
use careconnect_core::navigation::NavigationError;

/// The primary error type for the `app` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A navigation action the current page does not accept.
    #[error("Navigation Error: {0}")]
    Navigation(#[from] NavigationError),
}
