//! Binding configuration.
//!
//! Selects the transport revision and the few knobs the option accessor and
//! the event reader need.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::revision::Revision;
use std::env;
use tracing::debug;

/// Environment variable that overrides the compiled-in revision.
pub const REVISION_ENV: &str = "ZMQX_REVISION";

/// Default capacity of the caller buffer used for string options.
///
/// Endpoints are limited to 255 bytes plus a terminator.
pub const DEFAULT_STRING_CAPACITY: usize = 256;

/// Binding configuration.
///
/// # Examples
///
/// ```
/// use zmqx_core::config::BindingConfig;
/// use zmqx_core::revision::Revision;
///
/// let config = BindingConfig::new()
///     .with_revision(Revision::V4)
///     .with_dont_wait(true);
/// assert_eq!(config.catalog().revision(), Revision::V4);
/// ```
#[derive(Debug, Clone)]
pub struct BindingConfig {
    /// Transport revision
    ///
    /// - Default: selected by cargo feature (4.x with `libzmq`, else 3.x)
    pub revision: Revision,

    /// Capacity of the buffer handed to the transport for string options
    ///
    /// - Default: 256 bytes
    pub string_capacity: usize,

    /// Non-blocking monitor reads (ZMQ_DONTWAIT)
    ///
    /// - `false` (default): block until an event arrives
    /// - `true`: fail with EAGAIN when no event is queued
    pub dont_wait: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            revision: Revision::current(),
            string_capacity: DEFAULT_STRING_CAPACITY,
            dont_wait: false,
        }
    }
}

impl BindingConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the revision taken from `ZMQX_REVISION` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(value) = env::var(REVISION_ENV) {
            config.revision = value.parse()?;
            debug!("[CONFIG] Revision {} from {}", config.revision, REVISION_ENV);
        }
        Ok(config)
    }

    /// Set the transport revision.
    pub fn with_revision(mut self, revision: Revision) -> Self {
        self.revision = revision;
        self
    }

    /// Set the string option buffer capacity.
    pub fn with_string_capacity(mut self, capacity: usize) -> Self {
        self.string_capacity = capacity;
        self
    }

    /// Enable or disable non-blocking monitor reads.
    pub fn with_dont_wait(mut self, dont_wait: bool) -> Self {
        self.dont_wait = dont_wait;
        self
    }

    /// Option catalog of the configured revision.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::for_revision(self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BindingConfig::default();
        assert_eq!(config.revision, Revision::current());
        assert_eq!(config.string_capacity, DEFAULT_STRING_CAPACITY);
        assert!(!config.dont_wait);
    }

    #[test]
    fn test_builder() {
        let config = BindingConfig::new()
            .with_revision(Revision::V2)
            .with_string_capacity(64)
            .with_dont_wait(true);
        assert_eq!(config.revision, Revision::V2);
        assert_eq!(config.string_capacity, 64);
        assert!(config.dont_wait);
        assert_eq!(config.catalog().revision(), Revision::V2);
    }
}
