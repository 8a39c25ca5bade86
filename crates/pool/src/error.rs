//! Standalone error types for nebula-pool
//!
//! `Pool::get` and `Pool::put` never fail; these errors only surface while
//! building a pool from a [`PoolConfig`](crate::PoolConfig).

use std::collections::TryReserveError;
use thiserror::Error;

#[cfg(feature = "logging")]
use tracing::warn;

/// Pool construction errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Failed to reserve {requested} entry slots for pool '{pool}'")]
    ReserveFailed {
        pool: String,
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

impl PoolError {
    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "POOL:CONFIG:INVALID",
            Self::ReserveFailed { .. } => "POOL:RESERVE:FAILED",
        }
    }

    /// Create invalid config error
    pub fn invalid_config(reason: &str) -> Self {
        #[cfg(feature = "logging")]
        warn!(reason, "Rejected pool configuration");

        Self::InvalidConfig {
            reason: reason.to_string(),
        }
    }

    /// Create reserve failed error
    pub fn reserve_failed(pool: &str, requested: usize, source: TryReserveError) -> Self {
        #[cfg(feature = "logging")]
        warn!(pool, requested, error = %source, "Failed to reserve pool entries");

        Self::ReserveFailed {
            pool: pool.to_string(),
            requested,
            source,
        }
    }
}

/// Result type for pool construction
pub type PoolResult<T> = core::result::Result<T, PoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity_overflow() -> TryReserveError {
        Vec::<u64>::new()
            .try_reserve_exact(usize::MAX)
            .expect_err("reserving usize::MAX u64s must overflow")
    }

    #[test]
    fn test_invalid_config_message() {
        let error = PoolError::invalid_config("pool name must not be empty");
        assert!(error.to_string().contains("pool name must not be empty"));
        assert_eq!(error.code(), "POOL:CONFIG:INVALID");
    }

    #[test]
    fn test_reserve_failed_keeps_source() {
        let error = PoolError::reserve_failed("scratch", usize::MAX, capacity_overflow());
        assert!(error.to_string().contains("scratch"));
        assert_eq!(error.code(), "POOL:RESERVE:FAILED");
        assert!(std::error::Error::source(&error).is_some());
    }
}
