//! Pool configuration

use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PoolError, PoolResult};

/// Configuration for a [`Pool`](crate::Pool)
///
/// Nothing here bounds the pool. `reserve_entries` only pre-sizes the
/// entry arena so the first puts do not reallocate it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Name used in log events and errors
    pub name: Cow<'static, str>,
    /// Number of entry slots to reserve up front
    pub reserve_entries: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("pool"),
            reserve_entries: 0,
        }
    }
}

impl PoolConfig {
    /// Small pool, e.g. per-connection scratch values
    #[must_use]
    pub fn small() -> Self {
        Self {
            reserve_entries: 16,
            ..Default::default()
        }
    }

    /// Large pool shared by many worker threads
    #[must_use]
    pub fn large() -> Self {
        Self {
            reserve_entries: 1024,
            ..Default::default()
        }
    }

    /// Set the pool name
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the number of entry slots reserved at construction
    pub fn with_reserve_entries(mut self, reserve_entries: usize) -> Self {
        self.reserve_entries = reserve_entries;
        self
    }

    /// Check the configuration before a pool is built from it
    pub fn validate(&self) -> PoolResult<()> {
        if self.name.trim().is_empty() {
            return Err(PoolError::invalid_config("pool name must not be empty"));
        }
        Ok(())
    }
}
