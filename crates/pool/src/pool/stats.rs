//! Pool statistics

use core::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::entry::Slot;

/// Live counters updated by `get`/`put`
///
/// Relaxed ordering is enough: counters are diagnostics and never used to
/// synchronize access to pooled values.
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    hits: AtomicUsize,
    factory_calls: AtomicUsize,
    empty_returns: AtomicUsize,
    puts: AtomicUsize,
    entries_allocated: AtomicUsize,
    entries_reused: AtomicUsize,
}

impl PoolCounters {
    #[inline]
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_factory_call(&self) {
        self.factory_calls.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_empty(&self) {
        self.empty_returns.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_put(&self, slot: Slot) {
        self.puts.fetch_add(1, Ordering::Relaxed);
        match slot {
            Slot::Reused => self.entries_reused.fetch_add(1, Ordering::Relaxed),
            Slot::Allocated => self.entries_allocated.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub(crate) fn snapshot(&self) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            factory_calls: self.factory_calls.load(Ordering::Relaxed),
            empty_returns: self.empty_returns.load(Ordering::Relaxed),
            puts: self.puts.load(Ordering::Relaxed),
            entries_allocated: self.entries_allocated.load(Ordering::Relaxed),
            entries_reused: self.entries_reused.load(Ordering::Relaxed),
        }
    }
}

/// Pool statistics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoolStats {
    /// `get` calls served from the pool
    pub hits: usize,
    /// `get` calls served by the factory
    pub factory_calls: usize,
    /// `get` calls that returned `None`
    pub empty_returns: usize,
    /// `put` calls
    pub puts: usize,
    /// Entries created because no retired entry was available
    pub entries_allocated: usize,
    /// `put` calls that recycled a retired entry
    pub entries_reused: usize,
}

impl PoolStats {
    /// Total `get` calls
    pub fn gets(&self) -> usize {
        self.hits + self.factory_calls + self.empty_returns
    }

    /// Calculate hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.gets();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
