//! Thread-safe free-list object pool
//!
//! [`Pool`] keeps returned values on a LIFO stack guarded by a single
//! `parking_lot::Mutex`. The nodes of that stack are themselves recycled
//! through a second stack of retired entries, so a steady stream of
//! `put`/`get` pairs stops allocating once the arena has warmed up.
//!
//! `get` releases the lock before calling the factory, so the factory may
//! itself use the pool.

mod entry;
mod stats;

use core::fmt;

use parking_lot::Mutex;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

use self::entry::FreeList;
#[cfg(feature = "logging")]
use self::entry::Slot;
use self::stats::PoolCounters;
pub use self::stats::PoolStats;
use crate::config::PoolConfig;
use crate::error::{PoolError, PoolResult};

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Mutex-guarded pool of reusable values
///
/// Values come back out in LIFO order: the most recently `put` value is the
/// next one `get` returns. When the pool is empty `get` falls back to the
/// factory, or returns `None` if there is none.
///
/// The pool holds strong ownership of stored values. Nothing is evicted;
/// a value stays pooled until a `get` takes it or the pool is dropped.
///
/// # Example
/// ```
/// use nebula_pool::Pool;
///
/// let pool = Pool::with_factory(|| Vec::<u8>::with_capacity(4096));
///
/// let mut buf = pool.get().unwrap_or_default();
/// buf.extend_from_slice(b"hello");
/// buf.clear();
/// pool.put(buf);
///
/// assert_eq!(pool.len(), 1);
/// ```
pub struct Pool<T> {
    lists: Mutex<FreeList<T>>,
    factory: Option<Factory<T>>,
    counters: PoolCounters,
    config: PoolConfig,
}

impl<T> Pool<T> {
    /// Create an empty pool without a factory
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(PoolConfig::default(), FreeList::new())
    }

    /// Create an empty pool that calls `factory` when it has nothing to hand out
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::new().factory(factory)
    }

    /// Create pool with custom configuration
    pub fn with_config(config: PoolConfig) -> PoolResult<Self> {
        config.validate()?;

        let mut lists = FreeList::new();
        lists
            .reserve(config.reserve_entries)
            .map_err(|source| {
                PoolError::reserve_failed(&config.name, config.reserve_entries, source)
            })?;

        Ok(Self::from_parts(config, lists))
    }

    fn from_parts(config: PoolConfig, lists: FreeList<T>) -> Self {
        #[cfg(feature = "logging")]
        debug!(
            pool = %config.name,
            reserved_entries = lists.reserved(),
            "Created pool"
        );

        Self {
            lists: Mutex::new(lists),
            factory: None,
            counters: PoolCounters::default(),
            config,
        }
    }

    /// Set the factory, builder style
    #[must_use = "builder methods must be chained or built"]
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.set_factory(factory);
        self
    }

    /// Replace the factory
    ///
    /// Requires exclusive access, so the factory cannot change while other
    /// threads are calling `get`.
    pub fn set_factory<F>(&mut self, factory: F)
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.factory = Some(Box::new(factory));
    }

    /// Remove the factory; `get` on an empty pool then returns `None`
    pub fn clear_factory(&mut self) {
        self.factory = None;
    }

    /// Take the most recently returned value
    ///
    /// If the pool is empty the lock is released first, then the factory is
    /// called. Without a factory, `None` signals that nothing was available.
    pub fn get(&self) -> Option<T> {
        let pooled = self.lists.lock().pop();
        if pooled.is_some() {
            self.counters.record_hit();
            return pooled;
        }

        match &self.factory {
            Some(factory) => {
                self.counters.record_factory_call();
                #[cfg(feature = "logging")]
                trace!(pool = %self.config.name, "Pool empty, calling factory");
                Some(factory())
            }
            None => {
                self.counters.record_empty();
                #[cfg(feature = "logging")]
                trace!(pool = %self.config.name, "Pool empty, no factory");
                None
            }
        }
    }

    /// Add `value` to the pool
    ///
    /// Reuses a retired entry when one exists, otherwise grows the arena.
    pub fn put(&self, value: T) {
        #[cfg_attr(not(feature = "logging"), allow(unused_variables))]
        let (slot, total_entries) = {
            let mut lists = self.lists.lock();
            let slot = lists.push(value);
            (slot, lists.total_entries())
        };

        self.counters.record_put(slot);

        #[cfg(feature = "logging")]
        if slot == Slot::Allocated {
            trace!(
                pool = %self.config.name,
                total_entries,
                "Allocated pool entry"
            );
        }
    }

    /// Number of values available to `get`
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.lock().live_len()
    }

    /// Check if no values are pooled
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of retired entries waiting to be reused
    #[must_use]
    pub fn free_entries(&self) -> usize {
        self.lists.lock().free_len()
    }

    /// Number of entries ever created (live plus free); never decreases
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.lists.lock().total_entries()
    }

    /// Whether `get` falls back to a factory
    #[must_use]
    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Pool name from the configuration
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Configuration the pool was built with
    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Get pool statistics
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot()
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lists = self.lists.lock();
        f.debug_struct("Pool")
            .field("name", &self.config.name)
            .field("live", &lists.live_len())
            .field("free", &lists.free_len())
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}
