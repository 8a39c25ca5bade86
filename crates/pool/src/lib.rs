//! # nebula-pool
//!
//! Thread-safe object pool for recycling short-lived values such as
//! buffers and scratch structures.
//!
//! ```rust
//! use nebula_pool::Pool;
//!
//! let pool = Pool::new();
//! pool.put("a");
//! pool.put("b");
//!
//! // Most recently returned value comes out first
//! assert_eq!(pool.get(), Some("b"));
//! assert_eq!(pool.get(), Some("a"));
//! assert_eq!(pool.get(), None);
//! ```
//!
//! ## Features
//!
//! - `logging` (default): structured `tracing` events for pool construction
//!   and arena growth
//! - `serde`: `Serialize`/`Deserialize` for [`PoolConfig`] and [`PoolStats`]
//!
//! ## Design
//!
//! One `parking_lot::Mutex` guards two stacks threaded through a single
//! entry arena: values available to `get`, and retired entries kept for the
//! next `put`. The pool is unbounded, never evicts, and never shrinks its
//! arena; callers decide how much they return to it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod pool;

pub use crate::config::PoolConfig;
pub use crate::error::{PoolError, PoolResult};
pub use crate::pool::{Pool, PoolStats};

pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::config::PoolConfig;
    pub use crate::error::{PoolError, PoolResult};
    pub use crate::pool::{Pool, PoolStats};
}
