//! # Enumerable - sequence operators with a parallel enumeration engine
//!
//! A small toolkit for processing in-memory sequences:
//!
//! - **Sequences**: [`Sequence`] snapshots and repositionable [`Enumerator`] cursors
//! - **Sequential operators**: `each`, `all`, `any`, `count`, `map`, `filter`,
//!   `reduce`, `range` and `sum` in [`ops`]
//! - **Parallel operators**: the same family run across scoped worker threads,
//!   one per balanced partition, with order-preserving aggregation in [`parallel`]
//! - **Flexible Configuration**: TOML and environment based concurrency settings
//!
//! ## Quick Start
//!
//! ```rust
//! use enumerable::{ops, Enumerable, ParallelContext, Sequence};
//!
//! let seq = Sequence::from(vec![1, 2, 3, 4, 5, 6, 7, 8]);
//! let ctx = ParallelContext::new(3);
//!
//! let doubled = ctx.map(&seq, |v| v * 2)?;
//! assert_eq!(doubled.values(), &[2, 4, 6, 8, 10, 12, 14, 16]);
//!
//! let evens = ctx.filter(&seq, |v| v % 2 == 0)?;
//! assert_eq!(evens.values(), &[2, 4, 6, 8]);
//!
//! let total = ctx.reduce(&seq, |acc, v| acc + v, |parts| parts.into_iter().sum(), 0)?;
//! assert_eq!(total, ops::sum(&seq));
//! # Ok::<(), enumerable::ParallelError>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod ops;
pub mod parallel;
pub mod partition;
pub mod sequence;

pub use config::EngineConfig;
pub use error::ParallelError;
pub use parallel::{
    ParallelContext, parallel_all, parallel_any, parallel_count, parallel_each, parallel_filter,
    parallel_map, parallel_reduce,
};
pub use sequence::{Enumerable, Enumerator, Sequence};

/// Result type alias for parallel operations
pub type Result<T> = std::result::Result<T, ParallelError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
