//! Parallel enumeration engine
//!
//! This module runs the sequential operators' concurrent analogues over
//! scoped worker threads.
//!
//! # Execution Model
//!
//! Every operator follows the same fan-out/fan-in round:
//!
//! ```text
//! values ──chunk──▶ [p0] [p1] ... [pn]      (contiguous, near-equal partitions)
//!                    │    │        │
//!                    ▼    ▼        ▼
//!                   w0   w1  ...  wn        (one fresh scoped thread each)
//!                    │    │        │
//!                    └────┴──┬─────┘
//!                            ▼
//!                      barrier join          (caller blocks here)
//!                            ▼
//!                 aggregate in partition order
//! ```
//!
//! - **Partitioning**: the input is materialized once and split with
//!   [`crate::partition::chunk`] using the context's concurrency factor
//! - **Workers**: one per non-empty partition, created per call and never
//!   reused; each walks its own partition in order
//! - **Aggregation**: map, filter and reduce recombine results by partition
//!   index, never by completion order
//! - **Short-circuiting**: `all` and `any` share an atomic result flag and a
//!   cancellation signal polled before each element
//!
//! # Shared State
//!
//! During a call workers only ever share read-only input slices, disjoint
//! output regions, or atomics (the short-circuit flag, the count total and the
//! cancellation signal). There are no locks.
//!
//! # Failures
//!
//! A panic inside a user function is caught when its worker is joined. The
//! other workers run to completion and the call returns
//! [`ParallelError::WorkerPanicked`](crate::ParallelError::WorkerPanicked).
//! There are no timeouts.
//!
//! # Example Usage
//!
//! ```rust
//! use enumerable::{parallel_any, Enumerable, ParallelContext, Sequence};
//!
//! let seq: Sequence<u32> = (1..=100).collect();
//!
//! // Explicit concurrency factor
//! let ctx = ParallelContext::new(4);
//! let squares = ctx.map(&seq, |v| v * v)?;
//! assert_eq!(squares.values()[9], 100);
//!
//! // Or all available CPUs
//! assert!(parallel_any(&seq, |v| *v == 42)?);
//! # Ok::<(), enumerable::ParallelError>(())
//! ```

mod cancel;
mod core;
mod operators;

pub use self::core::ParallelContext;

use crate::Result;
use crate::sequence::{Enumerable, Sequence};

/// [`ParallelContext::each`] using every available CPU
pub fn parallel_each<V, E, F>(seq: &E, f: F) -> Result<()>
where
    V: Sync,
    E: Enumerable<V> + ?Sized,
    F: Fn(&V) + Sync,
{
    ParallelContext::default().each(seq, f)
}

/// [`ParallelContext::all`] using every available CPU
pub fn parallel_all<V, E, F>(seq: &E, pred: F) -> Result<bool>
where
    V: Sync,
    E: Enumerable<V> + ?Sized,
    F: Fn(&V) -> bool + Sync,
{
    ParallelContext::default().all(seq, pred)
}

/// [`ParallelContext::any`] using every available CPU
pub fn parallel_any<V, E, F>(seq: &E, pred: F) -> Result<bool>
where
    V: Sync,
    E: Enumerable<V> + ?Sized,
    F: Fn(&V) -> bool + Sync,
{
    ParallelContext::default().any(seq, pred)
}

/// [`ParallelContext::count`] using every available CPU
pub fn parallel_count<V, E, F>(seq: &E, pred: F) -> Result<usize>
where
    V: Sync,
    E: Enumerable<V> + ?Sized,
    F: Fn(&V) -> bool + Sync,
{
    ParallelContext::default().count(seq, pred)
}

/// [`ParallelContext::map`] using every available CPU
pub fn parallel_map<V, R, E, F>(seq: &E, f: F) -> Result<Sequence<R>>
where
    V: Sync,
    R: Send,
    E: Enumerable<V> + ?Sized,
    F: Fn(&V) -> R + Sync,
{
    ParallelContext::default().map(seq, f)
}

/// [`ParallelContext::filter`] using every available CPU
pub fn parallel_filter<V, E, F>(seq: &E, pred: F) -> Result<Sequence<V>>
where
    V: Clone + Send + Sync,
    E: Enumerable<V> + ?Sized,
    F: Fn(&V) -> bool + Sync,
{
    ParallelContext::default().filter(seq, pred)
}

/// [`ParallelContext::reduce`] using every available CPU
pub fn parallel_reduce<V, R, E, F, C>(seq: &E, f: F, combine: C, initial: R) -> Result<R>
where
    V: Sync,
    R: Clone + Send,
    E: Enumerable<V> + ?Sized,
    F: Fn(R, &V) -> R + Sync,
    C: FnOnce(Vec<R>) -> R,
{
    ParallelContext::default().reduce(seq, f, combine, initial)
}
