use std::sync::LazyLock;

use crossbeam::thread;

use crate::config::EngineConfig;
use crate::error::ParallelError;
use crate::partition;

/// CPU count, detected once per process
static AVAILABLE_CPUS: LazyLock<usize> = LazyLock::new(|| {
    let cpus = num_cpus::get().max(1);
    tracing::debug!("Detected {} CPUs for parallel enumeration", cpus);
    cpus
});

/// Concurrency settings for one or more parallel operator calls.
///
/// The concurrency factor is the target number of partitions, and therefore
/// of worker threads, for every call made through this context. It is read
/// once at the start of each call. Contexts are plain `Copy` values, so two
/// callers using different factors never interfere with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelContext {
    concurrency: usize,
}

impl ParallelContext {
    /// Context with the given concurrency factor, clamped to at least 1
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    /// Context using every available CPU
    pub fn available() -> Self {
        Self::new(*AVAILABLE_CPUS)
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let context = Self::new(config.resolve_concurrency());
        tracing::debug!(
            "Parallel context resolved to {} workers from config",
            context.concurrency
        );
        context
    }

    /// Copy of this context with a different concurrency factor
    pub fn with_concurrency(self, concurrency: usize) -> Self {
        Self::new(concurrency)
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Calculate a worker count from available CPUs and configuration limits
    ///
    /// # Algorithm
    /// ```text
    /// 1. Detect available CPU cores
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    ///
    /// # Examples
    /// ```rust
    /// use enumerable::ParallelContext;
    ///
    /// let workers = ParallelContext::calculate_optimal_workers(0, 75);
    /// assert!(workers >= 1);
    ///
    /// let workers = ParallelContext::calculate_optimal_workers(8, 75);
    /// assert!(workers <= 8);
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        Self::optimal_workers_for(*AVAILABLE_CPUS, max_threads_config, thread_percentage)
    }

    fn optimal_workers_for(
        available_cores: usize,
        max_threads_config: usize,
        thread_percentage: u8,
    ) -> usize {
        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        // 0 means no explicit limit
        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }

    /// Partition `values` with this context's concurrency factor
    pub(crate) fn partition<'v, V>(&self, values: &'v [V]) -> Vec<&'v [V]> {
        let partitions = partition::chunk(values, self.concurrency);
        tracing::trace!(
            "Partitioned {} elements into {} chunks (concurrency {})",
            values.len(),
            partitions.len(),
            self.concurrency
        );
        partitions
    }
}

impl Default for ParallelContext {
    fn default() -> Self {
        Self::available()
    }
}

/// Run `worker` once per work item, each on its own scoped thread, and wait
/// for all of them.
///
/// Items are numbered in iteration order and outputs come back in that same
/// order, whatever order the threads finish in. A panicking worker does not
/// stop the others; once every thread has been joined the panic from the
/// lowest-numbered item is returned as [`ParallelError::WorkerPanicked`].
pub(crate) fn fan_out<I, T, F>(work: I, worker: F) -> Result<Vec<T>, ParallelError>
where
    I: IntoIterator,
    I::Item: Send,
    T: Send,
    F: Fn(usize, I::Item) -> T + Sync,
{
    let worker = &worker;
    thread::scope(|scope| {
        let handles: Vec<_> = work
            .into_iter()
            .enumerate()
            .map(|(partition, item)| scope.spawn(move |_| worker(partition, item)))
            .collect();
        tracing::trace!("Spawned {} workers", handles.len());

        let mut outputs = Vec::with_capacity(handles.len());
        let mut failure = None;
        for (partition, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(output) => outputs.push(output),
                Err(payload) => {
                    let error = ParallelError::worker_panicked(partition, payload);
                    tracing::warn!("{}", error);
                    if failure.is_none() {
                        failure = Some(error);
                    }
                }
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(outputs),
        }
    })
    // The scope only reports threads it had to join itself; every handle was
    // joined above, so anything here is a panic outside the workers.
    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_new_clamps_to_one() {
        assert_eq!(ParallelContext::new(0).concurrency(), 1);
        assert_eq!(ParallelContext::new(5).concurrency(), 5);
    }

    #[test]
    fn test_with_concurrency() {
        let ctx = ParallelContext::new(2).with_concurrency(7);
        assert_eq!(ctx.concurrency(), 7);
        assert_eq!(ctx.with_concurrency(0).concurrency(), 1);
    }

    #[test]
    fn test_default_uses_available_cpus() {
        let ctx = ParallelContext::default();
        assert!(ctx.concurrency() >= 1);
        assert_eq!(ctx, ParallelContext::available());
    }

    #[test]
    fn test_optimal_workers_calculation() {
        assert_eq!(ParallelContext::optimal_workers_for(8, 0, 100), 8);
        assert_eq!(ParallelContext::optimal_workers_for(8, 0, 75), 6);
        assert_eq!(ParallelContext::optimal_workers_for(8, 4, 100), 4);
        assert_eq!(ParallelContext::optimal_workers_for(8, 16, 50), 4);
        // Never below one worker
        assert_eq!(ParallelContext::optimal_workers_for(1, 0, 10), 1);
        assert_eq!(ParallelContext::optimal_workers_for(4, 0, 0), 1);
    }

    #[test]
    fn test_fan_out_preserves_item_order() {
        let items = vec![30_u64, 0, 20, 10];
        let outputs = fan_out(items, |index, delay| {
            std::thread::sleep(std::time::Duration::from_millis(delay));
            index
        })
        .unwrap();
        assert_eq!(outputs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_fan_out_runs_every_item_once() {
        let runs = AtomicUsize::new(0);
        let outputs = fan_out(0..6, |_, item| {
            runs.fetch_add(1, Ordering::Relaxed);
            item * 10
        })
        .unwrap();
        assert_eq!(runs.load(Ordering::Relaxed), 6);
        assert_eq!(outputs, vec![0, 10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_fan_out_empty() {
        let outputs: Vec<()> = fan_out(Vec::<u8>::new(), |_, _| ()).unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn test_fan_out_reports_lowest_panicking_partition() {
        let finished = AtomicUsize::new(0);
        let result = fan_out(0..4, |_, item| {
            if item == 1 || item == 3 {
                panic!("bad item {item}");
            }
            finished.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(
            result,
            Err(ParallelError::WorkerPanicked {
                partition: 1,
                message: "bad item 1".to_string()
            })
        );
        // Healthy workers still ran to completion
        assert_eq!(finished.load(Ordering::Relaxed), 2);
    }
}
