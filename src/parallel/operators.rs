use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::cancel::CancelSignal;
use super::core::{ParallelContext, fan_out};
use crate::Result;
use crate::partition;
use crate::sequence::{Enumerable, Sequence};

impl ParallelContext {
    /// Call `f` once per element, concurrently across partitions.
    ///
    /// No ordering holds between partitions. `f` runs on several threads at
    /// once and must synchronize its own side effects.
    pub fn each<V, E, F>(&self, seq: &E, f: F) -> Result<()>
    where
        V: Sync,
        E: Enumerable<V> + ?Sized,
        F: Fn(&V) + Sync,
    {
        fan_out(self.partition(seq.values()), |_, part| {
            part.iter().for_each(&f);
        })?;
        Ok(())
    }

    /// True if `pred` holds for every element.
    ///
    /// The first worker to see a failing element flips the shared result and
    /// fires a cancellation signal; the other workers stop before their next
    /// element.
    pub fn all<V, E, F>(&self, seq: &E, pred: F) -> Result<bool>
    where
        V: Sync,
        E: Enumerable<V> + ?Sized,
        F: Fn(&V) -> bool + Sync,
    {
        self.short_circuit(seq.values(), pred, true)
    }

    /// True if `pred` holds for some element. Short-circuits like [`all`](Self::all).
    pub fn any<V, E, F>(&self, seq: &E, pred: F) -> Result<bool>
    where
        V: Sync,
        E: Enumerable<V> + ?Sized,
        F: Fn(&V) -> bool + Sync,
    {
        self.short_circuit(seq.values(), pred, false)
    }

    /// Number of elements satisfying `pred`
    pub fn count<V, E, F>(&self, seq: &E, pred: F) -> Result<usize>
    where
        V: Sync,
        E: Enumerable<V> + ?Sized,
        F: Fn(&V) -> bool + Sync,
    {
        let total = AtomicUsize::new(0);
        fan_out(self.partition(seq.values()), |_, part| {
            let local = part.iter().filter(|&value| pred(value)).count();
            // One atomic add per worker, not per element
            total.fetch_add(local, Ordering::Relaxed);
        })?;
        Ok(total.into_inner())
    }

    /// Apply `f` to every element, keeping input order.
    ///
    /// The output is allocated up front and split with the same layout as the
    /// input, so worker *i* writes only the region matching partition *i*.
    /// Regions never overlap, which is what makes the writes lock-free.
    pub fn map<V, R, E, F>(&self, seq: &E, f: F) -> Result<Sequence<R>>
    where
        V: Sync,
        R: Send,
        E: Enumerable<V> + ?Sized,
        F: Fn(&V) -> R + Sync,
    {
        let values = seq.values();
        let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None)
            .take(values.len())
            .collect();

        let inputs = self.partition(values);
        let regions = partition::chunk_mut(&mut slots, self.concurrency());
        debug_assert_eq!(inputs.len(), regions.len());

        fan_out(inputs.into_iter().zip(regions), |_, (input, region)| {
            for (slot, value) in region.iter_mut().zip(input) {
                *slot = Some(f(value));
            }
        })?;

        // Every slot was filled by exactly one worker
        Ok(slots.into_iter().flatten().collect())
    }

    /// Keep the elements matching `pred`, in input order.
    ///
    /// Each worker collects into a private buffer; the buffers are joined in
    /// partition order, never in completion order.
    pub fn filter<V, E, F>(&self, seq: &E, pred: F) -> Result<Sequence<V>>
    where
        V: Clone + Send + Sync,
        E: Enumerable<V> + ?Sized,
        F: Fn(&V) -> bool + Sync,
    {
        let buffers = fan_out(self.partition(seq.values()), |_, part| {
            part.iter()
                .filter(|&value| pred(value))
                .cloned()
                .collect::<Vec<V>>()
        })?;
        Ok(Sequence::from(partition::join_owned(buffers)))
    }

    /// Fold each partition with `f` from a clone of `initial`, then hand the
    /// partial results to `combine` in partition order.
    ///
    /// `initial` is folded into every partial, so it should be an identity
    /// for `f` (0 for addition, 1 for multiplication). Whether `combine`
    /// recombines the partials correctly for a given `f` is up to the caller.
    /// An empty sequence returns `initial` without calling `combine`.
    pub fn reduce<V, R, E, F, C>(&self, seq: &E, f: F, combine: C, initial: R) -> Result<R>
    where
        V: Sync,
        R: Clone + Send,
        E: Enumerable<V> + ?Sized,
        F: Fn(R, &V) -> R + Sync,
        C: FnOnce(Vec<R>) -> R,
    {
        let partitions = self.partition(seq.values());
        if partitions.is_empty() {
            return Ok(initial);
        }

        let work: Vec<_> = partitions
            .into_iter()
            .map(|part| (part, initial.clone()))
            .collect();
        let partials = fan_out(work, |_, (part, start)| part.iter().fold(start, &f))?;
        Ok(combine(partials))
    }

    /// Shared engine for `all` and `any`.
    ///
    /// The outcome starts at `initial` and flips exactly once, through a
    /// compare-and-exchange, when some worker sees `pred(value) != initial`.
    fn short_circuit<V, F>(&self, values: &[V], pred: F, initial: bool) -> Result<bool>
    where
        V: Sync,
        F: Fn(&V) -> bool + Sync,
    {
        let outcome = AtomicBool::new(initial);
        let signal = CancelSignal::new();

        fan_out(self.partition(values), |partition, part| {
            for value in part {
                if signal.is_fired() {
                    return;
                }
                if pred(value) != initial {
                    if signal.fire() {
                        tracing::trace!("Partition {} short-circuited the call", partition);
                    }
                    // Fails only if another worker already flipped it
                    outcome
                        .compare_exchange(initial, !initial, Ordering::AcqRel, Ordering::Acquire)
                        .ok();
                    return;
                }
            }
        })?;

        Ok(outcome.into_inner())
    }
}
