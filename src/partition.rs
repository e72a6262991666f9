//! Partitioning of materialized sequences into balanced contiguous chunks.
//!
//! Every partition but possibly the last holds exactly
//! [`chunk_size`]`(len, count)` elements and the last holds the remainder.
//! No partition is ever empty, so `len = 8, count = 3` gives sizes `3, 3, 2`
//! and `len = 9, count = 4` gives `3, 3, 3` (three partitions, not four).
//!
//! [`chunk`] and [`chunk_mut`] use the same layout for the same `(len, count)`,
//! which is what lets the parallel map pair input partition *i* with output
//! region *i*.

/// Size of every partition except possibly the last.
///
/// `count` is clamped to at least 1. Returns 0 for an empty collection.
pub fn chunk_size(len: usize, count: usize) -> usize {
    len.div_ceil(count.max(1))
}

/// Split `collection` into at most `count` contiguous, borrowed slices.
///
/// A `count` of 0 is treated as 1. An empty collection yields no partitions.
pub fn chunk<V>(collection: &[V], count: usize) -> Vec<&[V]> {
    let size = chunk_size(collection.len(), count);
    if size == 0 {
        return Vec::new();
    }
    collection.chunks(size).collect()
}

/// Mutable counterpart of [`chunk`], yielding disjoint regions
pub fn chunk_mut<V>(collection: &mut [V], count: usize) -> Vec<&mut [V]> {
    let size = chunk_size(collection.len(), count);
    if size == 0 {
        return Vec::new();
    }
    collection.chunks_mut(size).collect()
}

/// Concatenate partitions in order. Starting capacity is the sum of their lengths.
pub fn join<V, S>(partitions: &[S]) -> Vec<V>
where
    V: Clone,
    S: AsRef<[V]>,
{
    let capacity = partitions.iter().map(|p| p.as_ref().len()).sum();
    join_with_capacity(partitions, capacity)
}

/// Concatenate partitions in order, starting from the given capacity hint.
///
/// A hint of 0 preallocates nothing; the result still grows as needed.
pub fn join_with_capacity<V, S>(partitions: &[S], capacity: usize) -> Vec<V>
where
    V: Clone,
    S: AsRef<[V]>,
{
    let mut joined = Vec::with_capacity(capacity);
    for partition in partitions {
        joined.extend_from_slice(partition.as_ref());
    }
    joined
}

/// Concatenate owned partition buffers in order, moving their elements
pub fn join_owned<V>(partitions: Vec<Vec<V>>) -> Vec<V> {
    let capacity = partitions.iter().map(Vec::len).sum();
    let mut joined = Vec::with_capacity(capacity);
    for partition in partitions {
        joined.extend(partition);
    }
    joined
}
