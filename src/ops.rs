//! Sequential operators
//!
//! Each operator drives a single [`Enumerator`](crate::Enumerator) to
//! exhaustion on the calling thread, in original order. None of them mutate
//! their input; the ones that produce sequences return a new [`Sequence`].

use std::cmp::Ordering;

use num_traits::{PrimInt, Zero};

use crate::sequence::{Enumerable, Sequence};

/// Call `f` once per element
pub fn each<V, E, F>(seq: &E, mut f: F)
where
    E: Enumerable<V> + ?Sized,
    F: FnMut(&V),
{
    let mut cursor = seq.enumerator();
    while cursor.advance() {
        if let Some(value) = cursor.current() {
            f(value);
        }
    }
}

/// True if `pred` holds for every element. Stops at the first failure.
pub fn all<V, E, F>(seq: &E, mut pred: F) -> bool
where
    E: Enumerable<V> + ?Sized,
    F: FnMut(&V) -> bool,
{
    let mut cursor = seq.enumerator();
    while cursor.advance() {
        if let Some(value) = cursor.current()
            && !pred(value)
        {
            return false;
        }
    }
    true
}

/// True if `pred` holds for some element. Stops at the first match.
pub fn any<V, E, F>(seq: &E, mut pred: F) -> bool
where
    E: Enumerable<V> + ?Sized,
    F: FnMut(&V) -> bool,
{
    let mut cursor = seq.enumerator();
    while cursor.advance() {
        if let Some(value) = cursor.current()
            && pred(value)
        {
            return true;
        }
    }
    false
}

pub fn count<V, E, F>(seq: &E, mut pred: F) -> usize
where
    E: Enumerable<V> + ?Sized,
    F: FnMut(&V) -> bool,
{
    let mut cursor = seq.enumerator();
    let mut matched = 0;
    while cursor.advance() {
        if let Some(value) = cursor.current()
            && pred(value)
        {
            matched += 1;
        }
    }
    matched
}

/// Apply `f` to every element, keeping order and length
pub fn map<V, R, E, F>(seq: &E, mut f: F) -> Sequence<R>
where
    E: Enumerable<V> + ?Sized,
    F: FnMut(&V) -> R,
{
    let mut cursor = seq.enumerator();
    let mut results = Vec::with_capacity(cursor.len());
    while cursor.advance() {
        if let Some(value) = cursor.current() {
            results.push(f(value));
        }
    }
    Sequence::from(results)
}

/// Keep the elements matching `pred`, in original order
pub fn filter<V, E, F>(seq: &E, mut pred: F) -> Sequence<V>
where
    V: Clone,
    E: Enumerable<V> + ?Sized,
    F: FnMut(&V) -> bool,
{
    let mut cursor = seq.enumerator();
    let mut results = Vec::new();
    while cursor.advance() {
        if let Some(value) = cursor.current()
            && pred(value)
        {
            results.push(value.clone());
        }
    }
    Sequence::from(results)
}

/// Left fold starting from `initial`
pub fn reduce<V, R, E, F>(seq: &E, mut f: F, initial: R) -> R
where
    E: Enumerable<V> + ?Sized,
    F: FnMut(R, &V) -> R,
{
    let mut cursor = seq.enumerator();
    let mut result = initial;
    while cursor.advance() {
        if let Some(value) = cursor.current() {
            result = f(result, value);
        }
    }
    result
}

/// Integers from `start` to `end`, exclusive of `end`.
///
/// Ascends when `end > start` and descends when `end < start`, one step at a
/// time. Equal bounds give the single-element sequence `[start]`. Works for
/// unsigned types in both directions, e.g. `range(5u8, 0)`.
pub fn range<T: PrimInt>(start: T, end: T) -> Sequence<T> {
    let (span, ascending) = match start.cmp(&end) {
        Ordering::Equal => return Sequence::from(vec![start]),
        Ordering::Less => (end.checked_sub(&start), true),
        Ordering::Greater => (start.checked_sub(&end), false),
    };

    // A span that overflows T (e.g. i8::MIN..i8::MAX) just starts unsized
    let mut out = Vec::with_capacity(span.and_then(|s| s.to_usize()).unwrap_or(0));
    let mut i = start;
    while i != end {
        out.push(i);
        i = if ascending { i + T::one() } else { i - T::one() };
    }
    Sequence::from(out)
}

/// Additive fold, zero for an empty sequence
pub fn sum<V, E>(seq: &E) -> V
where
    V: Zero + Clone,
    E: Enumerable<V> + ?Sized,
{
    reduce(seq, |acc: V, value| acc + value.clone(), V::zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> Sequence<i32> {
        Sequence::from(vec![7, 2, 9, 4, 1, 8])
    }

    #[test]
    fn test_each_visits_in_order() {
        let mut seen = Vec::new();
        each(&numbers(), |v| seen.push(*v));
        assert_eq!(seen, vec![7, 2, 9, 4, 1, 8]);
    }

    #[test]
    fn test_all() {
        assert!(all(&numbers(), |v| *v > 0));
        assert!(!all(&numbers(), |v| *v > 1));
        assert!(all(&Sequence::<i32>::empty(), |_| false));
    }

    #[test]
    fn test_all_short_circuits() {
        let mut calls = 0;
        let result = all(&numbers(), |v| {
            calls += 1;
            *v != 2
        });
        assert!(!result);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_any() {
        assert!(any(&numbers(), |v| *v == 4));
        assert!(!any(&numbers(), |v| *v > 100));
        assert!(!any(&Sequence::<i32>::empty(), |_| true));
    }

    #[test]
    fn test_any_short_circuits() {
        let mut calls = 0;
        assert!(any(&numbers(), |v| {
            calls += 1;
            *v == 9
        }));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_count() {
        assert_eq!(count(&numbers(), |v| v % 2 == 0), 3);
        assert_eq!(count(&numbers(), |_| false), 0);
    }

    #[test]
    fn test_map() {
        let squared = map(&numbers(), |v| v * v);
        assert_eq!(squared.values(), &[49, 4, 81, 16, 1, 64]);

        let labels = map(&numbers(), |v| format!("#{v}"));
        assert_eq!(labels.values()[0], "#7");
    }

    #[test]
    fn test_filter() {
        let evens = filter(&numbers(), |v| v % 2 == 0);
        assert_eq!(evens.values(), &[2, 4, 8]);
    }

    #[test]
    fn test_operators_do_not_mutate_source() {
        let seq = numbers();
        let _ = filter(&seq, |v| *v > 5);
        let _ = map(&seq, |v| v + 1);
        assert_eq!(seq.values(), &[7, 2, 9, 4, 1, 8]);
    }

    #[test]
    fn test_reduce() {
        assert_eq!(reduce(&numbers(), |acc, v| acc + v, 0), 31);
        // Left fold keeps order
        let joined = reduce(&numbers(), |acc: String, v| format!("{acc}{v}"), String::new());
        assert_eq!(joined, "729418");
        assert_eq!(reduce(&Sequence::<i32>::empty(), |acc, v| acc + v, 42), 42);
    }

    #[test]
    fn test_range_ascending() {
        assert_eq!(range(0, 5).values(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_range_descending() {
        assert_eq!(range(10, 5).values(), &[10, 9, 8, 7, 6]);
    }

    #[test]
    fn test_range_single() {
        assert_eq!(range(10, 10).values(), &[10]);
    }

    #[test]
    fn test_range_unsigned_descending() {
        assert_eq!(range(3_u8, 0).values(), &[3, 2, 1]);
    }

    #[test]
    fn test_range_full_i8_span() {
        let seq = range(i8::MIN, i8::MAX);
        assert_eq!(seq.len(), 255);
        assert_eq!(seq.values()[0], i8::MIN);
        assert_eq!(seq.values()[254], i8::MAX - 1);
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum(&numbers()), 31);
        assert_eq!(sum(&Sequence::<u64>::empty()), 0);
        assert!((sum(&Sequence::from(vec![0.5_f64, 0.25])) - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_operators_accept_plain_vectors() {
        let data = vec![1, 2, 3];
        assert_eq!(sum(&data), 6);
        assert_eq!(count(data.as_slice(), |v| *v > 1), 2);
    }
}
