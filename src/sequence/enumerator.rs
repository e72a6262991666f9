use std::sync::Arc;

/// Cursor over a captured snapshot of a sequence.
///
/// A fresh cursor sits before the first element: [`current`](Self::current)
/// returns `None` until the first successful [`advance`](Self::advance), and
/// again once the cursor runs off the end. [`reset`](Self::reset) rewinds to
/// the pre-first state so the same snapshot can be traversed again.
///
/// Advancing takes `&mut self`, so a single cursor cannot be driven from
/// several threads at once. Create one cursor per thread instead.
#[derive(Debug, Clone)]
pub struct Enumerator<V> {
    elements: Arc<[V]>,
    next: usize,
    current: Option<usize>,
}

impl<V> Enumerator<V> {
    pub(crate) fn new(elements: Arc<[V]>) -> Self {
        Self {
            elements,
            next: 0,
            current: None,
        }
    }

    /// Value yielded by the last successful advance
    pub fn current(&self) -> Option<&V> {
        self.current.map(|index| &self.elements[index])
    }

    /// Move to the next element. Returns false once the snapshot is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.next >= self.elements.len() {
            self.current = None;
            return false;
        }

        self.current = Some(self.next);
        self.next += 1;
        true
    }

    pub fn reset(&mut self) {
        self.next = 0;
        self.current = None;
    }

    /// Number of elements in the captured snapshot
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<V: Clone> Iterator for Enumerator<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        if self.advance() {
            self.current().cloned()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.elements.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<V: Clone> ExactSizeIterator for Enumerator<V> {}
