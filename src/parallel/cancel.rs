use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot broadcast signal shared by the workers of a single call.
///
/// Workers poll [`is_fired`](Self::is_fired) before evaluating each element.
/// An evaluation already in progress when the signal fires always completes;
/// the worker stops before its next element.
#[derive(Debug, Default)]
pub(crate) struct CancelSignal {
    fired: AtomicBool,
}

impl CancelSignal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fire the signal. Returns true only for the call that actually fired it.
    pub(crate) fn fire(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}
