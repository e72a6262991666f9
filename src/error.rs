use std::any::Any;

use thiserror::Error;

/// Failures surfaced by the parallel operators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParallelError {
    /// A user-supplied function panicked inside a worker.
    ///
    /// When several workers panic, `partition` is the lowest partition index
    /// among them.
    #[error("worker for partition {partition} panicked: {message}")]
    WorkerPanicked { partition: usize, message: String },
}

impl ParallelError {
    pub(crate) fn worker_panicked(partition: usize, payload: Box<dyn Any + Send>) -> Self {
        ParallelError::WorkerPanicked {
            partition,
            message: panic_message(payload.as_ref()),
        }
    }
}

/// Render a panic payload as text. `panic!` produces `&str` or `String`.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
