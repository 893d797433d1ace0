use std::time::Duration;

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// One-shot deferred callbacks. Scheduled tasks cannot be cancelled.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task);
}

#[cfg(feature = "tokio-runtime")]
pub use self::tokio_runtime::TokioScheduler;

#[cfg(feature = "tokio-runtime")]
mod tokio_runtime {
    use std::time::Duration;

    use tokio::runtime::Handle;
    use tokio::time::sleep;
    use tracing::debug;

    use super::{
        Scheduler,
        Task,
    };
    use crate::models::{
        ToastError,
        ToastResult,
    };

    /// Runs tasks on a tokio runtime after a `sleep`.
    #[derive(Clone)]
    pub struct TokioScheduler {
        handle: Handle,
    }

    impl TokioScheduler {
        pub fn new(handle: Handle) -> Self {
            Self { handle }
        }

        pub fn current() -> ToastResult<Self> {
            let handle = Handle::try_current().map_err(|e| ToastError::NoRuntime(e.to_string()))?;
            Ok(Self::new(handle))
        }
    }

    impl Scheduler for TokioScheduler {
        fn schedule(&self, delay: Duration, task: Task) {
            debug!("Scheduling task in {:?}", delay);
            self.handle.spawn(async move {
                sleep(delay).await;
                task();
            });
        }
    }

}
