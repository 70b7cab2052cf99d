use crate::error::ProviderError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

pub const DEFAULT_MAX_WORKERS: usize = 5;

/// Process-wide bound on in-flight provider calls.
///
/// Built once at startup and cloned into every component that talks to a
/// provider. Each call holds a permit for its whole duration and is abandoned
/// once its timeout elapses.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    pub fn new(max_workers: usize) -> Self {
        let size = max_workers.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub async fn run<F, T>(&self, timeout: Duration, call: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ProviderError::PoolClosed)?;
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(Some(timeout))),
        }
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORKERS)
    }
}
