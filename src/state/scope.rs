//! Component task scope
//!
//! Every panel owns a `TaskScope`. Network work is spawned through it so
//! that tearing the panel down aborts whatever is still in flight, and a
//! result that arrives after the panel moved on (dropped, or superseded by
//! a newer load) is discarded instead of applied.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error};

/// Lifetime scope for a component's background work
#[derive(Debug)]
pub struct TaskScope {
    name: &'static str,
    generation: Arc<AtomicU64>,
    handles: Vec<AbortHandle>,
}

/// Handle to a task spawned in a scope
#[derive(Debug)]
pub struct ScopedTask<T> {
    handle: JoinHandle<T>,
    spawned_at: u64,
    generation: Arc<AtomicU64>,
    scope: &'static str,
}

impl TaskScope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            generation: Arc::new(AtomicU64::new(0)),
            handles: Vec::new(),
        }
    }

    /// Spawn `future` tied to the current generation of this scope
    pub fn spawn<F, T>(&mut self, future: F) -> ScopedTask<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.handles.retain(|h| !h.is_finished());

        let handle = tokio::spawn(future);
        self.handles.push(handle.abort_handle());

        ScopedTask {
            handle,
            spawned_at: self.generation.load(Ordering::SeqCst),
            generation: Arc::clone(&self.generation),
            scope: self.name,
        }
    }

    /// Abort in-flight work and invalidate results not yet applied
    pub fn supersede(&mut self) {
        let previous = self.generation.fetch_add(1, Ordering::SeqCst);
        let aborted = self.abort_all();
        debug!(scope = self.name, generation = previous + 1, aborted = aborted, "Scope superseded");
    }

    /// Number of tasks still running
    pub fn in_flight(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    fn abort_all(&mut self) -> usize {
        let mut aborted = 0;
        for handle in self.handles.drain(..) {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        aborted
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let aborted = self.abort_all();
        if aborted > 0 {
            debug!(scope = self.name, aborted = aborted, "Scope dropped with tasks in flight");
        }
    }
}

impl<T> ScopedTask<T> {
    /// Wait for the result
    ///
    /// Returns `None` when the task was aborted or its scope has moved on
    /// since it was spawned.
    pub async fn join(self) -> Option<T> {
        let result = match self.handle.await {
            Ok(value) => value,
            Err(e) if e.is_cancelled() => {
                debug!(scope = self.scope, "Scoped task cancelled");
                return None;
            }
            Err(e) => {
                error!(scope = self.scope, error = %e, "Scoped task panicked");
                return None;
            }
        };

        if self.generation.load(Ordering::SeqCst) != self.spawned_at {
            debug!(scope = self.scope, "Discarding stale result");
            return None;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_result_applied_when_current() {
        let mut scope = TaskScope::new("test");
        let task = scope.spawn(async { 42 });
        assert_eq!(task.join().await, Some(42));
    }

    #[tokio::test]
    async fn test_superseded_result_is_discarded() {
        let mut scope = TaskScope::new("test");
        let task = scope.spawn(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            1
        });
        scope.supersede();
        assert_eq!(task.join().await, None);

        let fresh = scope.spawn(async { 2 });
        assert_eq!(fresh.join().await, Some(2));
    }

    #[tokio::test]
    async fn test_drop_aborts_in_flight_work() {
        let mut scope = TaskScope::new("test");
        let task = scope.spawn(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "late"
        });
        assert_eq!(scope.in_flight(), 1);
        drop(scope);
        assert_eq!(task.join().await, None);
    }
}
