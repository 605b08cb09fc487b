//! Tokio Runtime Bridge
//!
//! Fetches are plain futures. Callers already inside a tokio runtime get
//! their detached tasks spawned there; everything else (a synchronous UI
//! thread, the binary's `main`) goes through one lazily created global
//! runtime.
//!
//! ## Pattern
//!
//! ```text
//! UI event handler
//!       │
//!       ▼
//! store.dispatch_primary(params)
//!       │
//!       ▼
//! spawn_named_in_tokio()  ──▶  current runtime, or the global one
//!       │
//!       ▼
//! state merged on completion
//! ```

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create tokio runtime"))
}

/// Handle of the runtime we are running on, falling back to the global one
fn current_or_global() -> Handle {
    Handle::try_current().unwrap_or_else(|_| get_runtime().handle().clone())
}

/// Spawn a detached task
///
/// Dropping the returned handle does not cancel the task.
pub fn spawn_in_tokio<F>(future: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    current_or_global().spawn(future)
}

/// Spawn a detached task with a name (for debugging)
pub fn spawn_named_in_tokio<F>(name: &'static str, future: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::debug!("Spawning tokio task: {}", name);
    spawn_in_tokio(async move {
        future.await;
        tracing::debug!("Tokio task completed: {}", name);
    })
}

/// Block on a future synchronously on the global runtime
///
/// **Warning**: panics when called from inside a runtime. Meant for `main`
/// and synchronous front-ends only.
pub fn block_on<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    get_runtime().block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_spawn_outside_runtime_uses_global() {
        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = flag.clone();

        let handle = spawn_in_tokio(async move {
            flag_clone.store(true, Ordering::SeqCst);
        });

        block_on(handle).expect("task panicked");
        assert!(flag.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_spawn_inside_runtime() {
        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = flag.clone();

        spawn_named_in_tokio("flag", async move {
            flag_clone.store(true, Ordering::SeqCst);
        })
        .await
        .expect("task panicked");

        assert!(flag.load(Ordering::SeqCst));
    }
}
