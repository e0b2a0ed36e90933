// ── Supervised background tasks ──
//
// Every long-running task runs inside its own tokio task; a watcher awaits
// it and turns a panic into a logged error, so a fault in one poller never
// reaches its siblings or the render loop.

use std::any::Any;
use std::future::Future;

use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Spawn `future` and contain any panic it raises.
///
/// The returned handle resolves once the task has ended, whether it
/// finished, panicked, or was aborted.
pub fn spawn_supervised<F>(name: &'static str, future: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let inner = tokio::spawn(future);
    tokio::spawn(async move {
        match inner.await {
            Ok(()) => debug!(task = name, "task finished"),
            Err(e) if e.is_panic() => {
                let message = panic_message(&e.into_panic());
                error!(task = name, "task panicked: {message}");
            }
            Err(e) => debug!(task = name, error = %e, "task aborted"),
        }
    })
}

fn panic_message(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn panic_is_contained() {
        let handle = spawn_supervised("boom", async { panic!("poll body exploded") });
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn sibling_keeps_running_after_panic() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let crashing = spawn_supervised("boom", async { panic!("first") });
        let healthy = spawn_supervised("ok", async move {
            tx.send(42).unwrap();
        });
        crashing.await.unwrap();
        healthy.await.unwrap();
        assert_eq!(rx.await.unwrap(), 42);
    }

    #[test]
    fn panic_message_handles_owned_strings() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(&payload), "owned");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(&payload), "<non-string panic payload>");
    }
}
