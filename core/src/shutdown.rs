//! Cooperative shutdown for overlay tasks
//!
//! Every long-lived loop (poll loops, the push listener, in-flight cycles)
//! holds a `ShutdownSignal` and checks it at its suspension points. Dropping
//! the controller also signals shutdown, so a crashed owner cannot leave
//! overlay tasks running forever.

use tokio::sync::watch;

/// Sending half: owned by whoever manages overlay lifetimes.
pub struct ShutdownController {
    tx: watch::Sender<bool>,
}

impl ShutdownController {
    /// Signal all listeners to stop.
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }

    /// Create a fresh signal for a new task.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl Drop for ShutdownController {
    fn drop(&mut self) {
        let _ = self.tx.send(true);
    }
}

/// Receiving half: cloneable, one per task.
#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Check without waiting.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until shutdown is signalled. Returns immediately if it already was.
    pub async fn cancelled(&mut self) {
        // wait_for returns Err only if the controller is gone, which also
        // means shutdown
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}

/// Create a linked controller/signal pair.
pub fn channel() -> (ShutdownController, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownController { tx }, ShutdownSignal { rx })
}
