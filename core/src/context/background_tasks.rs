use tokio::task::JoinHandle;

/// Handles for the long-lived tasks an overlay session spawns.
#[derive(Default)]
pub struct BackgroundTasks {
    pub overlays: Vec<JoinHandle<()>>,
    pub push_source: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Wait for every task to finish (after shutdown has been signalled).
    pub async fn join_all(&mut self) {
        if let Some(handle) = self.push_source.take() {
            let _ = handle.await;
        }
        for handle in self.overlays.drain(..) {
            let _ = handle.await;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty() && self.push_source.is_none()
    }
}
