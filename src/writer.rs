use crate::error::StoreError;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Single-writer queue for snapshots.
///
/// Snapshots are written one at a time in submission order. When several are
/// queued behind a slow write only the newest is written, so the durable state
/// always ends at the last submitted snapshot.
pub struct SnapshotWriter {
    tx: UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl SnapshotWriter {
    /// Spawn the writer task on the current tokio runtime.
    pub fn spawn<S: KeyValueStore>(store: Arc<S>, key: String) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(store, key, rx));
        Self { tx, task }
    }

    /// Queue a snapshot. Returns immediately.
    pub fn submit(&self, snapshot: String) -> Result<(), StoreError> {
        self.tx.send(snapshot).map_err(|_| StoreError::Closed)
    }

    /// Stop accepting snapshots and wait until everything queued is written.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            error!("snapshot writer task failed: {e}");
        }
    }
}

async fn run<S: KeyValueStore>(store: Arc<S>, key: String, mut rx: UnboundedReceiver<String>) {
    while let Some(mut snapshot) = rx.recv().await {
        let mut skipped = 0usize;
        while let Ok(newer) = rx.try_recv() {
            snapshot = newer;
            skipped += 1;
        }
        if skipped > 0 {
            debug!(skipped, "collapsed queued snapshots");
        }

        match store.set(&key, &snapshot).await {
            Ok(()) => debug!(bytes = snapshot.len(), "snapshot written"),
            Err(e) => error!(key = %key, "snapshot write failed: {}", e.user_message()),
        }
    }
    debug!("snapshot writer drained");
}
