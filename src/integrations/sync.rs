use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::domain::ContentItem;
use crate::integrations::CrmSync;

/// Message type for the CRM sync worker
#[derive(Debug)]
pub enum SyncMessage {
    /// Push a freshly saved item
    Push(Box<ContentItem>),
    /// Stop the worker
    Shutdown,
}

/// Handle to hand saved items to the CRM sync worker.
///
/// Dispatch never waits for the CRM: the save has already happened locally
/// and nothing the CRM reports can undo it.
#[derive(Clone)]
pub struct SyncHandle {
    tx: mpsc::Sender<SyncMessage>,
}

impl SyncHandle {
    /// Queue an item for sync. Drops it with a warning if the queue is full
    /// or the worker is gone.
    pub fn dispatch(&self, item: ContentItem) {
        let id = item.id.clone();
        if let Err(e) = self.tx.try_send(SyncMessage::Push(Box::new(item))) {
            warn!("Failed to queue item {} for CRM sync: {}", id, e);
        }
    }

    pub async fn shutdown(&self) {
        let _ = self.tx.send(SyncMessage::Shutdown).await;
    }
}

struct SyncWorker {
    crm: Arc<dyn CrmSync>,
    rx: mpsc::Receiver<SyncMessage>,
}

impl SyncWorker {
    async fn run(mut self) {
        info!("CRM sync worker started");

        while let Some(msg) = self.rx.recv().await {
            match msg {
                SyncMessage::Push(item) => {
                    // One task per push so a slow CRM call doesn't hold up the queue
                    let crm = self.crm.clone();
                    tokio::spawn(async move {
                        match crm.push(&item).await {
                            Ok(true) => info!("Synced item {} to CRM", item.id),
                            Ok(false) => warn!("CRM declined item {}", item.id),
                            Err(e) => error!("CRM sync failed for item {}: {}", item.id, e),
                        }
                    });
                }
                SyncMessage::Shutdown => {
                    info!("CRM sync worker shutting down");
                    break;
                }
            }
        }
    }
}

/// Spawn the CRM sync worker as a tokio task
pub fn spawn_crm_sync(crm: Arc<dyn CrmSync>, queue_size: usize) -> SyncHandle {
    let (tx, rx) = mpsc::channel(queue_size.max(1));
    let worker = SyncWorker { crm, rx };

    tokio::spawn(async move {
        worker.run().await;
    });

    SyncHandle { tx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{HooklineError, Result};
    use crate::integrations::mock::seed_items;
    use async_trait::async_trait;
    use chrono::Utc;

    struct Recorder {
        tx: mpsc::UnboundedSender<String>,
        fail: bool,
    }

    #[async_trait]
    impl CrmSync for Recorder {
        async fn push(&self, item: &ContentItem) -> Result<bool> {
            let _ = self.tx.send(item.id.clone());
            if self.fail {
                Err(HooklineError::Integration("CRM unavailable".into()))
            } else {
                Ok(true)
            }
        }
    }

    #[tokio::test]
    async fn test_dispatch_reaches_crm() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_crm_sync(Arc::new(Recorder { tx, fail: false }), 4);

        handle.dispatch(seed_items(Utc::now()).remove(2));

        assert_eq!(rx.recv().await.as_deref(), Some("3"));
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_failing_crm_keeps_worker_alive() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_crm_sync(Arc::new(Recorder { tx, fail: true }), 4);
        let items = seed_items(Utc::now());

        handle.dispatch(items[0].clone());
        assert_eq!(rx.recv().await.as_deref(), Some("1"));

        handle.dispatch(items[1].clone());
        assert_eq!(rx.recv().await.as_deref(), Some("2"));
    }
}
