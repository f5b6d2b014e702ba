//! Background write-back of fetched repositories.
//!
//! Batches are queued on a bounded channel and written by a single worker.
//! Enqueueing never waits: a full or closed queue drops the batch with a
//! warning, and store errors are logged and dropped. Durability is eventual.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

use ghfetch_core::github::Repository;
use ghfetch_core::storage::RepositoryStore;

/// Default number of batches the queue holds before dropping.
pub const DEFAULT_PERSIST_QUEUE_CAPACITY: usize = 64;

/// Bounded queue feeding `RepositoryStore::create_repositories`.
pub struct PersistQueue {
    tx: mpsc::Sender<Vec<Repository>>,
    shutdown_tx: broadcast::Sender<()>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl PersistQueue {
    /// Creates the queue and spawns its worker on the current runtime.
    pub fn new(store: Arc<dyn RepositoryStore>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let worker = tokio::spawn(run_worker(store, rx, shutdown_rx));

        Self {
            tx,
            shutdown_tx,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Queues a batch for persistence without waiting.
    ///
    /// Returns `false` if the batch was dropped. Empty batches are ignored.
    pub fn enqueue(&self, repositories: Vec<Repository>) -> bool {
        if repositories.is_empty() {
            return true;
        }

        match self.tx.try_send(repositories) {
            Ok(()) => true,
            Err(TrySendError::Full(batch)) => {
                tracing::warn!(batch_size = batch.len(), "Persist queue full, dropping batch");
                false
            }
            Err(TrySendError::Closed(batch)) => {
                tracing::warn!(batch_size = batch.len(), "Persist queue closed, dropping batch");
                false
            }
        }
    }

    /// Stops intake, writes what is already queued, and waits for the worker.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());

        let handle = self.worker.lock().await.take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "Persist worker ended abnormally");
            }
        }
    }
}

async fn run_worker(
    store: Arc<dyn RepositoryStore>,
    mut rx: mpsc::Receiver<Vec<Repository>>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            batch = rx.recv() => match batch {
                Some(batch) => persist(store.as_ref(), batch).await,
                None => break,
            },
            _ = shutdown_rx.recv() => {
                rx.close();
                while let Some(batch) = rx.recv().await {
                    persist(store.as_ref(), batch).await;
                }
                break;
            }
        }
    }

    tracing::debug!("Persist worker stopped");
}

async fn persist(store: &dyn RepositoryStore, batch: Vec<Repository>) {
    match store.create_repositories(&batch).await {
        Ok(saved) => tracing::debug!(count = saved.len(), "Persisted repositories"),
        Err(err) => tracing::warn!(
            error = %err,
            batch_size = batch.len(),
            "Failed to persist repositories"
        ),
    }
}
