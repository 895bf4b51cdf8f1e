use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::service::JobEnvelope;
use super::store::{QueueStore, ReceivedJob};
use crate::config;

/// A handler for one job type. Errors leave the job in the queue for
/// redelivery once its visibility window lapses.
#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn handle(&self, data: Value) -> anyhow::Result<()>;
}

struct WorkerState {
    running: AtomicBool,
    poll_interval_secs: u64,
    handler_types: Vec<String>,
}

/// Queryable handle to a spawned worker
#[derive(Clone)]
pub struct WorkerHandle {
    state: Arc<WorkerState>,
    shutdown: watch::Sender<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkerStatus {
    pub is_running: bool,
    pub poll_interval_secs: u64,
    pub registered_handlers: Vec<String>,
    pub handler_count: usize,
}

impl WorkerHandle {
    pub fn status(&self) -> WorkerStatus {
        WorkerStatus {
            is_running: self.state.running.load(Ordering::SeqCst),
            poll_interval_secs: self.state.poll_interval_secs,
            registered_handlers: self.state.handler_types.clone(),
            handler_count: self.state.handler_types.len(),
        }
    }

    /// Ask the worker loop to stop after the current poll
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }
}

/// Fixed-interval polling worker that dispatches queued jobs to registered
/// handlers. Runs as its own tokio task, independent of request handling.
pub struct QueueWorker {
    store: QueueStore,
    handlers: HashMap<String, Arc<dyn JobHandler>>,
    poll_interval: Duration,
    batch_size: i64,
}

impl QueueWorker {
    pub fn new(store: QueueStore) -> Self {
        let queue_config = &config::config().queue;
        Self {
            store,
            handlers: HashMap::new(),
            poll_interval: Duration::from_secs(queue_config.poll_interval_secs),
            batch_size: queue_config.batch_size,
        }
    }

    /// Register a handler for a specific job type
    pub fn register_handler(&mut self, job_type: impl Into<String>, handler: Arc<dyn JobHandler>) {
        let job_type = job_type.into();
        info!(job_type, "Registered queue handler");
        self.handlers.insert(job_type, handler);
    }

    /// Start the polling loop on a background task and return a handle for
    /// status queries and shutdown
    pub fn spawn(self) -> WorkerHandle {
        let mut handler_types: Vec<String> = self.handlers.keys().cloned().collect();
        handler_types.sort();

        let state = Arc::new(WorkerState {
            running: AtomicBool::new(true),
            poll_interval_secs: self.poll_interval.as_secs(),
            handler_types,
        });
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task_state = state.clone();
        tokio::spawn(async move {
            info!(
                poll_interval_secs = self.poll_interval.as_secs(),
                "Queue worker started"
            );
            let mut interval = tokio::time::interval(self.poll_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = interval.tick() => {
                        if let Err(e) = self.process_available_jobs().await {
                            error!("Error during job processing: {}", e);
                        }
                    }
                }
            }

            task_state.running.store(false, Ordering::SeqCst);
            info!("Queue worker stopped");
        });

        WorkerHandle {
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Process all jobs visible in a single poll cycle. Jobs in a batch are
    /// handled concurrently; there is no cross-job ordering guarantee.
    async fn process_available_jobs(&self) -> Result<(), super::QueueError> {
        let jobs = self.store.receive(self.batch_size).await?;

        if jobs.is_empty() {
            debug!("No jobs available in queue");
            return Ok(());
        }

        info!(count = jobs.len(), "Processing jobs from queue");
        futures::future::join_all(jobs.into_iter().map(|job| self.process_job(job))).await;
        Ok(())
    }

    async fn process_job(&self, job: ReceivedJob) {
        let message_id = job.id;

        // Malformed envelopes and unknown job types are deleted after a
        // warning; redelivery is reserved for handler failures.
        let envelope: JobEnvelope = match serde_json::from_value(job.payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(%message_id, "Discarding malformed job payload: {}", e);
                self.acknowledge(message_id).await;
                return;
            }
        };

        let handler = match self.handlers.get(&envelope.job_type) {
            Some(handler) => handler,
            None => {
                warn!(
                    %message_id,
                    job_type = envelope.job_type,
                    "Discarding job with no registered handler"
                );
                self.acknowledge(message_id).await;
                return;
            }
        };

        debug!(%message_id, job_type = envelope.job_type, "Processing job");

        match handler.handle(envelope.data).await {
            Ok(()) => {
                self.acknowledge(message_id).await;
                debug!(%message_id, job_type = envelope.job_type, "Job processed");
            }
            Err(e) => {
                // Left in the queue: redelivered after the visibility timeout
                warn!(
                    %message_id,
                    job_type = envelope.job_type,
                    receive_count = job.receive_count,
                    "Job failed, leaving for redelivery: {}",
                    e
                );
            }
        }
    }

    async fn acknowledge(&self, message_id: uuid::Uuid) {
        if let Err(e) = self.store.delete(message_id).await {
            error!(%message_id, "Failed to delete processed job: {}", e);
        }
    }
}
