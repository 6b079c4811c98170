//! Background email delivery.
//!
//! A bounded channel feeds a small fixed pool of worker tasks so the payment
//! HTTP response is never blocked on mail delivery. Submission is best-effort:
//! when the queue is full or the workers are gone the job is dropped with a
//! warning, and delivery failures are logged, never surfaced to the caller.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::services::email::Mailer;

const QUEUE_CAPACITY: usize = 32;

#[derive(Debug, Clone)]
pub struct EmailJob {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Handle for submitting fire-and-forget email jobs.
#[derive(Clone)]
pub struct EmailJobQueue {
    tx: mpsc::Sender<EmailJob>,
}

impl EmailJobQueue {
    /// Spawn `workers` delivery tasks sharing one bounded queue.
    pub fn spawn(mailer: Arc<dyn Mailer>, workers: usize) -> Self {
        let (tx, rx) = mpsc::channel::<EmailJob>(QUEUE_CAPACITY);
        let rx = Arc::new(tokio::sync::Mutex::new(rx));

        for worker_id in 0..workers.max(1) {
            let rx = Arc::clone(&rx);
            let mailer = Arc::clone(&mailer);

            tokio::spawn(async move {
                loop {
                    let job = {
                        let mut rx = rx.lock().await;
                        rx.recv().await
                    };

                    let Some(job) = job else {
                        tracing::debug!("Email worker {} shutting down", worker_id);
                        break;
                    };

                    if let Err(e) = mailer.send(&job.to, &job.subject, &job.html).await {
                        tracing::warn!("Failed to send email to {}: {}", job.to, e);
                    } else {
                        tracing::debug!("Email worker {} delivered mail to {}", worker_id, job.to);
                    }
                }
            });
        }

        Self { tx }
    }

    /// Enqueue a job without waiting. Dropped with a warning when the queue is
    /// full or closed.
    pub fn submit(&self, job: EmailJob) {
        if let Err(e) = self.tx.try_send(job) {
            tracing::warn!("Dropping background email job: {}", e);
        }
    }
}
