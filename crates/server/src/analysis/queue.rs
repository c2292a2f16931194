use super::client::{AnalysisResult, AnalyzerClient};
use log::{debug, info};
use serde::Serialize;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use thiserror::Error;
use tokio::sync::{RwLock, mpsc};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Error, Debug)]
#[error("Analysis queue is no longer running")]
pub struct QueueClosed;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Done { result: AnalysisResult },
}

#[derive(Debug)]
struct AnalysisJob {
    id: Uuid,
    text: String,
}

#[derive(Debug)]
struct JobEntry {
    owner: String,
    state: JobState,
    finished_at: Option<Instant>,
}

type JobTable = Arc<RwLock<HashMap<Uuid, JobEntry>>>;

/// Unbounded queue drained by a single background consumer.
///
/// Jobs run one at a time in submission order. The analyzer client never
/// fails, so a bad job only costs a fallback result and the loop moves on.
/// Finished jobs stay readable by their submitter for `retention`, then the
/// consumer drops them.
#[derive(Clone)]
pub struct AnalysisQueue {
    sender: mpsc::UnboundedSender<AnalysisJob>,
    jobs: JobTable,
}

impl AnalysisQueue {
    /// Spawns the consumer on the current tokio runtime
    pub fn start(client: AnalyzerClient, retention: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let jobs = JobTable::default();

        tokio::spawn(Self::run(client, receiver, Arc::clone(&jobs), retention));

        Self { sender, jobs }
    }

    pub async fn enqueue(&self, owner: &str, text: String) -> Result<Uuid, QueueClosed> {
        let id = Uuid::new_v4();
        let entry = JobEntry {
            owner: owner.to_string(),
            state: JobState::Queued,
            finished_at: None,
        };
        self.jobs.write().await.insert(id, entry);

        if self.sender.send(AnalysisJob { id, text }).is_err() {
            self.jobs.write().await.remove(&id);
            return Err(QueueClosed);
        }

        debug!("Queued analysis job {id}");
        Ok(id)
    }

    /// The job's state, visible to its submitter only
    pub async fn status(&self, id: Uuid, owner: &str) -> Option<JobState> {
        self.jobs
            .read()
            .await
            .get(&id)
            .filter(|entry| entry.owner == owner)
            .map(|entry| entry.state.clone())
    }

    async fn run(
        client: AnalyzerClient,
        mut receiver: mpsc::UnboundedReceiver<AnalysisJob>,
        jobs: JobTable,
        retention: Duration,
    ) {
        while let Some(job) = receiver.recv().await {
            debug!("Running analysis job {}", job.id);
            let result = client.analyze(&job.text).await;

            let now = Instant::now();
            let mut table = jobs.write().await;
            Self::evict_expired(&mut table, now, retention);
            if let Some(entry) = table.get_mut(&job.id) {
                entry.state = JobState::Done { result };
                entry.finished_at = Some(now);
            }
        }

        info!("Analysis queue stopped");
    }

    fn evict_expired(table: &mut HashMap<Uuid, JobEntry>, now: Instant, retention: Duration) {
        let before = table.len();
        table.retain(|_, entry| match entry.finished_at {
            Some(finished_at) => now.duration_since(finished_at) < retention,
            None => true,
        });

        let evicted = before - table.len();
        if evicted > 0 {
            debug!("Evicted {evicted} finished analysis jobs");
        }
    }
}
