// [apps/coordinator/src/state/stream_hub.rs]
/*!
 * APARATO: STREAM HUB (V1.0)
 * RESPONSABILIDAD: FAN-OUT ACOTADO DE FRAGMENTOS POR TAREA HACIA EL CLIENTE
 */

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use iris_domain_models::StreamChunk;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::errors::CoordinatorError;

/// Sessions older than this are swept regardless of completion state.
pub const SESSION_TTL_SECS: i64 = 600;

struct StreamSession {
    sender: mpsc::Sender<StreamChunk>,
    chunks_received: u64,
    is_complete: bool,
    created_at: DateTime<Utc>,
}

pub struct StreamHub {
    sessions: RwLock<HashMap<Uuid, StreamSession>>,
}

impl StreamHub {
    pub fn new() -> Self {
        Self { sessions: RwLock::new(HashMap::new()) }
    }

    /// Creates a single-subscriber channel for a task's chunks; returns the receiver.
    #[instrument(skip(self))]
    pub fn create(&self, task_id: Uuid) -> mpsc::Receiver<StreamChunk> {
        let (sender, receiver) = mpsc::channel(64);
        let mut sessions = self.sessions.write().expect("stream hub lock poisoned");
        sessions.insert(
            task_id,
            StreamSession { sender, chunks_received: 0, is_complete: false, created_at: Utc::now() },
        );
        receiver
    }

    /// Pushes a chunk in order. A dropped receiver (client disconnected) is not an
    /// error; a full queue is never waited on — the chunk is dropped with a logged
    /// warning so a stalled HTTP subscriber can never stall the worker-receive path.
    #[instrument(skip(self, content))]
    pub async fn push_chunk(&self, task_id: Uuid, content: String) {
        let sender = {
            let mut sessions = self.sessions.write().expect("stream hub lock poisoned");
            let Some(session) = sessions.get_mut(&task_id) else { return };
            session.chunks_received += 1;
            session.sender.clone()
        };
        Self::try_deliver(task_id, sender.try_send(StreamChunk::Chunk { content }));
    }

    #[instrument(skip(self, final_response))]
    pub async fn complete(&self, task_id: Uuid, final_response: String) {
        let sender = {
            let mut sessions = self.sessions.write().expect("stream hub lock poisoned");
            let Some(session) = sessions.get_mut(&task_id) else { return };
            session.is_complete = true;
            session.sender.clone()
        };
        Self::try_deliver(task_id, sender.try_send(StreamChunk::Done { final_response }));
    }

    #[instrument(skip(self, message))]
    pub async fn fail(&self, task_id: Uuid, message: String) {
        let sender = {
            let mut sessions = self.sessions.write().expect("stream hub lock poisoned");
            let Some(session) = sessions.get_mut(&task_id) else { return };
            session.is_complete = true;
            session.sender.clone()
        };
        Self::try_deliver(task_id, sender.try_send(StreamChunk::Error { message }));
    }

    fn try_deliver(task_id: Uuid, result: Result<(), TrySendError<StreamChunk>>) {
        if let Err(TrySendError::Full(_)) = result {
            let error = CoordinatorError::Overloaded(format!("stream queue full for task {task_id}"));
            warn!(%task_id, %error, "dropping stream chunk, subscriber is not keeping up");
        }
    }

    /// Removes sessions past their TTL. Intended to run on a periodic daemon.
    pub fn sweep_expired(&self) -> usize {
        let threshold = Utc::now() - chrono::Duration::seconds(SESSION_TTL_SECS);
        let mut sessions = self.sessions.write().expect("stream hub lock poisoned");
        let before = sessions.len();
        sessions.retain(|_, session| session.created_at > threshold);
        let purged = before - sessions.len();
        if purged > 0 {
            debug!(purged, "swept expired stream sessions");
        }
        purged
    }
}

impl Default for StreamHub {
    fn default() -> Self {
        Self::new()
    }
}
