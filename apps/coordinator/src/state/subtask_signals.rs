// [apps/coordinator/src/state/subtask_signals.rs]
/*!
 * APARATO: SUBTASK SIGNAL MAP (V1.0)
 * RESPONSABILIDAD: PUENTE ENTRE EL SOCKET DE INGRESO Y EL ORQUESTADOR QUE ESPERA
 */

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::oneshot;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum SubtaskOutcome {
    Completed { response: String, execution_time_ms: u64 },
    Failed { reason: String },
}

pub struct SubtaskSignals {
    pending: Mutex<HashMap<Uuid, oneshot::Sender<SubtaskOutcome>>>,
}

impl SubtaskSignals {
    pub fn new() -> Self {
        Self { pending: Mutex::new(HashMap::new()) }
    }

    /// Registers a waiter for a subtask's outcome; the orchestrator awaits the receiver.
    pub fn register(&self, subtask_id: Uuid) -> oneshot::Receiver<SubtaskOutcome> {
        let (sender, receiver) = oneshot::channel();
        self.pending.lock().expect("subtask signals lock poisoned").insert(subtask_id, sender);
        receiver
    }

    /// Delivers an outcome to a registered waiter, if one still exists (it may have
    /// already timed out and been reassigned).
    pub fn deliver(&self, subtask_id: Uuid, outcome: SubtaskOutcome) -> bool {
        let sender = self.pending.lock().expect("subtask signals lock poisoned").remove(&subtask_id);
        match sender {
            Some(sender) => sender.send(outcome).is_ok(),
            None => false,
        }
    }

    pub fn cancel(&self, subtask_id: Uuid) {
        self.pending.lock().expect("subtask signals lock poisoned").remove(&subtask_id);
    }
}

impl Default for SubtaskSignals {
    fn default() -> Self {
        Self::new()
    }
}
