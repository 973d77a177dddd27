// [apps/coordinator/src/services/task_orchestrator.rs]
/*!
 * =================================================================
 * APARATO: TASK ORCHESTRATOR (V1.0 - COORDINATOR GOLD)
 * CLASIFICACIÓN: APPLICATION SERVICE (ESTRATO L1-APP)
 * RESPONSABILIDAD: CICLO DE VIDA COMPLETO DE UNA TAREA DE CLIENTE
 *
 * Clasifica, divide, asigna con reintentos y reasignación, espera
 * resultados por subtarea y agrega la respuesta final.
 * =================================================================
 */

use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use iris_core_crypto_envelope::seal;
use iris_core_wire_protocol::{Frame, FrameBody, TaskAssignPayload};
use iris_domain_classifier::{Classifier, ClassifyContext};
use iris_domain_models::{Difficulty, Subtask, SubtaskStatus, Task, TaskMode, TaskStatus};
use iris_infra_store::repositories::TaskRepository;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::CoordinatorError;
use crate::services::aggregator;
use crate::services::divider;
use crate::services::reputation_service::{ReputationReason, ReputationService};
use crate::state::subtask_signals::SubtaskOutcome;
use crate::state::AppState;
use crate::util::decode_node_public_key;

const MAX_RETRIES: u32 = 3;
const RETRY_BASE_MS: u64 = 500;

pub struct TaskOrchestrator<'a> {
    state: &'a AppState,
}

impl<'a> TaskOrchestrator<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip(self, prompt))]
    pub async fn submit(
        &self,
        principal_id: String,
        prompt: String,
        mode: TaskMode,
        has_files: bool,
        difficulty_override: Option<Difficulty>,
        streaming: bool,
    ) -> Result<Uuid, CoordinatorError> {
        let difficulty = if has_files {
            Difficulty::Advanced
        } else if let Some(explicit) = difficulty_override {
            explicit
        } else {
            self.state
                .classifier
                .classify(&prompt, &ClassifyContext { subtask_count: None, has_files })
                .await
                .unwrap_or(Difficulty::Simple)
        };

        if has_files && !self.state.node_registry.has_online_vision_worker() {
            return self.fail_immediately(principal_id, prompt, mode, difficulty, has_files).await;
        }

        let task = Task {
            id: Uuid::new_v4(),
            principal_id,
            mode,
            difficulty,
            original_prompt: prompt.clone(),
            final_response: None,
            status: TaskStatus::Pending,
            has_files,
            created_at: Utc::now(),
            completed_at: None,
        };

        let task_repo = TaskRepository::new(&self.state.store);
        task_repo.insert(&task).await?;

        let pieces = match mode {
            TaskMode::Subtasks => divider::divide_subtasks(&prompt),
            TaskMode::Consensus => divider::divide_consensus(&prompt),
            TaskMode::Context => divider::divide_context(&prompt),
        };

        if pieces.is_empty() {
            task_repo.finalize(task.id, TaskStatus::Failed, None, Utc::now()).await?;
            return Err(CoordinatorError::InvalidFormat("prompt produced no subtasks".to_string()));
        }

        task_repo.update_status(task.id, TaskStatus::Processing).await?;

        let subtasks: Vec<Subtask> = pieces
            .into_iter()
            .map(|prompt| Subtask {
                id: Uuid::new_v4(),
                task_id: task.id,
                node_id: None,
                prompt,
                response: None,
                status: SubtaskStatus::Pending,
                assigned_at: None,
                completed_at: None,
                execution_time_ms: None,
            })
            .collect();

        for subtask in &subtasks {
            task_repo.insert_subtask(subtask).await?;
        }

        // Streaming is only meaningful when exactly one worker produces this task's
        // entire output; Consensus replication and multi-piece Subtasks mode never stream.
        let streaming_enabled = streaming && subtasks.len() == 1;

        let task_id = task.id;
        let state = self.state.clone();
        tokio::spawn(async move {
            let orchestrator = TaskOrchestrator { state: &state };
            orchestrator
                .run_to_completion(task_id, task.mode, task.difficulty, has_files, streaming_enabled, subtasks)
                .await;
        });

        Ok(task_id)
    }

    /// I5: a task with images and no vision-capable worker online ends Failed
    /// within one scheduling cycle, with no TASK_ASSIGN ever sent.
    async fn fail_immediately(
        &self,
        principal_id: String,
        prompt: String,
        mode: TaskMode,
        difficulty: Difficulty,
        has_files: bool,
    ) -> Result<Uuid, CoordinatorError> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            principal_id,
            mode,
            difficulty,
            original_prompt: prompt,
            final_response: None,
            status: TaskStatus::Pending,
            has_files,
            created_at: now,
            completed_at: None,
        };

        let task_repo = TaskRepository::new(&self.state.store);
        task_repo.insert(&task).await?;
        task_repo
            .finalize(task.id, TaskStatus::Failed, None, Utc::now())
            .await?;

        self.state
            .stream_hub
            .fail(task.id, "no vision-capable worker is online for this task's attached images".to_string())
            .await;

        warn!(task_id = %task.id, "task failed immediately: images attached, no vision worker online");
        Ok(task.id)
    }

    /// All of a task's subtasks are in flight together, mirroring the
    /// `asyncio.gather` fan-out of the original orchestrator: a Consensus task's 3
    /// replicas (or any multi-piece Subtasks/Context task) finish within one
    /// timeout+reassign window instead of N of them end to end.
    #[instrument(skip(self, subtasks))]
    async fn run_to_completion(
        &self,
        task_id: Uuid,
        mode: TaskMode,
        difficulty: Difficulty,
        requires_vision: bool,
        streaming_enabled: bool,
        subtasks: Vec<Subtask>,
    ) {
        let outcomes = join_all(
            subtasks
                .iter()
                .map(|subtask| self.assign_with_retry(task_id, subtask, difficulty, requires_vision, streaming_enabled)),
        )
        .await;

        let mut completed = Vec::with_capacity(subtasks.len());
        let mut any_failed = false;

        for (subtask, outcome) in subtasks.iter().zip(outcomes) {
            match outcome {
                Ok(response) => {
                    completed.push((subtask.prompt.clone(), response));
                }
                Err(error) => {
                    warn!(%task_id, subtask_id = %subtask.id, %error, "subtask exhausted retries");
                    any_failed = true;
                }
            }
        }

        let task_repo = TaskRepository::new(&self.state.store);
        let final_status = if completed.is_empty() {
            TaskStatus::Failed
        } else if any_failed {
            TaskStatus::Partial
        } else {
            TaskStatus::Completed
        };

        let final_response = if completed.is_empty() { None } else { Some(aggregator::aggregate(mode, &completed)) };

        if let Err(error) = task_repo.finalize(task_id, final_status, final_response.clone(), Utc::now()).await {
            warn!(%task_id, %error, "failed to persist task finalization");
        }

        match (&final_response, final_status) {
            (Some(response), TaskStatus::Completed) | (Some(response), TaskStatus::Partial) => {
                self.state.stream_hub.complete(task_id, response.clone()).await;
            }
            _ => {
                self.state.stream_hub.fail(task_id, "task failed: no subtask produced a usable result".to_string()).await;
            }
        }

        info!(%task_id, ?final_status, "task finalized");
    }

    /// Assigns a subtask and awaits its outcome with a per-difficulty timeout. The
    /// three ways an attempt can end are handled on distinct paths, not folded into
    /// one generic retry count: a `TASK_ERROR` is terminal (the worker itself rejected
    /// the subtask, retrying would not help), a timeout gets exactly one reassignment,
    /// and only a send failure or an empty candidate pool is retried up to
    /// MAX_RETRIES with exponential backoff.
    #[instrument(skip(self, subtask))]
    async fn assign_with_retry(
        &self,
        task_id: Uuid,
        subtask: &Subtask,
        difficulty: Difficulty,
        requires_vision: bool,
        streaming_enabled: bool,
    ) -> Result<String, CoordinatorError> {
        let mut excluded = Vec::new();
        let mut last_error = CoordinatorError::NoCapableWorker("no workers attempted".to_string());
        let mut timeout_reassigned = false;
        let mut retries_used = 0u32;

        loop {
            let selection = self.state.node_registry.select_worker(difficulty, requires_vision, &excluded, |node_id| {
                self.state.circuit_breakers.is_open(node_id)
            });

            let Some(selection) = selection else {
                last_error = CoordinatorError::NoCapableWorker("no online capable worker available".to_string());
                break;
            };

            let node = self
                .state
                .node_registry
                .get_node(&selection.node_id)
                .ok_or_else(|| CoordinatorError::NotFound(selection.node_id.clone()))?;
            let node_public_key = decode_node_public_key(&node.public_key)?;
            let enc_prompt = seal(&self.state.keypair.private, &node_public_key, subtask.prompt.as_bytes())?;

            let task_repo = TaskRepository::new(&self.state.store);
            task_repo.assign_subtask(subtask.id, &selection.node_id, Utc::now()).await?;
            self.state.node_registry.increment_load(&selection.node_id, 1);

            let receiver = self.state.subtask_signals.register(subtask.id);
            let timeout_secs = if timeout_reassigned { (difficulty.timeout_secs() / 2).max(30) } else { difficulty.timeout_secs() };
            let frame = Frame::new(FrameBody::TaskAssign(TaskAssignPayload {
                subtask_id: subtask.id,
                task_id,
                enc_prompt,
                timeout_s: timeout_secs,
                enable_streaming: streaming_enabled,
                files: None,
            }));

            let outcome = if selection.sender.send(frame).await.is_err() {
                self.state.subtask_signals.cancel(subtask.id);
                Err(CoordinatorError::SendFailed(format!("worker {} channel closed", selection.node_id)))
            } else {
                match tokio::time::timeout(Duration::from_secs(timeout_secs), receiver).await {
                    Ok(Ok(outcome)) => Ok(outcome),
                    Ok(Err(_)) => Err(CoordinatorError::Internal("subtask signal channel dropped".to_string())),
                    Err(_) => {
                        self.state.subtask_signals.cancel(subtask.id);
                        Err(CoordinatorError::Timeout(format!("subtask {} timed out", subtask.id)))
                    }
                }
            };

            self.state.node_registry.increment_load(&selection.node_id, -1);

            match outcome {
                Ok(SubtaskOutcome::Completed { response, execution_time_ms }) => {
                    self.state.circuit_breakers.record_success(&selection.node_id);
                    let reputation =
                        ReputationService::new(&self.state.store, &self.state.node_registry);
                    let reason = if execution_time_ms < iris_domain_reputation::FAST_THRESHOLD_MS {
                        ReputationReason::TaskCompletedFast
                    } else {
                        ReputationReason::TaskCompleted
                    };
                    if let Err(error) = reputation.apply(&selection.node_id, reason, Some(execution_time_ms)).await {
                        warn!(%error, "failed to record reputation gain");
                    }
                    task_repo.complete_subtask(subtask.id, response.clone(), execution_time_ms, Utc::now()).await?;
                    return Ok(response);
                }
                // TASK_ERROR is terminal: the worker itself rejected the subtask, so
                // the Subtask's status is set Failed here and never revisited.
                Ok(SubtaskOutcome::Failed { reason }) => {
                    self.state.circuit_breakers.record_failure(&selection.node_id);
                    let reputation = ReputationService::new(&self.state.store, &self.state.node_registry);
                    let _ = reputation.apply(&selection.node_id, ReputationReason::TaskInvalid, None).await;
                    task_repo.mark_subtask(subtask.id, SubtaskStatus::Failed).await?;
                    return Err(CoordinatorError::WorkerError(reason));
                }
                Err(CoordinatorError::Timeout(message)) => {
                    self.state.circuit_breakers.record_failure(&selection.node_id);
                    let reputation = ReputationService::new(&self.state.store, &self.state.node_registry);
                    let _ = reputation.apply(&selection.node_id, ReputationReason::TaskTimeout, None).await;
                    task_repo.mark_subtask(subtask.id, SubtaskStatus::Timeout).await?;
                    last_error = CoordinatorError::Timeout(message);
                    excluded.push(selection.node_id);
                    if timeout_reassigned {
                        break;
                    }
                    timeout_reassigned = true;
                    continue;
                }
                Err(other) => {
                    self.state.circuit_breakers.record_failure(&selection.node_id);
                    last_error = other;
                    excluded.push(selection.node_id);
                    retries_used += 1;
                    if retries_used > MAX_RETRIES {
                        break;
                    }
                    let backoff = RETRY_BASE_MS * 2u64.pow(retries_used - 1);
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    continue;
                }
            }
        }

        Err(last_error)
    }
}
