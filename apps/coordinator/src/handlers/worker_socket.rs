// [apps/coordinator/src/handlers/worker_socket.rs]
/*!
 * =================================================================
 * APARATO: WORKER UPLINK SOCKET (V1.0 - COORDINATOR GOLD)
 * CLASIFICACIÓN: API HANDLER (ESTRATO L4)
 * RESPONSABILIDAD: PROTOCOLO BIDIRECCIONAL COORDINADOR <-> WORKER
 *
 * Arquitectura de Triple Tarea: un worker interno desacopla el
 * procesamiento de tramas de la recepción de red, de modo que una
 * consulta lenta al store no bloquea el latido de keepalive.
 * =================================================================
 */

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::Utc;
use iris_core_crypto_envelope::open;
use iris_core_wire_protocol::{
    decode, encode, Frame, FrameBody, HeartbeatAckPayload, HeartbeatPayload, NodeRegisterPayload,
    RegisterAckPayload, TaskErrorPayload, TaskResultPayload, TaskStreamPayload,
};
use iris_domain_models::node::INITIAL_REPUTATION;
use iris_domain_models::{Node, Tier};
use iris_infra_store::repositories::NodeRepository;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::CoordinatorError;
use crate::services::account_gate::{AccountGate, EnrollmentGate};
use crate::state::subtask_signals::SubtaskOutcome;
use crate::state::AppState;
use crate::util::decode_node_public_key;

const KEEPALIVE_INTERVAL_SECS: u64 = 25;
const OUTBOUND_BUFFER_CAPACITY: usize = 64;
const INBOUND_BUFFER_CAPACITY: usize = 64;

#[instrument(skip(upgrade, state))]
pub async fn establish_worker_uplink(upgrade: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    upgrade.on_upgrade(move |socket| handle_worker_link(socket, state))
}

async fn handle_worker_link(socket: WebSocket, state: AppState) {
    use futures_util::{SinkExt, StreamExt};

    let (mut socket_sender, mut socket_receiver) = socket.split();
    let session_id = Uuid::new_v4();
    info!(%session_id, "⚡ [WORKER_UPLINK_OPEN]: connection established");

    let (outbound_tx, mut outbound_rx) = mpsc::channel::<Frame>(OUTBOUND_BUFFER_CAPACITY);
    let (inbound_tx, mut inbound_rx) = mpsc::channel::<Frame>(INBOUND_BUFFER_CAPACITY);
    let node_id: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));

    // Task 1: internal worker, dispatches decoded frames against shared state.
    let worker_state = state.clone();
    let worker_outbound = outbound_tx.clone();
    let worker_node_id = node_id.clone();
    let mut worker_task = tokio::spawn(async move {
        while let Some(frame) = inbound_rx.recv().await {
            if let Err(error) = dispatch_frame(&worker_state, &worker_outbound, &worker_node_id, frame).await {
                warn!(%error, "⚠️ [WORKER_FRAME_REJECTED]");
            }
        }
    });

    // Task 2: downstream, keepalive ping interleaved with outbound frame delivery.
    let mut sender_task = tokio::spawn(async move {
        let mut keepalive = interval(Duration::from_secs(KEEPALIVE_INTERVAL_SECS));
        loop {
            tokio::select! {
                _ = keepalive.tick() => {
                    if socket_sender.send(Message::Ping(vec![])).await.is_err() {
                        break;
                    }
                }
                frame = outbound_rx.recv() => {
                    let Some(frame) = frame else { break };
                    match encode(&frame) {
                        Ok(text) => {
                            if socket_sender.send(Message::Text(text)).await.is_err() {
                                break;
                            }
                        }
                        Err(error) => warn!(%error, "failed to encode outbound frame"),
                    }
                }
            }
        }
    });

    // Task 3: upstream, decodes incoming text frames and forwards them inward.
    let mut receiver_task = tokio::spawn(async move {
        while let Some(message) = socket_receiver.next().await {
            match message {
                Ok(Message::Text(raw)) => match decode(&raw) {
                    Ok(frame) => {
                        if inbound_tx.send(frame).await.is_err() {
                            break;
                        }
                    }
                    Err(error) => warn!(%error, "malformed frame discarded"),
                },
                Ok(Message::Close(_)) => {
                    debug!("🔌 [WORKER_SOCKET_CLOSE]: termination signal received");
                    break;
                }
                Err(error) => {
                    warn!(%error, "worker socket read error");
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = (&mut sender_task) => {
            receiver_task.abort();
            worker_task.abort();
        }
        _ = (&mut receiver_task) => {
            sender_task.abort();
            worker_task.abort();
        }
        _ = (&mut worker_task) => {
            sender_task.abort();
            receiver_task.abort();
        }
    }

    let taken_id = node_id.lock().expect("node id lock poisoned").take();
    if let Some(id) = taken_id {
        state.node_registry.disconnect(&id);
        info!(node_id = %id, "💀 [WORKER_UPLINK_CLOSED]: node marked offline");
    } else {
        info!(%session_id, "💀 [WORKER_UPLINK_CLOSED]: connection never completed registration");
    }
}

async fn dispatch_frame(
    state: &AppState,
    outbound: &mpsc::Sender<Frame>,
    node_id: &Arc<Mutex<Option<String>>>,
    frame: Frame,
) -> Result<(), CoordinatorError> {
    match frame.body {
        FrameBody::NodeRegister(payload) => handle_register(state, outbound, node_id, payload).await,
        FrameBody::Heartbeat(payload) => handle_heartbeat(state, outbound, node_id, payload).await,
        FrameBody::TaskResult(payload) => handle_task_result(state, node_id, payload).await,
        FrameBody::TaskError(payload) => handle_task_error(node_id, state, payload).await,
        FrameBody::TaskStream(payload) => handle_task_stream(state, node_id, payload).await,
        FrameBody::ClassifyResult(_) | FrameBody::ClassifyError(_) => {
            debug!("classification-via-worker round trip is not wired in this deployment; frame ignored");
            Ok(())
        }
        FrameBody::Disconnect(payload) => {
            if let Some(id) = node_id.lock().expect("node id lock poisoned").take() {
                info!(node_id = %id, reason = ?payload.reason, "worker requested disconnect");
                state.node_registry.disconnect(&id);
            }
            Ok(())
        }
        other => {
            warn!(message_type = ?other.message_type(), "unexpected frame on worker uplink");
            Ok(())
        }
    }
}

#[instrument(skip(state, outbound, node_id, payload))]
async fn handle_register(
    state: &AppState,
    outbound: &mpsc::Sender<Frame>,
    node_id: &Arc<Mutex<Option<String>>>,
    payload: NodeRegisterPayload,
) -> Result<(), CoordinatorError> {
    let account_id = authenticate_node(state, &payload).await?;

    let now = Utc::now();
    let mut node = Node {
        id: payload.node_id.clone(),
        account_id,
        public_key: payload.public_key,
        model_name: payload.model_name,
        max_context: payload.max_context,
        vram_gb: payload.vram_gb,
        gpu_name: payload.gpu_name,
        model_params_b: payload.model_params_b,
        quant: payload.quant,
        tokens_per_second: payload.tokens_per_second,
        tier: Tier::Basic,
        supports_vision: payload.supports_vision,
        reputation: INITIAL_REPUTATION,
        tasks_completed: 0,
        created_at: now,
        last_seen_at: now,
    };
    node.recompute_tier();

    let node_repo = NodeRepository::new(&state.store);
    node_repo.upsert(&node).await?;
    // Reconnecting nodes keep their persisted reputation/tasks_completed; upsert never
    // overwrites those columns, so re-read the row to pick up the authoritative values.
    if let Some(persisted) = node_repo.find_by_id(&node.id).await? {
        node = persisted;
    }

    state.node_registry.register(node.clone(), outbound.clone());
    *node_id.lock().expect("node id lock poisoned") = Some(node.id.clone());

    let ack = Frame::new(FrameBody::RegisterAck(RegisterAckPayload {
        success: true,
        coordinator_public_key: Some(state.keypair.public_base64()),
        message: None,
    }));
    let _ = outbound.send(ack).await;

    info!(node_id = %node.id, tier = %node.tier, "✅ [WORKER_REGISTERED]");
    Ok(())
}

async fn authenticate_node(
    state: &AppState,
    payload: &NodeRegisterPayload,
) -> Result<Option<Uuid>, CoordinatorError> {
    if let Some(raw_key) = payload.account_key.as_deref() {
        let account = AccountGate::new(&state.store).verify(raw_key).await?;
        return Ok(Some(account.id));
    }
    if let Some(raw_token) = payload.enrollment_token.as_deref() {
        EnrollmentGate::new(&state.store, &state.enrollment_token_secret).consume(raw_token).await?;
        return Ok(None);
    }
    Err(CoordinatorError::Unauthorized(
        "node registration requires an account key or enrollment token".to_string(),
    ))
}

async fn handle_heartbeat(
    state: &AppState,
    outbound: &mpsc::Sender<Frame>,
    node_id: &Arc<Mutex<Option<String>>>,
    payload: HeartbeatPayload,
) -> Result<(), CoordinatorError> {
    let Some(id) = node_id.lock().expect("node id lock poisoned").clone() else {
        return Err(CoordinatorError::Unauthorized("heartbeat before registration".to_string()));
    };

    if !state.node_registry.record_heartbeat(&id, payload.sent_at) {
        return Err(CoordinatorError::NotFound(id));
    }
    NodeRepository::new(&state.store).touch_last_seen(&id, Utc::now()).await?;

    let _ = outbound.send(Frame::new(FrameBody::HeartbeatAck(HeartbeatAckPayload {}))).await;
    Ok(())
}

async fn handle_task_result(
    state: &AppState,
    node_id: &Arc<Mutex<Option<String>>>,
    payload: TaskResultPayload,
) -> Result<(), CoordinatorError> {
    let id = current_node_id(node_id, "task result")?;
    let node = state.node_registry.get_node(&id).ok_or_else(|| CoordinatorError::NotFound(id))?;
    let node_public_key = decode_node_public_key(&node.public_key)?;
    let plaintext = open(&state.keypair.private, &node_public_key, &payload.enc_response)?;
    let response = String::from_utf8(plaintext).map_err(|e| CoordinatorError::InvalidResponse(e.to_string()))?;

    state
        .subtask_signals
        .deliver(payload.subtask_id, SubtaskOutcome::Completed { response, execution_time_ms: payload.execution_time_ms });
    Ok(())
}

async fn handle_task_error(
    node_id: &Arc<Mutex<Option<String>>>,
    state: &AppState,
    payload: TaskErrorPayload,
) -> Result<(), CoordinatorError> {
    current_node_id(node_id, "task error")?;
    state.subtask_signals.deliver(
        payload.subtask_id,
        SubtaskOutcome::Failed { reason: format!("{}: {}", payload.error_code, payload.error_message) },
    );
    Ok(())
}

async fn handle_task_stream(
    state: &AppState,
    node_id: &Arc<Mutex<Option<String>>>,
    payload: TaskStreamPayload,
) -> Result<(), CoordinatorError> {
    let id = current_node_id(node_id, "stream chunk")?;
    let node = state.node_registry.get_node(&id).ok_or_else(|| CoordinatorError::NotFound(id))?;
    let node_public_key = decode_node_public_key(&node.public_key)?;
    let plaintext = open(&state.keypair.private, &node_public_key, &payload.enc_chunk)?;
    let chunk = String::from_utf8(plaintext).map_err(|e| CoordinatorError::InvalidResponse(e.to_string()))?;

    state.stream_hub.push_chunk(payload.task_id, chunk).await;
    Ok(())
}

fn current_node_id(node_id: &Arc<Mutex<Option<String>>>, context: &str) -> Result<String, CoordinatorError> {
    node_id
        .lock()
        .expect("node id lock poisoned")
        .clone()
        .ok_or_else(|| CoordinatorError::Unauthorized(format!("{context} before registration")))
}
