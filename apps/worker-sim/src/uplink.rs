// [apps/worker-sim/src/uplink.rs]
/*!
 * =================================================================
 * APARATO: WORKER UPLINK (V1.0)
 * CLASIFICACIÓN: REFERENCE CLIENT ADAPTER (ESTRATO L1-APP)
 * RESPONSABILIDAD: CICLO DE VIDA COMPLETO DE LA CONEXIÓN AL COORDINADOR
 *
 * Un único bucle de lectura/escritura maneja el latido y la recepción de
 * tramas; cada TASK_ASSIGN se procesa en una tarea separada para que la
 * latencia simulada de "inferencia" nunca retrase el siguiente latido.
 * =================================================================
 */

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use iris_core_crypto_envelope::{open, seal, Keypair, PublicKey};
use iris_core_wire_protocol::{
    decode, encode, Frame, FrameBody, HeartbeatPayload, NodeRegisterPayload, TaskAssignPayload,
    TaskErrorPayload, TaskResultPayload, TaskStreamPayload,
};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::interval;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{info, instrument, warn};

use crate::config::WorkerConfig;
use crate::engine;
use crate::errors::WorkerSimError;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct WorkerUplink {
    config: WorkerConfig,
    keypair: Arc<Keypair>,
}

impl WorkerUplink {
    pub fn new(config: WorkerConfig) -> Result<Self, WorkerSimError> {
        let keypair = Keypair::load_or_generate(&config.keypair_path)?;
        Ok(Self { config, keypair: Arc::new(keypair) })
    }

    /// The node's durable X25519 public key, base64-encoded as presented at registration.
    pub fn public_key_base64(&self) -> String {
        self.keypair.public_base64()
    }

    /// Connects, registers, and runs the heartbeat/dispatch loop until the
    /// coordinator closes the socket or sends an explicit `Disconnect`.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<(), WorkerSimError> {
        let (mut socket, _) = tokio_tungstenite::connect_async(&self.config.coordinator_url).await?;
        info!(url = %self.config.coordinator_url, "🔌 [UPLINK_CONNECTED]");

        send_frame(&mut socket, &self.build_register_frame()).await?;
        let coordinator_public_key = self.await_register_ack(&mut socket).await?;
        info!(node_id = %self.config.node_id, "✅ [UPLINK_REGISTERED]");

        let (outbound_tx, mut outbound_rx) = mpsc::channel::<Frame>(32);
        let mut heartbeat_ticker = interval(Duration::from_secs(self.config.heartbeat_interval_secs));
        let started_at = Instant::now();

        loop {
            tokio::select! {
                _ = heartbeat_ticker.tick() => {
                    let frame = Frame::new(FrameBody::Heartbeat(HeartbeatPayload {
                        current_load: 0,
                        uptime_s: started_at.elapsed().as_secs(),
                        sent_at: Utc::now(),
                        tokens_per_second: Some(self.config.tokens_per_second),
                    }));
                    if send_frame(&mut socket, &frame).await.is_err() {
                        warn!("heartbeat send failed, tearing down uplink");
                        break;
                    }
                }
                frame = outbound_rx.recv() => {
                    let Some(frame) = frame else { continue };
                    if send_frame(&mut socket, &frame).await.is_err() {
                        warn!("reply send failed, tearing down uplink");
                        break;
                    }
                }
                message = socket.next() => {
                    match message {
                        Some(Ok(Message::Text(raw))) => {
                            self.dispatch_inbound(&raw, coordinator_public_key, &outbound_tx);
                        }
                        Some(Ok(Message::Close(_))) => {
                            info!("🔌 [UPLINK_CLOSED]: coordinator closed the socket");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(error)) => {
                            warn!(%error, "uplink read error");
                            break;
                        }
                        None => {
                            warn!("uplink stream ended unexpectedly");
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn build_register_frame(&self) -> Frame {
        Frame::new(FrameBody::NodeRegister(NodeRegisterPayload {
            node_id: self.config.node_id.clone(),
            account_key: self.config.account_key.clone(),
            enrollment_token: self.config.enrollment_token.clone(),
            public_key: self.keypair.public_base64(),
            model_name: self.config.model_name.clone(),
            max_context: self.config.max_context,
            vram_gb: self.config.vram_gb,
            gpu_name: self.config.gpu_name.clone(),
            model_params_b: self.config.model_params_b,
            quant: self.config.quant.clone(),
            tokens_per_second: self.config.tokens_per_second,
            supports_vision: self.config.supports_vision,
        }))
    }

    async fn await_register_ack(&self, socket: &mut Socket) -> Result<PublicKey, WorkerSimError> {
        match socket.next().await {
            Some(Ok(Message::Text(raw))) => match decode(&raw)?.body {
                FrameBody::RegisterAck(ack) if ack.success => {
                    let raw_key = ack
                        .coordinator_public_key
                        .ok_or_else(|| WorkerSimError::RegistrationRejected("ack carried no coordinator public key".to_string()))?;
                    decode_public_key(&raw_key)
                }
                FrameBody::RegisterAck(ack) => {
                    Err(WorkerSimError::RegistrationRejected(ack.message.unwrap_or_else(|| "rejected".to_string())))
                }
                other => Err(WorkerSimError::RegistrationRejected(format!("expected register_ack, got {:?}", other.message_type()))),
            },
            Some(Ok(_)) => Err(WorkerSimError::RegistrationRejected("non-text frame during handshake".to_string())),
            Some(Err(error)) => Err(error.into()),
            None => Err(WorkerSimError::ConnectionClosed),
        }
    }

    fn dispatch_inbound(&self, raw: &str, coordinator_public_key: PublicKey, outbound: &mpsc::Sender<Frame>) {
        let frame = match decode(raw) {
            Ok(frame) => frame,
            Err(error) => {
                warn!(%error, "malformed frame from coordinator");
                return;
            }
        };

        match frame.body {
            FrameBody::TaskAssign(payload) => {
                tokio::spawn(handle_task_assign(
                    Arc::clone(&self.keypair),
                    coordinator_public_key,
                    payload,
                    self.config.simulated_latency_ms,
                    outbound.clone(),
                ));
            }
            FrameBody::HeartbeatAck(_) => {}
            FrameBody::Disconnect(payload) => {
                info!(reason = ?payload.reason, "coordinator requested disconnect");
            }
            FrameBody::Error(payload) => warn!(message = %payload.message, "coordinator reported an error"),
            other => warn!(message_type = ?other.message_type(), "unexpected frame on worker uplink"),
        }
    }
}

async fn send_frame(socket: &mut Socket, frame: &Frame) -> Result<(), WorkerSimError> {
    let text = encode(frame)?;
    socket.send(Message::Text(text)).await?;
    Ok(())
}

fn decode_public_key(raw: &str) -> Result<PublicKey, WorkerSimError> {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    let bytes = BASE64.decode(raw).map_err(|e| WorkerSimError::InvalidUrl(format!("malformed coordinator public key: {e}")))?;
    let array: [u8; 32] =
        bytes.try_into().map_err(|_| WorkerSimError::InvalidUrl("coordinator public key must be 32 bytes".to_string()))?;
    Ok(PublicKey::from(array))
}

#[instrument(skip(keypair, coordinator_public_key, payload, outbound))]
async fn handle_task_assign(
    keypair: Arc<Keypair>,
    coordinator_public_key: PublicKey,
    payload: TaskAssignPayload,
    simulated_latency_ms: u64,
    outbound: mpsc::Sender<Frame>,
) {
    if let Err(error) = run_task_assign(&keypair, &coordinator_public_key, &payload, simulated_latency_ms, &outbound).await {
        warn!(%error, subtask_id = %payload.subtask_id, "task assignment failed");
        let frame = Frame::new(FrameBody::TaskError(TaskErrorPayload {
            subtask_id: payload.subtask_id,
            task_id: payload.task_id,
            error_code: "WORKER_SIM_FAULT".to_string(),
            error_message: error.to_string(),
        }));
        let _ = outbound.send(frame).await;
    }
}

async fn run_task_assign(
    keypair: &Keypair,
    coordinator_public_key: &PublicKey,
    payload: &TaskAssignPayload,
    simulated_latency_ms: u64,
    outbound: &mpsc::Sender<Frame>,
) -> Result<(), WorkerSimError> {
    let plaintext = open(&keypair.private, coordinator_public_key, &payload.enc_prompt)?;
    let prompt = String::from_utf8(plaintext)?;

    tokio::time::sleep(Duration::from_millis(simulated_latency_ms)).await;
    let response = engine::complete(&prompt);

    if payload.enable_streaming {
        for (index, piece) in engine::stream_chunks(&response).into_iter().enumerate() {
            let enc_chunk = seal(&keypair.private, coordinator_public_key, piece.as_bytes())?;
            let frame = Frame::new(FrameBody::TaskStream(TaskStreamPayload {
                subtask_id: payload.subtask_id,
                task_id: payload.task_id,
                enc_chunk,
                chunk_index: index as u64,
            }));
            if outbound.send(frame).await.is_err() {
                return Ok(());
            }
        }
    }

    let enc_response = seal(&keypair.private, coordinator_public_key, response.as_bytes())?;
    let frame = Frame::new(FrameBody::TaskResult(TaskResultPayload {
        subtask_id: payload.subtask_id,
        task_id: payload.task_id,
        enc_response,
        execution_time_ms: simulated_latency_ms,
    }));
    let _ = outbound.send(frame).await;
    Ok(())
}
