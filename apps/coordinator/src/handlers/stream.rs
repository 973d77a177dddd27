// [apps/coordinator/src/handlers/stream.rs]
/*!
 * APARATO: CLIENT STREAM SUBSCRIPTION (V1.0)
 * RESPONSABILIDAD: ENTREGA ORDENADA DE FRAGMENTOS AL CLIENTE HUMANO VIA WS
 */

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Extension;
use iris_domain_models::{StreamChunk, TaskStatus};
use iris_infra_store::repositories::TaskRepository;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::middleware::Principal;
use crate::state::AppState;

#[instrument(skip(upgrade, state))]
pub async fn subscribe_stream(
    upgrade: WebSocketUpgrade,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(task_id): Path<Uuid>,
) -> impl IntoResponse {
    upgrade.on_upgrade(move |socket| handle_subscription(socket, state, principal, task_id))
}

async fn handle_subscription(mut socket: WebSocket, state: AppState, principal: Principal, task_id: Uuid) {
    let task_repo = TaskRepository::new(&state.store);
    let task = match task_repo.find_by_id(task_id).await {
        Ok(Some(task)) => task,
        Ok(None) => {
            let _ = send_chunk(&mut socket, &StreamChunk::Error { message: "task not found".to_string() }).await;
            return;
        }
        Err(error) => {
            warn!(%error, "store lookup failed while opening stream subscription");
            let _ = send_chunk(&mut socket, &StreamChunk::Error { message: "internal error".to_string() }).await;
            return;
        }
    };

    if task.principal_id != principal.account.id.to_string() {
        let _ = send_chunk(&mut socket, &StreamChunk::Error { message: "forbidden".to_string() }).await;
        return;
    }

    // A task that already reached a terminal status before the subscriber connected
    // (e.g. the I5 immediate-failure path) never has a live hub session to attach to;
    // report the terminal sentinel directly instead of blocking forever on `create`.
    match task.status {
        TaskStatus::Completed | TaskStatus::Partial => {
            let chunk = StreamChunk::Done { final_response: task.final_response.unwrap_or_default() };
            let _ = send_chunk(&mut socket, &chunk).await;
            return;
        }
        TaskStatus::Failed => {
            let chunk = StreamChunk::Error { message: "task failed".to_string() };
            let _ = send_chunk(&mut socket, &chunk).await;
            return;
        }
        TaskStatus::Pending | TaskStatus::Processing => {}
    }

    let mut receiver = state.stream_hub.create(task_id);
    while let Some(chunk) = receiver.recv().await {
        let terminal = chunk.is_terminal();
        if send_chunk(&mut socket, &chunk).await.is_err() {
            break;
        }
        if terminal {
            break;
        }
    }

    let _ = socket.send(Message::Close(None)).await;
}

async fn send_chunk(socket: &mut WebSocket, chunk: &StreamChunk) -> Result<(), axum::Error> {
    let text = serde_json::to_string(chunk).expect("StreamChunk always serializes");
    socket.send(Message::Text(text)).await
}
