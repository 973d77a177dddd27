// [apps/coordinator/src/routes.rs]
/*!
 * =================================================================
 * APARATO: ROUTING MATRIX (V1.0 - COORDINATOR GOLD)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: TOPOLOGIA DE ENDPOINTS REST + WEBSOCKET
 * =================================================================
 */

use std::time::Duration;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{stream, tasks, worker_socket};
use crate::middleware::auth_guard;
use crate::state::AppState;

pub fn create_router(application_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    // Human-facing REST + streaming surface; every route here requires a
    // verified account key via `auth_guard`.
    let client_api = Router::new()
        .route("/tasks", post(tasks::submit_task))
        .route("/tasks/:task_id", get(tasks::get_task))
        .route("/tasks/:task_id/stream", get(stream::subscribe_stream))
        .layer(middleware::from_fn_with_state(application_state.clone(), auth_guard));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/worker/socket", get(worker_socket::establish_worker_uplink))
        .nest("/api/v1", client_api)
        .layer(cors)
        .with_state(application_state)
}
