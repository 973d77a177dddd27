// [apps/worker-sim/src/config.rs]
/*!
 * APARATO: WORKER SIM DIRECTIVES (V1.0)
 * RESPONSABILIDAD: CONFIGURACIÓN DE IDENTIDAD Y CAPACIDADES DECLARADAS DEL NODO
 */

use std::path::PathBuf;

use clap::Parser;

/// Directivas de mando para el nodo simulado. Inyectadas vía CLI o entorno.
#[derive(Parser, Debug, Clone)]
#[command(author = "Raz Podesta <metaShark Tech>", about = "Iris reference worker // honest wire protocol, no inference engine")]
pub struct WorkerConfig {
    /// Endpoint WebSocket del coordinador, p.ej. ws://localhost:3000/worker/socket.
    #[arg(long, env = "COORDINATOR_URL")]
    pub coordinator_url: String,

    /// Identificador único del nodo en el censo de la red.
    #[arg(long, env = "WORKER_NODE_ID", default_value = "worker-sim-alpha")]
    pub node_id: String,

    /// Clave de cuenta de 16 dígitos para el registro; mutuamente excluyente con el token de enrolamiento.
    #[arg(long, env = "WORKER_ACCOUNT_KEY")]
    pub account_key: Option<String>,

    /// Token de enrolamiento de un solo uso; alternativa legada a la clave de cuenta.
    #[arg(long, env = "WORKER_ENROLLMENT_TOKEN")]
    pub enrollment_token: Option<String>,

    /// Ruta del par de claves X25519 persistente del nodo.
    #[arg(long, env = "WORKER_KEYPAIR_PATH", default_value = "./data/worker.key")]
    pub keypair_path: PathBuf,

    #[arg(long, env = "WORKER_MODEL_NAME", default_value = "llama-3-8b-instruct")]
    pub model_name: String,

    #[arg(long, env = "WORKER_MAX_CONTEXT", default_value_t = 8192)]
    pub max_context: u32,

    #[arg(long, env = "WORKER_VRAM_GB", default_value_t = 16.0)]
    pub vram_gb: f64,

    #[arg(long, env = "WORKER_GPU_NAME", default_value = "RTX 4070")]
    pub gpu_name: String,

    #[arg(long, env = "WORKER_MODEL_PARAMS_B", default_value_t = 8.0)]
    pub model_params_b: f64,

    #[arg(long, env = "WORKER_QUANT", default_value = "Q4_K_M")]
    pub quant: String,

    #[arg(long, env = "WORKER_TOKENS_PER_SECOND", default_value_t = 40.0)]
    pub tokens_per_second: f64,

    #[arg(long, env = "WORKER_SUPPORTS_VISION", action = clap::ArgAction::SetTrue)]
    pub supports_vision: bool,

    /// Intervalo entre latidos, en segundos.
    #[arg(long, env = "WORKER_HEARTBEAT_INTERVAL_SECS", default_value_t = 20)]
    pub heartbeat_interval_secs: u64,

    /// Retraso artificial, en milisegundos, antes de responder cada subtarea
    /// (simula tiempo de inferencia para ejercitar timeouts/circuit breakers).
    #[arg(long, env = "WORKER_SIMULATED_LATENCY_MS", default_value_t = 200)]
    pub simulated_latency_ms: u64,
}
