// [apps/coordinator/src/middleware.rs]
/*!
 * APARATO: AUTHENTICATION GUARD (V1.0)
 * RESPONSABILIDAD: EXTRACCIÓN DE LA IDENTIDAD DEL PRINCIPAL DESDE EL BEARER
 *
 * El protocolo HTTP de cara al humano es una dependencia externa opaca;
 * lo único que este estrato garantiza es que toda petición autenticada
 * porta una cuenta activa verificada contra el AccountGate.
 */

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use iris_domain_models::Account;
use tracing::warn;

use crate::services::account_gate::AccountGate;
use crate::state::AppState;

/// Injected into request extensions by `auth_guard`; handlers read this
/// instead of re-parsing the Authorization header.
#[derive(Debug, Clone)]
pub struct Principal {
    pub account: Account,
}

pub async fn auth_guard(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let raw_key = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(raw_key) = raw_key else {
        warn!("🔒 [AUTH_REJECTION]: missing bearer credential");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    match AccountGate::new(&state.store).verify(raw_key).await {
        Ok(account) => {
            req.extensions_mut().insert(Principal { account });
            next.run(req).await
        }
        Err(error) => error.into_response(),
    }
}
