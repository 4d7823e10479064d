use crate::interface_adapters::handlers::{HandlerError, map_host_error};
use crate::interface_adapters::protocol::{
    HostLoginRequest, HostLoginResponse, HostLogoutResponse, HostTokenRequest, HostVerifyResponse,
};
use crate::interface_adapters::state::{AppState, InMemorySessionStore, SystemClock};
use crate::use_cases::host_login::HostLoginUseCase;
use crate::use_cases::host_logout::HostLogoutUseCase;
use crate::use_cases::verify_host::VerifyHostUseCase;
use axum::{extract::State, Json};
use tracing::{info, warn};

// Handler for exchanging the host PIN for a session token.
#[tracing::instrument(name = "host_login", skip_all)]
pub async fn host_login(
    State(state): State<AppState>,
    Json(payload): Json<HostLoginRequest>,
) -> Result<Json<HostLoginResponse>, HandlerError> {
    let use_case = HostLoginUseCase {
        clock: SystemClock,
        store: InMemorySessionStore {
            sessions: state.sessions.clone(),
        },
        expected_pin: state.settings.host_pin.clone(),
        ttl_seconds: state.settings.host_session_ttl_seconds,
    };

    let result = use_case.execute(&payload.pin).await.map_err(|err| {
        warn!(error = ?err, "host login rejected");
        map_host_error(err)
    })?;
    info!(expires_at = result.expires_at, "host session issued");

    Ok(Json(HostLoginResponse {
        token: result.token,
        expires_at: result.expires_at,
    }))
}

// Handler for checking a host token.
pub async fn verify_host(
    State(state): State<AppState>,
    Json(payload): Json<HostTokenRequest>,
) -> Result<Json<HostVerifyResponse>, HandlerError> {
    let use_case = VerifyHostUseCase {
        clock: SystemClock,
        store: InMemorySessionStore {
            sessions: state.sessions.clone(),
        },
    };

    let session = use_case
        .execute(&payload.token)
        .await
        .map_err(map_host_error)?;

    Ok(Json(HostVerifyResponse {
        session_id: session.session_id,
        expires_at: session.expires_at,
    }))
}

// Handler for revoking a host token.
pub async fn host_logout(
    State(state): State<AppState>,
    Json(payload): Json<HostTokenRequest>,
) -> Result<Json<HostLogoutResponse>, HandlerError> {
    let use_case = HostLogoutUseCase {
        store: InMemorySessionStore {
            sessions: state.sessions.clone(),
        },
    };

    let result = use_case
        .execute(&payload.token)
        .await
        .map_err(map_host_error)?;

    Ok(Json(HostLogoutResponse {
        revoked: result.revoked,
    }))
}
