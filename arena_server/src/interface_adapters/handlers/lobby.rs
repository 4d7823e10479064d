use crate::domain::InvalidLobbyCode;
use crate::domain::lobby_code::to_code;
use crate::interface_adapters::clients::LobbyClientError;
use crate::interface_adapters::clients::lobby::{
    CreateLobbyRequest, HealthCheckResponse, JoinLobbyRequest, LeaveLobbyResponse, LobbyResponse,
    PlayerResponse,
};
use crate::interface_adapters::http::{HandlerError, error_response};
use crate::interface_adapters::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{info, warn};

// Upstream failures surface as 502 with the backend's message.
fn map_lobby_error(err: LobbyClientError) -> HandlerError {
    warn!(error = %err, "lobby backend call failed");
    let message = match err {
        LobbyClientError::Upstream { message, .. } => message,
        LobbyClientError::Transport(_) => "lobby backend unreachable".to_string(),
        LobbyClientError::Decode(_) => "unexpected lobby backend response".to_string(),
    };
    error_response(StatusCode::BAD_GATEWAY, message)
}

fn invalid_code(err: InvalidLobbyCode) -> HandlerError {
    error_response(StatusCode::BAD_REQUEST, err.to_string())
}

#[tracing::instrument(name = "create_lobby", skip_all)]
pub async fn create_lobby(
    State(state): State<AppState>,
    Json(body): Json<CreateLobbyRequest>,
) -> Result<Json<LobbyResponse>, HandlerError> {
    if body.admin_username.trim().is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "adminUsername is required"));
    }

    let lobby = state.lobby.create_lobby(&body).await.map_err(map_lobby_error)?;
    info!(lobby_code = %lobby.code, "lobby created");
    Ok(Json(lobby))
}

#[tracing::instrument(name = "join_lobby", skip_all, fields(lobby_code = %body.lobby_code))]
pub async fn join_lobby(
    State(state): State<AppState>,
    Json(mut body): Json<JoinLobbyRequest>,
) -> Result<Json<LobbyResponse>, HandlerError> {
    let code = to_code(&body.lobby_code).map_err(invalid_code)?;
    if body.username.trim().is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "username is required"));
    }
    body.lobby_code = code.to_string();

    let lobby = state.lobby.join_lobby(&body).await.map_err(map_lobby_error)?;
    info!(players = lobby.players.len(), "lobby joined");
    Ok(Json(lobby))
}

#[tracing::instrument(name = "get_lobby", skip_all, fields(lobby_code = %code))]
pub async fn get_lobby(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LobbyResponse>, HandlerError> {
    let code = to_code(&code).map_err(invalid_code)?;
    state
        .lobby
        .lobby_by_code(&code)
        .await
        .map(Json)
        .map_err(map_lobby_error)
}

#[tracing::instrument(name = "lobby_players", skip_all, fields(lobby_id = lobby_id))]
pub async fn lobby_players(
    State(state): State<AppState>,
    Path(lobby_id): Path<u64>,
) -> Result<Json<Vec<PlayerResponse>>, HandlerError> {
    state
        .lobby
        .players(lobby_id)
        .await
        .map(Json)
        .map_err(map_lobby_error)
}

#[tracing::instrument(name = "leave_lobby", skip_all, fields(user_id = user_id))]
pub async fn leave_lobby(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<LeaveLobbyResponse>, HandlerError> {
    state
        .lobby
        .leave_lobby(user_id)
        .await
        .map(Json)
        .map_err(map_lobby_error)
}

#[tracing::instrument(name = "lobby_health", skip_all)]
pub async fn lobby_health(
    State(state): State<AppState>,
) -> Result<Json<HealthCheckResponse>, HandlerError> {
    state
        .lobby
        .health()
        .await
        .map(Json)
        .map_err(map_lobby_error)
}
