use crate::domain::layout::{BoardMetrics, board_metrics};
use crate::interface_adapters::http::{HandlerError, error_response};
use crate::interface_adapters::protocol::{
    CreateGameRequest, CreateGameResponse, FlipRequest, FlipResponse, GameSnapshotDto, LayoutQuery,
};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::rng::next_game_id;
use crate::use_cases::{GameError, GameHandle, StartGameError, StartGameRequest};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::{error, info, warn};

pub(crate) async fn find_game(state: &AppState, game_id: &str) -> Result<GameHandle, HandlerError> {
    state
        .registry
        .get_game(game_id)
        .await
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "game not found"))
}

pub fn map_start_error(err: StartGameError) -> HandlerError {
    match err {
        StartGameError::InvalidLobbyCode(err) => {
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
        StartGameError::NotEnoughTerms { .. } => {
            error_response(StatusCode::CONFLICT, err.to_string())
        }
        StartGameError::TermsUnavailable(message) => {
            error!(error = %message, "term catalog unavailable");
            error_response(StatusCode::BAD_GATEWAY, "term catalog unavailable")
        }
        StartGameError::Registry(err) => {
            error!(error = %err, "failed to register game");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to create game")
        }
    }
}

pub fn map_game_error(err: GameError) -> HandlerError {
    match err {
        GameError::Closed => error_response(StatusCode::GONE, err.to_string()),
        GameError::AlreadyExists => error_response(StatusCode::CONFLICT, err.to_string()),
    }
}

#[tracing::instrument(
    name = "create_game",
    skip_all,
    fields(lobby_code = ?body.lobby_code, pair_count = ?body.pair_count)
)]
pub async fn create_game(
    State(state): State<AppState>,
    Json(body): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<CreateGameResponse>), HandlerError> {
    let request = StartGameRequest {
        game_id: next_game_id(),
        pair_count: body.pair_count,
        duplicate_level: body.duplicate_level.unwrap_or_default(),
        theme: body.color_theme.unwrap_or_default(),
        lobby_code: body.lobby_code,
        local_players: body.local_players,
    };

    let handle = state
        .start_game()
        .execute(request)
        .await
        .map_err(|err| {
            warn!(error = %err, "game not started");
            map_start_error(err)
        })?;

    let snapshot = handle.snapshot();
    Ok((
        StatusCode::CREATED,
        Json(CreateGameResponse {
            game_id: handle.game_id.to_string(),
            snapshot: GameSnapshotDto::from(&snapshot),
        }),
    ))
}

#[tracing::instrument(name = "get_game", skip_all, fields(game_id = %game_id))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameSnapshotDto>, HandlerError> {
    let handle = find_game(&state, &game_id).await?;
    Ok(Json(GameSnapshotDto::from(&handle.snapshot())))
}

#[tracing::instrument(name = "flip_card", skip_all, fields(game_id = %game_id, card_id = %body.card_id))]
pub async fn flip_card(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(body): Json<FlipRequest>,
) -> Result<Json<FlipResponse>, HandlerError> {
    let handle = find_game(&state, &game_id).await?;
    let reply = handle.flip(body.card_id).await.map_err(map_game_error)?;
    Ok(Json(FlipResponse::from(reply)))
}

#[tracing::instrument(name = "restart_game", skip_all, fields(game_id = %game_id))]
pub async fn restart_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameSnapshotDto>, HandlerError> {
    let handle = find_game(&state, &game_id).await?;
    let snapshot = handle.restart().await.map_err(map_game_error)?;
    Ok(Json(GameSnapshotDto::from(&snapshot)))
}

#[tracing::instrument(name = "delete_game", skip_all, fields(game_id = %game_id))]
pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<StatusCode, HandlerError> {
    if state.registry.remove_game(&game_id).await {
        info!("game removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(error_response(StatusCode::NOT_FOUND, "game not found"))
    }
}

pub async fn layout(Query(query): Query<LayoutQuery>) -> Json<BoardMetrics> {
    Json(board_metrics(
        query.width.unwrap_or(0.0),
        query.height.unwrap_or(0.0),
        query.cards.unwrap_or(0),
    ))
}
