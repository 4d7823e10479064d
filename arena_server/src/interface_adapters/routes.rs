use crate::interface_adapters::handlers::games::{
    create_game, delete_game, flip_card, get_game, layout, restart_game,
};
use crate::interface_adapters::handlers::lobby::{
    create_lobby, get_lobby, join_lobby, leave_lobby, lobby_health, lobby_players,
};
use crate::interface_adapters::net::game_ws;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/games", post(create_game))
        .route("/games/{id}", get(get_game).delete(delete_game))
        .route("/games/{id}/flip", post(flip_card))
        .route("/games/{id}/restart", post(restart_game))
        .route("/games/{id}/ws", get(game_ws))
        .route("/layout", get(layout))
        .route("/lobby/create", post(create_lobby))
        .route("/lobby/join", post(join_lobby))
        .route("/lobby/health", get(lobby_health))
        .route("/lobby/{lobby}", get(get_lobby))
        .route("/lobby/{lobby}/players", get(lobby_players))
        .route("/lobby/users/{user_id}/leave", post(leave_lobby))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
