// Framework bootstrap for the arena server runtime.

use crate::domain::tuning::RoundTuning;
use crate::frameworks::config::{
    ArenaConfig, COMMAND_CHANNEL_CAPACITY, COMPLETED_GAME_GRACE, IDLE_GAME_TIMEOUT,
};
use crate::interface_adapters::clients::{LobbyClient, TermsClient};
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::AppState;
use crate::use_cases::{GameRegistry, GameSettings};
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub fn build_state(config: &ArenaConfig) -> Result<AppState> {
    let lobby = LobbyClient::new(config.lobby_api_base_url.clone(), config.upstream_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize lobby client: {e}")))?;
    let terms = TermsClient::new(config.terms_service_url.clone(), config.upstream_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize terms client: {e}")))?;
    tracing::debug!(
        lobby_api_base_url = %config.lobby_api_base_url,
        terms_service_url = %config.terms_service_url,
        upstream_timeout_ms = config.upstream_timeout.as_millis(),
        "upstream clients configured"
    );

    // The registry owns the set of running game tasks.
    let registry = Arc::new(GameRegistry::new(GameSettings {
        command_channel_capacity: COMMAND_CHANNEL_CAPACITY,
        tuning: RoundTuning {
            lock_during_announcement: config.lock_during_announcement,
            ..RoundTuning::default()
        },
        completed_game_grace: COMPLETED_GAME_GRACE,
        idle_game_timeout: IDLE_GAME_TIMEOUT,
    }));

    Ok(AppState {
        registry,
        terms: Arc::new(terms),
        lobby_directory: Arc::new(lobby.clone()),
        lobby,
    })
}

pub async fn run(listener: tokio::net::TcpListener, config: ArenaConfig) -> Result<()> {
    let address = listener.local_addr()?;
    let app = app(build_state(&config)?);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let config = ArenaConfig::from_env();
    let address = SocketAddr::from(([0, 0, 0, 0], config.http_port));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, config).await
}
