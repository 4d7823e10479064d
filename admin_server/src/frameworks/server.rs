use crate::frameworks::config::AdminConfig;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::{AdminSettings, AppState, DiskImageSink, JsonFileTermStore};
use std::collections::HashMap;
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
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

pub fn build_state(config: &AdminConfig) -> AppState {
    if config.host_pin.is_none() {
        tracing::warn!("HOST_PIN is not set; host login is disabled");
    }
    tracing::debug!(
        terms_path = %config.terms_path.display(),
        upload_dir = %config.upload_dir.display(),
        "storage configured"
    );

    AppState {
        sessions: Arc::new(Mutex::new(HashMap::new())),
        terms: JsonFileTermStore::new(config.terms_path.clone()),
        images: DiskImageSink {
            dir: config.upload_dir.clone(),
        },
        settings: Arc::new(AdminSettings {
            host_pin: config.host_pin.clone(),
            host_session_ttl_seconds: config.host_session_ttl_seconds(),
            public_image_prefix: config.public_image_prefix.clone(),
        }),
    }
}

pub async fn run(listener: tokio::net::TcpListener, config: AdminConfig) -> Result<()> {
    let address = listener.local_addr()?;
    let app = app(build_state(&config));

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let config = AdminConfig::load().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::io::Error::other(e.to_string())
    })?;
    let address = SocketAddr::from(([0, 0, 0, 0], config.http_port));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, config).await
}
