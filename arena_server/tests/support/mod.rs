// Shared bootstrapping for integration tests: one fake upstream (lobby backend
// plus term catalog) and one arena server, both on ephemeral ports.
use arena_server::ArenaConfig;
use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

static SERVER_URL: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Term ids carry no dashes so tests can group cards by id prefix.
pub fn term_group(card_id: &str) -> &str {
    card_id.split('-').next().unwrap_or_default()
}

fn upstream_app() -> Router {
    Router::new()
        .route("/api/terms", get(terms))
        .route("/api/lobby/{code}", get(lobby_by_code))
        .route("/health", get(health))
}

async fn terms() -> Json<Value> {
    let terms: Vec<Value> = (1..=6)
        .map(|n| {
            json!({
                "id": format!("t{n}"),
                "title": format!("Kavram {n}"),
                "description": format!("Aciklama {n}"),
                "image": format!("/resimler/kartlar/t{n}.png"),
            })
        })
        .collect();
    Json(Value::Array(terms))
}

async fn lobby_by_code(Path(code): Path<String>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if code != "AB" {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Lobi bulunamadi"})),
        ));
    }
    Ok(Json(json!({
        "id": 7,
        "code": "AB",
        "status": 0,
        "createdAt": "2025-01-01T10:00:00Z",
        "players": [
            {"id": 1, "username": "ali", "isAdmin": true},
            {"id": 2, "username": "ayse", "isAdmin": false, "score": 0}
        ]
    })))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "message": "up", "time": "2025-01-01T10:00:00Z"}))
}

// Ensure the test servers are running and return the arena base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Own thread and runtime so the servers outlive individual test runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let upstream = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind upstream port");
                let upstream_url = format!("http://{}", upstream.local_addr().expect("addr"));
                tokio::spawn(async move {
                    axum::serve(upstream, upstream_app())
                        .await
                        .expect("upstream failed");
                });

                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{addr}"));

                let config = ArenaConfig {
                    http_port: addr.port(),
                    lobby_api_base_url: upstream_url.clone(),
                    terms_service_url: upstream_url,
                    upstream_timeout: Duration::from_secs(2),
                    lock_during_announcement: true,
                };
                arena_server::run(listener, config)
                    .await
                    .expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
