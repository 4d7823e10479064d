use crate::interface_adapters::handlers::host::{host_login, host_logout, verify_host};
use crate::interface_adapters::handlers::terms::{delete_term, list_terms, upsert_term};
use crate::interface_adapters::handlers::upload::upload_image;
use crate::interface_adapters::state::AppState;
use crate::use_cases::upload::MAX_IMAGE_BYTES;
use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

// Multipart framing overhead allowed on top of the image limit.
const UPLOAD_BODY_SLACK: usize = 64 * 1024;

pub fn app(state: AppState) -> Router {
    let image_prefix = state.settings.public_image_prefix.clone();
    let images = ServeDir::new(state.images.dir.clone());

    Router::new()
        .route("/api/terms", get(list_terms).post(upsert_term))
        .route("/api/terms/{id}", delete(delete_term))
        .route("/api/host/login", post(host_login))
        .route("/api/host/verify", post(verify_host))
        .route("/api/host/logout", post(host_logout))
        .route(
            "/api/upload-image",
            post(upload_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + UPLOAD_BODY_SLACK)),
        )
        .nest_service(&image_prefix, images)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
