use crate::domain::UploadError;
use crate::interface_adapters::handlers::{HandlerError, error_response, require_host};
use crate::interface_adapters::protocol::UploadImageResponse;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::upload::{ImageUpload, MAX_IMAGE_BYTES, UploadImageUseCase};
use axum::extract::{Multipart, State};
use axum::extract::multipart::MultipartError;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tracing::{error, info};

// Handler for card image uploads (multipart, `file` part).
#[tracing::instrument(name = "upload_image", skip_all)]
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadImageResponse>, HandlerError> {
    require_host(&state, &headers).await?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(map_multipart_error)?;
        upload = Some(ImageUpload {
            original_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let use_case = UploadImageUseCase {
        clock: SystemClock,
        sink: state.images.clone(),
        public_prefix: state.settings.public_image_prefix.clone(),
    };
    let stored = use_case.execute(upload).await.map_err(map_upload_error)?;
    info!(file_name = %stored.file_name, "image stored");

    Ok(Json(UploadImageResponse {
        success: true,
        file_name: stored.file_name,
        path: stored.public_path,
    }))
}

fn map_upload_error(err: UploadError) -> HandlerError {
    match err {
        UploadError::StorageFailure(ref reason) => {
            error!(%reason, "failed to write uploaded image");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
        _ => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    }
}

fn map_multipart_error(err: MultipartError) -> HandlerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return map_upload_error(UploadError::TooLarge {
            limit_bytes: MAX_IMAGE_BYTES,
        });
    }
    error_response(StatusCode::BAD_REQUEST, &err.body_text())
}
