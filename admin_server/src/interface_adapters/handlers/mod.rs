pub mod host;
pub mod terms;
pub mod upload;

use crate::domain::HostError;
use crate::interface_adapters::protocol::ErrorResponse;
use crate::interface_adapters::state::{AppState, InMemorySessionStore, SystemClock};
use crate::use_cases::verify_host::VerifyHostUseCase;
use axum::http::{HeaderMap, StatusCode, header};
use axum::Json;

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

// Helper to build a JSON error response.
pub(crate) fn error_response(status: StatusCode, message: &str) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            ok: false,
            message: message.to_string(),
        }),
    )
}

pub(crate) fn map_host_error(err: HostError) -> HandlerError {
    match err {
        HostError::InvalidPin => error_response(StatusCode::UNAUTHORIZED, "invalid pin"),
        HostError::InvalidToken => {
            error_response(StatusCode::UNAUTHORIZED, "invalid session token")
        }
        HostError::SessionExpired => error_response(StatusCode::UNAUTHORIZED, "session expired"),
        HostError::StorageFailure => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage error")
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// Rejects the request unless it carries a live host session token.
pub(crate) async fn require_host(state: &AppState, headers: &HeaderMap) -> Result<(), HandlerError> {
    let token = bearer_token(headers)
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "host session required"))?;

    let use_case = VerifyHostUseCase {
        clock: SystemClock,
        store: InMemorySessionStore {
            sessions: state.sessions.clone(),
        },
    };
    use_case.execute(token).await.map(|_| ()).map_err(map_host_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_errors_map_to_statuses() {
        let (status, Json(body)) = map_host_error(HostError::StorageFailure);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.ok);
        assert_eq!(body.message, "storage error");

        for err in [
            HostError::InvalidPin,
            HostError::InvalidToken,
            HostError::SessionExpired,
        ] {
            assert_eq!(map_host_error(err).0, StatusCode::UNAUTHORIZED);
        }
    }
}
