use crate::domain::{Term, TermError, TermInput};
use crate::interface_adapters::handlers::{HandlerError, error_response, require_host};
use crate::interface_adapters::protocol::{ActionResponse, UpsertTermRequest};
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::terms::{DeleteTermUseCase, ListTermsUseCase, UpsertMode, UpsertTermUseCase};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tracing::{error, info};

// Public deck source for the arena service and the dashboard list.
#[tracing::instrument(name = "list_terms", skip_all)]
pub async fn list_terms(State(state): State<AppState>) -> Result<Json<Vec<Term>>, HandlerError> {
    let use_case = ListTermsUseCase {
        store: state.terms.clone(),
    };

    use_case.execute().await.map(Json).map_err(map_term_error)
}

#[tracing::instrument(name = "upsert_term", skip_all, fields(term_id = ?body.id))]
pub async fn upsert_term(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UpsertTermRequest>,
) -> Result<Json<ActionResponse>, HandlerError> {
    require_host(&state, &headers).await?;

    let use_case = UpsertTermUseCase {
        clock: SystemClock,
        store: state.terms.clone(),
    };
    let result = use_case
        .execute(TermInput {
            id: body.id,
            title: body.title,
            description: body.description,
            image: body.image,
        })
        .await
        .map_err(map_term_error)?;

    let message = match result.mode {
        UpsertMode::Created => "term created",
        UpsertMode::Updated => "term updated",
    };
    info!(term_id = %result.term.id, message, "term saved");

    Ok(Json(ActionResponse {
        ok: true,
        message: message.to_string(),
        term: Some(result.term),
        id: None,
    }))
}

#[tracing::instrument(name = "delete_term", skip_all, fields(term_id = %id))]
pub async fn delete_term(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, HandlerError> {
    require_host(&state, &headers).await?;

    let use_case = DeleteTermUseCase {
        store: state.terms.clone(),
    };
    let id = use_case.execute(&id).await.map_err(map_term_error)?;
    info!("term deleted");

    Ok(Json(ActionResponse {
        ok: true,
        message: "term deleted".to_string(),
        term: None,
        id: Some(id),
    }))
}

fn map_term_error(err: TermError) -> HandlerError {
    match err {
        TermError::MissingField(_) | TermError::NotFound => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        TermError::StorageFailure(_) => {
            error!(error = %err, "term store failure");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "term storage error")
        }
    }
}
