use crate::domain::CredentialError;
use crate::interface_adapters::protocol::{
    ErrorResponse, InstallRequest, UninstallRequest, WebhookResponse,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{InstallUseCase, UninstallUseCase};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::field::Empty;

type WebhookResult = Result<Json<WebhookResponse>, (StatusCode, Json<ErrorResponse>)>;

// Handler for the Edusign install webhook: store the school's API token.
#[tracing::instrument(name = "install", skip_all, fields(school_id = Empty))]
pub async fn install(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InstallRequest>, JsonRejection>,
) -> WebhookResult {
    let Json(payload) = payload.map_err(map_rejection)?;
    tracing::Span::current().record("school_id", payload.school_id.as_str());

    let use_case = InstallUseCase {
        store: state.credentials.as_ref(),
    };

    use_case
        .execute(&payload.school_id, &payload.token)
        .await
        .map_err(map_credential_error)?;

    tracing::info!("school token stored.");
    Ok(Json(WebhookResponse {
        success: true,
        removed: None,
    }))
}

// Handler for the Edusign uninstall webhook: forget the school's API token.
#[tracing::instrument(name = "uninstall", skip_all, fields(school_id = Empty))]
pub async fn uninstall(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UninstallRequest>, JsonRejection>,
) -> WebhookResult {
    let Json(payload) = payload.map_err(map_rejection)?;
    tracing::Span::current().record("school_id", payload.school_id.as_str());

    let use_case = UninstallUseCase {
        store: state.credentials.as_ref(),
    };

    let result = use_case
        .execute(&payload.school_id)
        .await
        .map_err(map_credential_error)?;

    tracing::info!(removed = result.removed, "school token removed.");
    Ok(Json(WebhookResponse {
        success: true,
        removed: Some(result.removed),
    }))
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

// Unreadable bodies keep axum's status but use the JSON error envelope.
fn map_rejection(rejection: JsonRejection) -> (StatusCode, Json<ErrorResponse>) {
    tracing::warn!(error = %rejection, "rejected webhook body.");
    error_response(rejection.status(), &rejection.body_text())
}

// Store failures are not recoverable for webhooks, so they surface as 500.
fn map_credential_error(err: CredentialError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        CredentialError::MissingSchoolId => {
            error_response(StatusCode::BAD_REQUEST, "schoolId is required")
        }
        CredentialError::MissingToken => error_response(StatusCode::BAD_REQUEST, "token is required"),
        CredentialError::StorageFailure => {
            tracing::error!("credential store write failed.");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage error")
        }
    }
}
