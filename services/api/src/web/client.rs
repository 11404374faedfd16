//! services/api/src/web/client.rs
//!
//! Client dashboard endpoints: demo login, project lookup, feedback and
//! generated project status updates.

use crate::web::{
    protocol::{
        AiUpdatePayload, AiUpdateResponse, FailureResponse, FeedbackPayload, FeedbackResponse,
        LoginPayload, LoginResponse, ProjectResponse,
    },
    state::AppState,
};
use agency_core::{
    domain::{ClientProfile, Feedback},
    ports::PortError,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

type HandlerError = (StatusCode, Json<FailureResponse>);

fn failure(status: StatusCode, message: &str) -> HandlerError {
    (status, Json(FailureResponse::new(message)))
}

fn read_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HandlerError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| failure(StatusCode::BAD_REQUEST, &rejection.body_text()))
}

/// Maps a repository error, treating `NotFound` as `not_found_message`.
fn port_failure(err: PortError, not_found_message: &str) -> HandlerError {
    match err {
        PortError::NotFound(_) => failure(StatusCode::NOT_FOUND, not_found_message),
        other => {
            error!("Repository error: {:?}", other);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

/// Log in with a demo client account.
#[utoipa::path(
    post,
    path = "/api/client/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid email or password", body = FailureResponse)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let req = read_body(payload)?;
    let invalid = || failure(StatusCode::UNAUTHORIZED, "Invalid email or password");

    let client = match state.repository.find_client_by_email(&req.email).await {
        Ok(client) => client,
        Err(PortError::NotFound(_)) => return Err(invalid()),
        Err(e) => return Err(port_failure(e, "Invalid email or password")),
    };
    if client.password != req.password {
        return Err(invalid());
    }

    info!(client_id = %client.id, "Client logged in");
    Ok(Json(LoginResponse {
        success: true,
        token: format!("demo_token_{}", client.id),
        client: ClientProfile::from(&client),
    }))
}

/// Fetch a project with its team, milestones, messages and files.
#[utoipa::path(
    get,
    path = "/api/client/project/{projectId}",
    params(
        ("projectId" = String, Path, description = "The project identifier.")
    ),
    responses(
        (status = 200, description = "Project found", body = ProjectResponse),
        (status = 404, description = "Project not found", body = FailureResponse)
    )
)]
pub async fn get_project_handler(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let project = state
        .repository
        .get_project(&project_id)
        .await
        .map_err(|e| port_failure(e, "Project not found"))?;

    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

/// Send feedback to the project team.
#[utoipa::path(
    post,
    path = "/api/client/feedback",
    request_body = FeedbackPayload,
    responses(
        (status = 200, description = "Feedback recorded", body = FeedbackResponse),
        (status = 400, description = "Empty message", body = FailureResponse)
    )
)]
pub async fn feedback_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FeedbackPayload>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let req = read_body(payload)?;
    let message = req.message.trim();
    if message.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Feedback message is required"));
    }

    let feedback = Feedback {
        id: format!("feedback_{}", Uuid::new_v4().simple()),
        project_id: req.project_id,
        client_id: req.client_id,
        message: message.to_string(),
        timestamp: Utc::now(),
        status: "new".to_string(),
    };
    let feedback = state
        .repository
        .add_feedback(feedback)
        .await
        .map_err(|e| port_failure(e, "Project not found"))?;

    Ok(Json(FeedbackResponse {
        success: true,
        feedback,
    }))
}

/// Generate a short status update for a project.
///
/// Confidence is 95 for generated updates and 85 for the canned ones.
#[utoipa::path(
    post,
    path = "/api/client/ai-update",
    request_body = AiUpdatePayload,
    responses(
        (status = 200, description = "Update generated", body = AiUpdateResponse),
        (status = 404, description = "Project not found", body = FailureResponse)
    )
)]
pub async fn ai_update_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AiUpdatePayload>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let req = read_body(payload)?;
    let project = state
        .repository
        .get_project(&req.project_id)
        .await
        .map_err(|e| port_failure(e, "Project not found"))?;

    let update = state.orchestrator.generate_project_update(&project).await;

    Ok(Json(AiUpdateResponse {
        success: true,
        update,
    }))
}
