//! Axum route handlers for the Assessment API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::assessment::models::{AnswerValue, AssessmentResult};
use crate::assessment::questions::Question;
use crate::assessment::results::{PathChoice, ResultsView};
use crate::assessment::session::{AssessmentSession, SessionView};
use crate::enrichment::{run_enrichment, EnrichedResult};
use crate::errors::AppError;
use crate::models::user::UserProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub count: usize,
    pub questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub value: AnswerValue,
}

#[derive(Debug, Deserialize)]
pub struct SelectPathRequest {
    pub path: PathChoice,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub result: AssessmentResult,
    /// True when an enrichment request was started in the background.
    pub enrichment_pending: bool,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub view: ResultsView,
    pub enrichment: Option<EnrichedResult>,
    pub selected_path: Option<PathChoice>,
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Assessment session {id} not found"))
}

/// Applies `f` to the stored session and returns the updated view.
async fn mutate<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut AssessmentSession) -> Result<R, crate::assessment::errors::AssessmentError>,
) -> Result<(R, SessionView), AppError> {
    state
        .sessions
        .update(id, |s| f(s).map(|r| (r, s.view())))
        .await
        .ok_or_else(|| session_not_found(id))?
        .map_err(AppError::from)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/assessment/questions
pub async fn handle_list_questions(State(state): State<AppState>) -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        count: state.bank.len(),
        questions: state.bank.questions().to_vec(),
    })
}

/// POST /api/v1/assessments
///
/// Body is the user profile itself; every field is optional.
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(user): Json<UserProfile>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = AssessmentSession::new(
        user,
        state.bank.clone(),
        state.config.slider_policy,
    );
    let view = session.view();
    let id = state.sessions.insert(session).await;
    info!(session_id = %id, user_id = %view.user_id, "assessment session created");
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/assessments/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(session.view()))
}

/// DELETE /api/v1/assessments/:id
///
/// Abandons the session. Any enrichment still running for it is discarded.
pub async fn handle_abandon_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .remove(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    info!(session_id = %id, "assessment session abandoned");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/assessments/:id/answers/:index
pub async fn handle_record_answer(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    let (stored, view) = mutate(&state, id, |s| s.answer_at(index, req.value)).await?;
    debug!(session_id = %id, index, value = %stored, "answer recorded");
    Ok(Json(view))
}

/// POST /api/v1/assessments/:id/next
pub async fn handle_next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let (_, view) = mutate(&state, id, |s| s.next()).await?;
    Ok(Json(view))
}

/// POST /api/v1/assessments/:id/previous
pub async fn handle_previous(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let (_, view) = mutate(&state, id, |s| s.previous()).await?;
    Ok(Json(view))
}

/// POST /api/v1/assessments/:id/submit
///
/// Scores synchronously and responds with the computed result. Enrichment,
/// when configured, runs afterwards and never affects this response.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let ((result, attempt, user), view) = mutate(&state, id, |s| {
        let result = s.submit()?.clone();
        Ok((result, s.attempt(), s.user.clone()))
    })
    .await?;

    info!(
        session_id = %id,
        attempt,
        strengths = ?result.strengths,
        weaknesses = ?result.weaknesses,
        "assessment scored"
    );

    let enrichment_pending = match &state.enricher {
        Some(enricher) => {
            run_enrichment(
                state.sessions.clone(),
                enricher.clone(),
                id,
                attempt,
                result.clone(),
                user,
            );
            true
        }
        None => false,
    };

    Ok(Json(SubmitResponse {
        result,
        enrichment_pending,
        session: view,
    }))
}

/// POST /api/v1/assessments/:id/retake
pub async fn handle_retake(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let (_, view) = mutate(&state, id, |s| s.retake()).await?;
    info!(session_id = %id, attempt = view.attempt, "assessment reset for retake");
    Ok(Json(view))
}

/// GET /api/v1/assessments/:id/results
pub async fn handle_get_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResultsResponse>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(ResultsResponse {
        view: ResultsView::build(session.result()),
        enrichment: session.enrichment().cloned(),
        selected_path: session.selected_path(),
    }))
}

/// POST /api/v1/assessments/:id/path
pub async fn handle_select_path(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectPathRequest>,
) -> Result<Json<SessionView>, AppError> {
    let (_, view) = mutate(&state, id, |s| s.select_path(req.path)).await?;
    info!(session_id = %id, path = ?req.path, "path selected");
    Ok(Json(view))
}
