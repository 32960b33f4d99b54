//! Route handlers. Each one unwraps its body, calls [`TutorService`], and
//! wraps the reply; failures go through [`ApiError`].

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tutor::TutorService;

use crate::dto::{
    EvaluateBody, EvaluationResponse, ExplainBody, ExplainResponse, QuizBody, QuizResponse,
};
use crate::ApiError;

pub(crate) async fn explain(
    State(service): State<TutorService>,
    payload: Result<Json<ExplainBody>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let Json(body) = payload?;

    let explanation = service
        .explain(body.text.as_deref().unwrap_or_default(), body.goal.as_deref())
        .await?;

    Ok(Json(ExplainResponse { explanation }))
}

pub(crate) async fn generate_quiz(
    State(service): State<TutorService>,
    payload: Result<Json<QuizBody>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(body) = payload?;

    let quiz = service.generate_quiz(body.into()).await?;

    Ok(Json(QuizResponse {
        quiz_text: quiz.quiz_text,
        time_per_question: quiz.time_per_question,
    }))
}

pub(crate) async fn evaluate_quiz(
    State(service): State<TutorService>,
    payload: Result<Json<EvaluateBody>, JsonRejection>,
) -> Result<Json<EvaluationResponse>, ApiError> {
    let Json(body) = payload?;

    let evaluation_result = service.evaluate_quiz(body.into()).await?;

    Ok(Json(EvaluationResponse { evaluation_result }))
}

pub(crate) async fn health() -> StatusCode {
    StatusCode::OK
}
