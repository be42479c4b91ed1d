use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{
    deserialize_present, AssessmentSubmission, AssessmentTypeScore, DomainScore,
    QuestionTypeDefinition, ScoredQuestion, WeightValidation,
};
use super::ratings::RatingsImporter;
use super::report::{AssessmentReport, AssessmentScorer, ParsedQuestionTypes};
use super::scoring::{calculate_domain_score, calculate_type_scores};
use crate::error::AppError;

/// Router builder exposing the scoring operations as JSON endpoints.
pub fn assessment_router(scorer: Arc<AssessmentScorer>) -> Router {
    Router::new()
        .route("/api/v1/assessments/score", post(score_handler))
        .route(
            "/api/v1/assessments/:assessment_id/ratings",
            post(ratings_handler),
        )
        .route("/api/v1/assessments/domain-score", post(domain_score_handler))
        .route("/api/v1/assessments/type-scores", post(type_scores_handler))
        .route("/api/v1/question-types/validate", post(validate_handler))
        .with_state(scorer)
}

/// Questions plus an optional raw config; an absent config uses the scorer default.
#[derive(Debug, Deserialize)]
pub struct QuestionScoringRequest {
    pub questions: Vec<ScoredQuestion>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub question_types: Option<Value>,
}

/// Parsed view of a raw question-type config.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionTypesValidationResponse {
    pub question_types: Option<Vec<QuestionTypeDefinition>>,
    pub dropped_entries: usize,
    pub validation: Option<WeightValidation>,
}

pub(crate) async fn score_handler(
    State(scorer): State<Arc<AssessmentScorer>>,
    Json(submission): Json<AssessmentSubmission>,
) -> Json<AssessmentReport> {
    Json(scorer.score(&submission))
}

/// Scores a ratings CSV export sent as the request body with the default config.
pub(crate) async fn ratings_handler(
    State(scorer): State<Arc<AssessmentScorer>>,
    Path(assessment_id): Path<String>,
    body: String,
) -> Result<Json<AssessmentReport>, AppError> {
    let domains = RatingsImporter::from_reader(body.as_bytes())?;
    let submission = AssessmentSubmission {
        assessment_id,
        completed_on: None,
        question_types: None,
        domains,
    };
    Ok(Json(scorer.score(&submission)))
}

pub(crate) async fn domain_score_handler(
    State(scorer): State<Arc<AssessmentScorer>>,
    Json(request): Json<QuestionScoringRequest>,
) -> Json<DomainScore> {
    let config = resolve_config(&scorer, request.question_types.as_ref());
    Json(calculate_domain_score(
        &request.questions,
        config.definitions.as_deref(),
    ))
}

pub(crate) async fn type_scores_handler(
    State(scorer): State<Arc<AssessmentScorer>>,
    Json(request): Json<QuestionScoringRequest>,
) -> Json<Vec<AssessmentTypeScore>> {
    let config = resolve_config(&scorer, request.question_types.as_ref());
    let definitions = config.definitions.unwrap_or_default();
    Json(calculate_type_scores(&request.questions, &definitions))
}

pub(crate) async fn validate_handler(
    Json(raw): Json<Value>,
) -> Json<QuestionTypesValidationResponse> {
    let parsed = ParsedQuestionTypes::from_raw(&raw);
    Json(QuestionTypesValidationResponse {
        question_types: parsed.definitions,
        dropped_entries: parsed.dropped_entries,
        validation: parsed.validation,
    })
}

fn resolve_config(scorer: &AssessmentScorer, raw: Option<&Value>) -> ParsedQuestionTypes {
    ParsedQuestionTypes::from_raw(raw.unwrap_or(scorer.default_question_types()))
}
