//! Capability assessment scoring.
//!
//! `question_types` turns the raw JSON config into weighted type definitions,
//! `scoring` computes per-domain and cross-domain averages, and `report` composes
//! both for a full submission. `ratings` and `router` are the CSV and HTTP entry points.

pub mod domain;
pub mod question_types;
pub mod ratings;
pub mod report;
pub mod router;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentSubmission, AssessmentTypeScore, DomainResponses, DomainScore,
    QuestionTypeDefinition, ScoredQuestion, TypeSubtotal, WeightValidation, UNTYPED_LABEL,
};
pub use question_types::{count_raw_entries, parse_question_types, validate_type_weights};
pub use ratings::{RatingsImportError, RatingsImporter};
pub use report::{
    AssessmentReport, AssessmentScorer, OverallScore, ParsedQuestionTypes, ScoredDomain,
    WeightingSummary,
};
pub use router::{assessment_router, QuestionScoringRequest, QuestionTypesValidationResponse};
pub use scoring::{calculate_domain_score, calculate_type_scores};
