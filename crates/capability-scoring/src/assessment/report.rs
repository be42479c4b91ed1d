use super::domain::{
    AssessmentSubmission, AssessmentTypeScore, DomainScore, QuestionTypeDefinition,
    WeightValidation,
};
use super::question_types::{count_raw_entries, parse_question_types, validate_type_weights};
use super::scoring::{calculate_domain_score, calculate_type_scores, mean_rating};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Scores whole assessment submissions against a default question-type config.
pub struct AssessmentScorer {
    default_question_types: Value,
}

impl Default for AssessmentScorer {
    fn default() -> Self {
        Self::new(Value::Null)
    }
}

impl AssessmentScorer {
    pub fn new(default_question_types: Value) -> Self {
        Self {
            default_question_types,
        }
    }

    pub fn default_question_types(&self) -> &Value {
        &self.default_question_types
    }

    pub fn score(&self, submission: &AssessmentSubmission) -> AssessmentReport {
        let raw_types = submission
            .question_types
            .as_ref()
            .unwrap_or(&self.default_question_types);
        let config = ParsedQuestionTypes::from_raw(raw_types);
        let types = config.definitions.as_deref();

        let domains: Vec<ScoredDomain> = submission
            .domains
            .iter()
            .map(|domain| {
                let score = calculate_domain_score(&domain.questions, types);
                debug!(
                    assessment_id = %submission.assessment_id,
                    domain_id = %domain.domain_id,
                    questions = score.question_count,
                    simple_average = score.simple_average,
                    weighted_average = ?score.weighted_average,
                    "scored assessment domain"
                );
                ScoredDomain {
                    domain_id: domain.domain_id.clone(),
                    domain_name: domain.domain_name.clone(),
                    score,
                }
            })
            .collect();

        let all_questions: Vec<_> = submission.questions().cloned().collect();
        let type_scores = match types {
            Some(types) => calculate_type_scores(&all_questions, types),
            None => Vec::new(),
        };

        let overall = OverallScore {
            simple_average: mean_rating(&all_questions),
            question_count: all_questions.len(),
        };

        let warnings = collect_warnings(submission, &config);
        for message in &warnings {
            warn!(assessment_id = %submission.assessment_id, "{message}");
        }

        AssessmentReport {
            assessment_id: submission.assessment_id.clone(),
            completed_on: submission.completed_on,
            weighting: config.summary(),
            overall,
            domains,
            type_scores,
            warnings,
        }
    }
}

/// Outcome of parsing a raw config, keeping what the report needs to explain it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuestionTypes {
    pub definitions: Option<Vec<QuestionTypeDefinition>>,
    pub dropped_entries: usize,
    pub validation: Option<WeightValidation>,
}

impl ParsedQuestionTypes {
    pub fn from_raw(raw: &Value) -> Self {
        let definitions = parse_question_types(raw);
        let kept = definitions.as_ref().map(Vec::len).unwrap_or(0);
        let dropped_entries = count_raw_entries(raw).saturating_sub(kept);
        let validation = definitions.as_deref().map(validate_type_weights);

        Self {
            definitions,
            dropped_entries,
            validation,
        }
    }

    pub fn summary(&self) -> WeightingSummary {
        WeightingSummary {
            enabled: self.definitions.is_some(),
            configured_types: self.definitions.as_ref().map(Vec::len).unwrap_or(0),
            dropped_entries: self.dropped_entries,
            validation: self.validation,
        }
    }
}

fn collect_warnings(
    submission: &AssessmentSubmission,
    config: &ParsedQuestionTypes,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(validation) = config.validation {
        if !validation.valid {
            warnings.push(format!(
                "question type weights total {:.2}, expected 100.00",
                validation.total
            ));
        }
    }

    if config.dropped_entries > 0 {
        warnings.push(format!(
            "{} question type entr{} ignored (missing name or non-positive weight)",
            config.dropped_entries,
            if config.dropped_entries == 1 { "y" } else { "ies" }
        ));
    }

    if let Some(definitions) = &config.definitions {
        let mut unknown: Vec<&str> = Vec::new();
        for question in submission.questions() {
            let Some(tag) = question.question_type.as_deref() else {
                continue;
            };
            let configured = definitions.iter().any(|definition| definition.name == tag);
            if !configured && !unknown.contains(&tag) {
                unknown.push(tag);
            }
        }

        for tag in unknown {
            warnings.push(format!(
                "questions tagged '{tag}' match no configured question type and are excluded from weighting"
            ));
        }
    }

    warnings
}

/// Full scoring result for one assessment submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub assessment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<NaiveDate>,
    pub weighting: WeightingSummary,
    pub overall: OverallScore,
    pub domains: Vec<ScoredDomain>,
    pub type_scores: Vec<AssessmentTypeScore>,
    pub warnings: Vec<String>,
}

/// How the question-type config was interpreted for a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightingSummary {
    pub enabled: bool,
    pub configured_types: usize,
    pub dropped_entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<WeightValidation>,
}

/// Simple average over every question of every domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub simple_average: f64,
    pub question_count: usize,
}

/// A domain score tagged with the domain it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDomain {
    pub domain_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(flatten)]
    pub score: DomainScore,
}

impl ScoredDomain {
    pub fn label(&self) -> &str {
        self.domain_name.as_deref().unwrap_or(&self.domain_id)
    }
}
