use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label of the synthetic subtotal that collects questions without a type tag.
pub const UNTYPED_LABEL: &str = "Untyped";

/// Percentage total a complete question-type configuration is expected to reach.
pub const EXPECTED_WEIGHT_TOTAL: f64 = 100.0;

/// Accepted distance from [`EXPECTED_WEIGHT_TOTAL`] for two-decimal percentages.
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// One configured scoring category and its intended percentage contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTypeDefinition {
    pub name: String,
    pub weight: f64,
}

impl QuestionTypeDefinition {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// A single graded response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredQuestion {
    pub question_id: String,
    pub rating: f64,
    #[serde(default)]
    pub question_type: Option<String>,
    /// Reserved for per-question weight overrides; no scoring path reads it.
    #[serde(default)]
    pub type_weight: Option<f64>,
}

impl ScoredQuestion {
    pub fn typed(question_id: impl Into<String>, rating: f64, question_type: &str) -> Self {
        Self {
            question_id: question_id.into(),
            rating,
            question_type: Some(question_type.to_string()),
            type_weight: None,
        }
    }

    pub fn untyped(question_id: impl Into<String>, rating: f64) -> Self {
        Self {
            question_id: question_id.into(),
            rating,
            question_type: None,
            type_weight: None,
        }
    }
}

/// Per-type rollup inside a single domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSubtotal {
    pub type_name: String,
    pub type_weight: f64,
    pub average: f64,
    pub question_count: usize,
}

/// Scoring result for one domain.
///
/// `weighted_average` is `None` when type weighting is not configured, which is
/// distinct from a computed value that happens to match `simple_average`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    pub simple_average: f64,
    pub weighted_average: Option<f64>,
    pub type_subtotals: Vec<TypeSubtotal>,
    pub question_count: usize,
}

impl DomainScore {
    pub fn empty() -> Self {
        Self {
            simple_average: 0.0,
            weighted_average: None,
            type_subtotals: Vec::new(),
            question_count: 0,
        }
    }

    /// Weighted average when available, otherwise the simple average.
    pub fn headline(&self) -> f64 {
        self.weighted_average.unwrap_or(self.simple_average)
    }
}

/// Average of one configured type across every domain of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentTypeScore {
    pub type_name: String,
    pub type_weight: f64,
    pub average: f64,
    pub question_count: usize,
}

impl AssessmentTypeScore {
    /// Zero-question rows carry `average = 0` without meaning a zero score.
    pub fn has_data(&self) -> bool {
        self.question_count > 0
    }
}

/// Outcome of checking that configured weights total 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightValidation {
    pub valid: bool,
    pub total: f64,
}

/// Rated questions for one domain of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainResponses {
    pub domain_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default)]
    pub questions: Vec<ScoredQuestion>,
}

impl DomainResponses {
    pub fn label(&self) -> &str {
        self.domain_name.as_deref().unwrap_or(&self.domain_id)
    }
}

/// A completed assessment as supplied by the caller.
///
/// `question_types` is the raw JSON column value. An absent field falls back to the
/// scorer's default config; an explicit value (including `null`) is used as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub assessment_id: String,
    #[serde(default)]
    pub completed_on: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_types: Option<serde_json::Value>,
    #[serde(default)]
    pub domains: Vec<DomainResponses>,
}

impl AssessmentSubmission {
    pub fn questions(&self) -> impl Iterator<Item = &ScoredQuestion> {
        self.domains.iter().flat_map(|domain| domain.questions.iter())
    }
}

// Keeps an explicit `null` as `Some(Value::Null)` so it is not confused with an absent field.
pub(crate) fn deserialize_present<'de, D>(
    deserializer: D,
) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}
