use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::assessment::domain::{
    AssessmentSubmission, DomainResponses, QuestionTypeDefinition, ScoredQuestion,
};

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn knowledge_judgement(knowledge: f64, judgement: f64) -> Vec<QuestionTypeDefinition> {
    vec![
        QuestionTypeDefinition::new("Knowledge", knowledge),
        QuestionTypeDefinition::new("Judgement", judgement),
    ]
}

pub(super) fn raw_types() -> Value {
    json!([
        { "name": "Knowledge", "weight": 40 },
        { "name": "Judgement", "weight": 60 }
    ])
}

pub(super) fn leadership_domain() -> DomainResponses {
    DomainResponses {
        domain_id: "leadership".to_string(),
        domain_name: Some("Leadership".to_string()),
        questions: vec![
            ScoredQuestion::typed("lead-1", 8.0, "Knowledge"),
            ScoredQuestion::typed("lead-2", 6.0, "Judgement"),
        ],
    }
}

pub(super) fn coaching_domain() -> DomainResponses {
    DomainResponses {
        domain_id: "coaching".to_string(),
        domain_name: None,
        questions: vec![
            ScoredQuestion::typed("coach-1", 10.0, "Knowledge"),
            ScoredQuestion::typed("coach-2", 4.0, "Judgement"),
        ],
    }
}

pub(super) fn submission(question_types: Option<Value>) -> AssessmentSubmission {
    AssessmentSubmission {
        assessment_id: "assessment-42".to_string(),
        completed_on: NaiveDate::from_ymd_opt(2025, 10, 14),
        question_types,
        domains: vec![leadership_domain(), coaching_domain()],
    }
}
