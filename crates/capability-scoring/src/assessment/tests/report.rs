use super::common::*;
use serde_json::json;

use crate::assessment::domain::ScoredQuestion;
use crate::assessment::report::AssessmentScorer;

#[test]
fn report_scores_every_domain_in_order() {
    let scorer = AssessmentScorer::default();
    let report = scorer.score(&submission(Some(raw_types())));

    assert_eq!(report.assessment_id, "assessment-42");
    assert_eq!(report.domains.len(), 2);
    assert_eq!(report.domains[0].domain_id, "leadership");
    assert_eq!(report.domains[0].label(), "Leadership");
    assert_eq!(report.domains[1].label(), "coaching");

    // 8 * 0.4 + 6 * 0.6
    let leadership = &report.domains[0].score;
    assert_close(leadership.weighted_average.expect("weighted"), 6.8);
    assert_close(leadership.simple_average, 7.0);
}

#[test]
fn report_includes_cross_domain_type_scores() {
    let report = AssessmentScorer::default().score(&submission(Some(raw_types())));

    assert_eq!(report.type_scores.len(), 2);
    assert_close(report.type_scores[0].average, 9.0);
    assert_close(report.type_scores[1].average, 5.0);
    assert_eq!(report.overall.question_count, 4);
    assert_close(report.overall.simple_average, 7.0);
}

#[test]
fn report_without_config_disables_weighting() {
    let report = AssessmentScorer::default().score(&submission(Some(json!(null))));

    assert!(!report.weighting.enabled);
    assert_eq!(report.weighting.configured_types, 0);
    assert!(report.weighting.validation.is_none());
    assert!(report.type_scores.is_empty());
    assert!(report
        .domains
        .iter()
        .all(|domain| domain.score.weighted_average.is_none()));
    assert!(report.warnings.is_empty());
}

#[test]
fn absent_config_uses_scorer_default() {
    let scorer = AssessmentScorer::new(raw_types());
    let report = scorer.score(&submission(None));

    assert!(report.weighting.enabled);
    assert_eq!(report.weighting.configured_types, 2);
    assert!(report.weighting.validation.expect("validated").valid);
}

#[test]
fn explicit_null_overrides_scorer_default() {
    let scorer = AssessmentScorer::new(raw_types());
    let report = scorer.score(&submission(Some(json!(null))));

    assert!(!report.weighting.enabled);
}

#[test]
fn report_warns_about_weight_total_and_dropped_entries() {
    let raw = json!([
        { "name": "Knowledge", "weight": 30 },
        { "name": "Judgement", "weight": 50 },
        { "name": "", "weight": 20 }
    ]);

    let report = AssessmentScorer::default().score(&submission(Some(raw)));

    assert_eq!(report.weighting.dropped_entries, 1);
    let validation = report.weighting.validation.expect("validated");
    assert!(!validation.valid);
    assert_eq!(validation.total, 80.0);
    assert_eq!(
        report.warnings,
        vec![
            "question type weights total 80.00, expected 100.00".to_string(),
            "1 question type entry ignored (missing name or non-positive weight)".to_string(),
        ]
    );
}

#[test]
fn report_warns_once_per_unconfigured_tag() {
    let mut submission = submission(Some(raw_types()));
    submission.domains[0]
        .questions
        .push(ScoredQuestion::typed("lead-3", 5.0, "Practice"));
    submission.domains[1]
        .questions
        .push(ScoredQuestion::typed("coach-3", 7.0, "Practice"));

    let report = AssessmentScorer::default().score(&submission);

    let practice_warnings: Vec<_> = report
        .warnings
        .iter()
        .filter(|warning| warning.contains("'Practice'"))
        .collect();
    assert_eq!(practice_warnings.len(), 1);
}

#[test]
fn empty_submission_scores_zero() {
    let mut submission = submission(Some(raw_types()));
    submission.domains.clear();

    let report = AssessmentScorer::default().score(&submission);

    assert!(report.domains.is_empty());
    assert_eq!(report.overall.question_count, 0);
    assert_eq!(report.overall.simple_average, 0.0);
    assert!(report.type_scores.iter().all(|score| !score.has_data()));
}

#[test]
fn report_serializes_flattened_domain_scores() {
    let report = AssessmentScorer::default().score(&submission(Some(raw_types())));

    let value = serde_json::to_value(&report).expect("report serializes");

    let domain = &value["domains"][0];
    assert_eq!(domain["domain_id"], "leadership");
    assert_eq!(domain["question_count"], 2);
    assert!(domain["type_subtotals"].is_array());
    assert_eq!(value["completed_on"], "2025-10-14");
}
