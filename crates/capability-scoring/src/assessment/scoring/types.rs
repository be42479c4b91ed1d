use super::super::domain::{AssessmentTypeScore, QuestionTypeDefinition, ScoredQuestion};
use super::mean_rating;

/// Averages each configured type across every domain of an assessment.
///
/// Every configured type is reported, including ones without questions (average and
/// count of zero), so charts keep one axis per type. Matching is exact and
/// case-sensitive. Weights are passed through untouched.
pub fn calculate_type_scores(
    all_questions: &[ScoredQuestion],
    question_types: &[QuestionTypeDefinition],
) -> Vec<AssessmentTypeScore> {
    question_types
        .iter()
        .map(|definition| {
            let matching: Vec<&ScoredQuestion> = all_questions
                .iter()
                .filter(|question| {
                    question.question_type.as_deref() == Some(definition.name.as_str())
                })
                .collect();

            AssessmentTypeScore {
                type_name: definition.name.clone(),
                type_weight: definition.weight,
                average: mean_rating(matching.iter().copied()),
                question_count: matching.len(),
            }
        })
        .collect()
}
