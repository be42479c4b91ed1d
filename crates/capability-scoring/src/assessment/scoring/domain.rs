use super::super::domain::{
    DomainScore, QuestionTypeDefinition, ScoredQuestion, TypeSubtotal, EXPECTED_WEIGHT_TOTAL,
    UNTYPED_LABEL,
};
use super::mean_rating;
use std::collections::HashMap;

/// Scores one domain: simple average, type-weighted average and per-type subtotals.
///
/// Weights are renormalized against the weight of buckets that actually hold
/// questions, so a configured type without data does not drag the average toward
/// zero. Untyped questions claim whatever share of 100 the present types leave
/// unassigned, never less than zero.
pub fn calculate_domain_score(
    questions: &[ScoredQuestion],
    question_types: Option<&[QuestionTypeDefinition]>,
) -> DomainScore {
    if questions.is_empty() {
        return DomainScore::empty();
    }

    let question_count = questions.len();
    let simple_average = mean_rating(questions);

    let question_types = match question_types {
        Some(types) if !types.is_empty() => types,
        _ => {
            return DomainScore {
                simple_average,
                weighted_average: None,
                type_subtotals: Vec::new(),
                question_count,
            }
        }
    };

    let mut by_type: HashMap<&str, Vec<&ScoredQuestion>> = HashMap::new();
    let mut untyped: Vec<&ScoredQuestion> = Vec::new();
    for question in questions {
        match question.question_type.as_deref() {
            Some(name) => by_type.entry(name).or_default().push(question),
            None => untyped.push(question),
        }
    }

    let mut type_subtotals = Vec::new();
    let mut total_assigned_weight = 0.0_f64;

    for definition in question_types {
        let Some(bucket) = by_type.get(definition.name.as_str()) else {
            continue;
        };

        type_subtotals.push(TypeSubtotal {
            type_name: definition.name.clone(),
            type_weight: definition.weight,
            average: mean_rating(bucket.iter().copied()),
            question_count: bucket.len(),
        });
        total_assigned_weight += definition.weight;
    }

    if !untyped.is_empty() {
        let untyped_weight = (EXPECTED_WEIGHT_TOTAL - total_assigned_weight).max(0.0);
        type_subtotals.push(TypeSubtotal {
            type_name: UNTYPED_LABEL.to_string(),
            type_weight: untyped_weight,
            average: mean_rating(untyped.iter().copied()),
            question_count: untyped.len(),
        });
        total_assigned_weight += untyped_weight;
    }

    let weighted_average = if total_assigned_weight > 0.0 {
        type_subtotals
            .iter()
            .map(|subtotal| subtotal.average * (subtotal.type_weight / total_assigned_weight))
            .sum::<f64>()
    } else {
        simple_average
    };

    DomainScore {
        simple_average,
        weighted_average: Some(weighted_average),
        type_subtotals,
        question_count,
    }
}
