use super::domain::{
    QuestionTypeDefinition, WeightValidation, EXPECTED_WEIGHT_TOTAL, WEIGHT_TOLERANCE,
};
use serde_json::Value;

/// Normalizes a raw `question_types` column into usable definitions.
///
/// Returns `None` when the value is falsy, not an array, empty, or when every entry
/// is malformed. `None` is the single "type weighting disabled" sentinel; an empty
/// vector is never returned. Malformed entries are dropped without error.
pub fn parse_question_types(raw: &Value) -> Option<Vec<QuestionTypeDefinition>> {
    if is_falsy(raw) {
        return None;
    }

    let entries = raw.as_array()?;
    let parsed: Vec<QuestionTypeDefinition> = entries.iter().filter_map(parse_entry).collect();

    if parsed.is_empty() {
        None
    } else {
        Some(parsed)
    }
}

/// Number of entries in the raw config, used to report how many were dropped.
pub fn count_raw_entries(raw: &Value) -> usize {
    raw.as_array().map(Vec::len).unwrap_or(0)
}

/// Sums the configured weights and checks them against 100 within a 0.01 tolerance.
pub fn validate_type_weights(types: &[QuestionTypeDefinition]) -> WeightValidation {
    let total: f64 = types.iter().map(|definition| definition.weight).sum();
    WeightValidation {
        valid: (total - EXPECTED_WEIGHT_TOTAL).abs() < WEIGHT_TOLERANCE,
        total,
    }
}

fn parse_entry(entry: &Value) -> Option<QuestionTypeDefinition> {
    let object = entry.as_object()?;
    let name = object.get("name")?.as_str()?;
    if name.trim().is_empty() {
        return None;
    }

    let weight = object.get("weight")?.as_f64()?;
    if weight <= 0.0 {
        return None;
    }

    Some(QuestionTypeDefinition::new(name, weight))
}

fn is_falsy(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().map(|n| n == 0.0).unwrap_or(false),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
