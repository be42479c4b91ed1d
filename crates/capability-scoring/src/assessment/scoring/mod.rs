mod domain;
mod types;

pub use domain::calculate_domain_score;
pub use types::calculate_type_scores;

use super::domain::ScoredQuestion;

/// Arithmetic mean of the ratings; callers guarantee a non-empty slice.
pub(crate) fn mean_rating<'a, I>(questions: I) -> f64
where
    I: IntoIterator<Item = &'a ScoredQuestion>,
{
    let (sum, count) = questions
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), question| {
            (sum + question.rating, count + 1)
        });

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
