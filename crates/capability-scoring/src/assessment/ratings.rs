use super::domain::{DomainResponses, ScoredQuestion};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum RatingsImportError {
    #[error("failed to read ratings export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid ratings CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row} has no domain")]
    MissingDomain { row: u64 },
    #[error("row {row} has a rating that is not a finite number")]
    NonFiniteRating { row: u64 },
}

/// Loads per-domain ratings from a CSV export.
///
/// Expected headers: `Domain`, `Question ID`, `Rating`, plus optional `Domain Name`,
/// `Question Type` and `Type Weight`. Domains keep the order in which they first
/// appear in the file.
pub struct RatingsImporter;

impl RatingsImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<DomainResponses>, RatingsImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<DomainResponses>, RatingsImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut domains: Vec<DomainResponses> = Vec::new();

        for (index, record) in csv_reader.deserialize::<RatingRow>().enumerate() {
            let row = record?;
            // Header is line 1.
            let line = index as u64 + 2;

            if row.domain.is_empty() {
                return Err(RatingsImportError::MissingDomain { row: line });
            }
            if !row.rating.is_finite() {
                return Err(RatingsImportError::NonFiniteRating { row: line });
            }

            let position = match domains
                .iter()
                .position(|domain| domain.domain_id == row.domain)
            {
                Some(position) => position,
                None => {
                    domains.push(DomainResponses {
                        domain_id: row.domain.clone(),
                        domain_name: None,
                        questions: Vec::new(),
                    });
                    domains.len() - 1
                }
            };

            let domain = &mut domains[position];
            if domain.domain_name.is_none() {
                domain.domain_name = row.domain_name;
            }
            domain.questions.push(ScoredQuestion {
                question_id: row.question_id,
                rating: row.rating,
                question_type: row.question_type,
                type_weight: row.type_weight,
            });
        }

        Ok(domains)
    }
}

#[derive(Debug, Deserialize)]
struct RatingRow {
    #[serde(rename = "Domain")]
    domain: String,
    #[serde(
        rename = "Domain Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    domain_name: Option<String>,
    #[serde(rename = "Question ID")]
    question_id: String,
    #[serde(rename = "Rating")]
    rating: f64,
    #[serde(
        rename = "Question Type",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    question_type: Option<String>,
    #[serde(rename = "Type Weight", default)]
    type_weight: Option<f64>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn groups_rows_by_domain_in_first_seen_order() {
        let csv = "Domain,Question ID,Rating,Question Type\n\
leadership,q1,8,Knowledge\n\
coaching,q2,6,\n\
leadership,q3,10,Judgement\n";

        let domains = RatingsImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(domains.len(), 2);
        assert_eq!(domains[0].domain_id, "leadership");
        assert_eq!(domains[0].questions.len(), 2);
        assert_eq!(domains[0].questions[1].question_id, "q3");
        assert_eq!(domains[1].domain_id, "coaching");
        assert_eq!(domains[1].questions[0].question_type, None);
    }

    #[test]
    fn optional_columns_may_be_missing() {
        let csv = "Domain,Question ID,Rating\nleadership,q1,7.5\n";

        let domains = RatingsImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        let question = &domains[0].questions[0];
        assert_eq!(question.rating, 7.5);
        assert!(question.question_type.is_none());
        assert!(question.type_weight.is_none());
        assert!(domains[0].domain_name.is_none());
    }

    #[test]
    fn trims_cells_and_captures_domain_names() {
        let csv = "Domain,Domain Name,Question ID,Rating,Question Type,Type Weight\n\
 leadership , Leadership ,q1, 9 , Knowledge ,30\n";

        let domains = RatingsImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(domains[0].domain_id, "leadership");
        assert_eq!(domains[0].domain_name.as_deref(), Some("Leadership"));
        let question = &domains[0].questions[0];
        assert_eq!(question.question_type.as_deref(), Some("Knowledge"));
        assert_eq!(question.type_weight, Some(30.0));
    }

    #[test]
    fn rejects_blank_domain() {
        let csv = "Domain,Question ID,Rating\nleadership,q1,8\n,q2,6\n";

        let error = RatingsImporter::from_reader(Cursor::new(csv)).expect_err("blank domain");

        match error {
            RatingsImportError::MissingDomain { row } => assert_eq!(row, 3),
            other => panic!("expected missing domain error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_rating() {
        let csv = "Domain,Question ID,Rating\nleadership,q1,high\n";

        let error = RatingsImporter::from_reader(Cursor::new(csv)).expect_err("bad rating");

        assert!(matches!(error, RatingsImportError::Csv(_)));
    }

    #[test]
    fn rejects_non_finite_rating() {
        let csv = "Domain,Question ID,Rating\nleadership,q1,NaN\n";

        let error = RatingsImporter::from_reader(Cursor::new(csv)).expect_err("nan rating");

        match error {
            RatingsImportError::NonFiniteRating { row } => assert_eq!(row, 2),
            other => panic!("expected non-finite rating error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_infinite_rating_on_later_rows() {
        let csv = "Domain,Question ID,Rating\nleadership,q1,8\nleadership,q2,inf\n";

        let error = RatingsImporter::from_reader(Cursor::new(csv)).expect_err("inf rating");

        assert!(matches!(
            error,
            RatingsImportError::NonFiniteRating { row: 3 }
        ));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = RatingsImporter::from_path("./does-not-exist.csv").expect_err("io error");

        match error {
            RatingsImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
