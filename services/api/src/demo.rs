use crate::infra::read_json_file;
use capability_scoring::assessment::{
    AssessmentReport, AssessmentScorer, AssessmentSubmission, DomainResponses,
    ParsedQuestionTypes, RatingsImporter, ScoredQuestion,
};
use capability_scoring::config::AppConfig;
use capability_scoring::error::AppError;
use chrono::NaiveDate;
use clap::Args;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Assessment submission JSON file
    #[arg(
        long,
        conflicts_with = "ratings_csv",
        required_unless_present = "ratings_csv"
    )]
    pub(crate) input: Option<PathBuf>,
    /// CSV ratings export with Domain, Question ID and Rating columns
    #[arg(long)]
    pub(crate) ratings_csv: Option<PathBuf>,
    /// Question-type config JSON overriding the submission and configured default
    #[arg(long)]
    pub(crate) question_types: Option<PathBuf>,
    /// Assessment identifier (defaults to the CSV file name)
    #[arg(long)]
    pub(crate) assessment_id: Option<String>,
    /// Completion date of the assessment (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) completed_on: Option<NaiveDate>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct WeightsValidateArgs {
    /// Question-type config JSON file
    #[arg(long)]
    pub(crate) question_types: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let scorer = AssessmentScorer::new(config.scoring.default_question_types()?);

    let submission = build_submission(&args)?;
    let report = scorer.score(&submission);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }

    Ok(())
}

/// Loads the submission named by the `score` flags and applies the overrides.
pub(crate) fn build_submission(args: &ScoreArgs) -> Result<AssessmentSubmission, AppError> {
    let mut submission = match (&args.input, &args.ratings_csv) {
        (Some(path), _) => {
            serde_json::from_value::<AssessmentSubmission>(read_json_file(path)?)?
        }
        (None, Some(path)) => AssessmentSubmission {
            assessment_id: default_assessment_id(path),
            completed_on: None,
            question_types: None,
            domains: RatingsImporter::from_path(path)?,
        },
        (None, None) => {
            return Err(AppError::Input(
                "either --input or --ratings-csv is required".to_string(),
            ))
        }
    };

    if let Some(path) = &args.question_types {
        submission.question_types = Some(read_json_file(path)?);
    }
    if let Some(id) = &args.assessment_id {
        submission.assessment_id = id.clone();
    }
    if args.completed_on.is_some() {
        submission.completed_on = args.completed_on;
    }

    Ok(submission)
}

pub(crate) fn run_weights_validate(args: WeightsValidateArgs) -> Result<(), AppError> {
    let raw = read_json_file(&args.question_types)?;
    let parsed = ParsedQuestionTypes::from_raw(&raw);

    let Some(definitions) = &parsed.definitions else {
        return Err(AppError::Input(format!(
            "{} contains no usable question types",
            args.question_types.display()
        )));
    };

    println!("Question types ({})", definitions.len());
    for definition in definitions {
        println!("- {}: {:.2}%", definition.name, definition.weight);
    }
    if parsed.dropped_entries > 0 {
        println!("Ignored entries: {}", parsed.dropped_entries);
    }
    if let Some(validation) = parsed.validation {
        let verdict = if validation.valid {
            "ok"
        } else {
            "does not total 100"
        };
        println!("Total weight: {:.2} ({verdict})", validation.total);
    }

    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Capability scoring demo");
    let report = AssessmentScorer::default().score(&sample_submission());
    render_report(&report);
    Ok(())
}

fn default_assessment_id(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("assessment")
        .to_string()
}

pub(crate) fn sample_submission() -> AssessmentSubmission {
    AssessmentSubmission {
        assessment_id: "demo-leadership-360".to_string(),
        completed_on: NaiveDate::from_ymd_opt(2025, 10, 14),
        question_types: Some(json!([
            { "name": "Knowledge", "weight": 30 },
            { "name": "Judgement", "weight": 45 },
            { "name": "Practice", "weight": 25 },
            { "name": "", "weight": 10 }
        ])),
        domains: vec![
            DomainResponses {
                domain_id: "leadership".to_string(),
                domain_name: Some("Leadership".to_string()),
                questions: vec![
                    ScoredQuestion::typed("lead-01", 8.0, "Knowledge"),
                    ScoredQuestion::typed("lead-02", 6.0, "Judgement"),
                    ScoredQuestion::typed("lead-03", 7.0, "Practice"),
                ],
            },
            DomainResponses {
                domain_id: "communication".to_string(),
                domain_name: Some("Communication".to_string()),
                questions: vec![
                    ScoredQuestion::typed("comm-01", 9.0, "Knowledge"),
                    ScoredQuestion::untyped("comm-02", 5.0),
                ],
            },
            DomainResponses {
                domain_id: "coaching".to_string(),
                domain_name: Some("Coaching".to_string()),
                questions: vec![
                    ScoredQuestion::typed("coach-01", 10.0, "Judgement"),
                    ScoredQuestion::typed("coach-02", 4.0, "Mentoring"),
                ],
            },
        ],
    }
}

pub(crate) fn render_report(report: &AssessmentReport) {
    match report.completed_on {
        Some(date) => println!("Assessment {} (completed {date})", report.assessment_id),
        None => println!("Assessment {}", report.assessment_id),
    }

    let weighting = &report.weighting;
    if weighting.enabled {
        let total_note = weighting
            .validation
            .map(|validation| format!(", weights total {:.2}", validation.total))
            .unwrap_or_default();
        println!(
            "Type weighting: {} type(s){}",
            weighting.configured_types, total_note
        );
    } else {
        println!("Type weighting: not configured");
    }
    println!(
        "Overall: {:.2} across {} question(s)",
        report.overall.simple_average, report.overall.question_count
    );

    println!("\nDomains");
    for domain in &report.domains {
        let score = &domain.score;
        println!(
            "- {}: simple {:.2} | weighted {} | {} question(s)",
            domain.label(),
            score.simple_average,
            format_optional(score.weighted_average),
            score.question_count
        );
        for subtotal in &score.type_subtotals {
            println!(
                "    - {} ({:.2}%): {:.2} over {} question(s)",
                subtotal.type_name, subtotal.type_weight, subtotal.average, subtotal.question_count
            );
        }
    }

    if !report.type_scores.is_empty() {
        println!("\nType scores across domains");
        for type_score in &report.type_scores {
            if type_score.has_data() {
                println!(
                    "- {} ({:.2}%): {:.2} over {} question(s)",
                    type_score.type_name,
                    type_score.type_weight,
                    type_score.average,
                    type_score.question_count
                );
            } else {
                println!(
                    "- {} ({:.2}%): no data",
                    type_score.type_name, type_score.type_weight
                );
            }
        }
    }

    if report.warnings.is_empty() {
        println!("\nWarnings: none");
    } else {
        println!("\nWarnings");
        for warning in &report.warnings {
            println!("- {}", warning);
        }
    }
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "n/a".to_string(),
    }
}
