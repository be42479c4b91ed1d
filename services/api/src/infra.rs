use capability_scoring::error::AppError;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn read_json_file(path: &Path) -> Result<serde_json::Value, AppError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date(" 2025-10-14 "),
            Ok(NaiveDate::from_ymd_opt(2025, 10, 14).expect("valid date"))
        );
        assert!(parse_date("14/10/2025").is_err());
    }

    #[test]
    fn read_json_file_reports_missing_files() {
        let error = read_json_file(Path::new("./missing-question-types.json"))
            .expect_err("missing file");
        assert!(matches!(error, AppError::Io(_)));
    }
}
