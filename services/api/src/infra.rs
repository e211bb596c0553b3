use chrono::{DateTime, Utc};
use jobhub::config::{AppConfig, BoardConfig};
use jobhub::error::AppError;
use jobhub::formatting::parse_instant;
use jobhub::postings::{PostingBoard, PostingCsvImporter};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds a board from an explicit export, falling back to the configured one.
/// Returns `None` when neither is available.
pub(crate) fn board_from_config(
    config: &BoardConfig,
    csv: Option<PathBuf>,
) -> Result<Option<PostingBoard>, AppError> {
    let Some(path) = csv.or_else(|| config.postings_csv.clone()) else {
        return Ok(None);
    };

    let postings = PostingCsvImporter::from_path(&path)?;
    info!(path = %path.display(), count = postings.len(), "postings board seeded");
    Ok(Some(PostingBoard::with_postings(config.page_size, postings)))
}

pub(crate) fn load_board(csv: Option<PathBuf>) -> Result<Option<PostingBoard>, AppError> {
    let config = AppConfig::load()?;
    board_from_config(&config.board, csv)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(raw).ok_or_else(|| format!("failed to parse '{raw}' as a date or timestamp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_config(postings_csv: Option<PathBuf>) -> BoardConfig {
        BoardConfig {
            page_size: 5,
            postings_csv,
        }
    }

    #[test]
    fn no_export_means_no_board() {
        let board = board_from_config(&board_config(None), None).expect("no export is fine");
        assert!(board.is_none());
    }

    #[test]
    fn missing_export_is_an_import_error() {
        let config = board_config(Some(PathBuf::from("/nonexistent/jobhub/postings.csv")));
        let error = board_from_config(&config, None).expect_err("missing file fails");
        assert!(matches!(error, AppError::Import(_)));
    }

    #[test]
    fn parses_timestamps_for_the_cli() {
        let instant = parse_timestamp("2024-01-15T08:30:00Z").expect("rfc3339 parses");
        assert_eq!(instant.to_rfc3339(), "2024-01-15T08:30:00+00:00");
        assert!(parse_timestamp("next tuesday").is_err());
    }
}
