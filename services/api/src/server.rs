use crate::cli::ServeArgs;
use crate::infra::{board_from_config, AppState};
use crate::routes::with_board_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use jobhub::config::AppConfig;
use jobhub::error::AppError;
use jobhub::postings::PostingBoard;
use jobhub::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let board = match board_from_config(&config.board, None)? {
        Some(board) => board,
        None => {
            warn!("JOBHUB_POSTINGS_CSV not set; serving an empty postings board");
            PostingBoard::new(config.board.page_size)
        }
    };
    info!(
        postings = board.len(),
        page_size = board.page_size(),
        "postings board loaded"
    );

    let app = with_board_routes(Arc::new(board))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job board service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
