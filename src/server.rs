use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use anyhow::Context;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use log::{debug, error, info};

use crate::collector::runner::Orchestrator;
use crate::exposition;
use crate::stats::STATS;

/// Scrape endpoint router.
///
/// - `GET /metrics` runs a fresh collection pass per request
/// - `GET /` points at `/metrics`
pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/metrics", get(scrape))
        .with_state(orchestrator)
}

/// Binds `0.0.0.0:<port>` and serves until the process exits.
pub async fn serve(port: u16, orchestrator: Arc<Orchestrator>) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind scrape port {port}"))?;

    info!("Exporter listening on http://{addr}/metrics");
    axum::serve(listener, router(orchestrator)).await?;
    Ok(())
}

async fn index() -> &'static str {
    "chia-exporter\n\nMetrics are served at /metrics\n"
}

/// The pass runs on its own task: it completes even if the
/// client goes away, and a panic inside it becomes a 500 instead
/// of tearing down the connection handler.
async fn scrape(State(orchestrator): State<Arc<Orchestrator>>) -> Response {
    let pass = tokio::spawn(async move { orchestrator.run().await });

    match pass.await {
        Ok(snapshot) => {
            if snapshot.is_empty() {
                debug!("Serving empty snapshot");
            }
            STATS.scrapes_served.fetch_add(1, Ordering::Relaxed);
            (
                [(header::CONTENT_TYPE, exposition::CONTENT_TYPE)],
                exposition::encode(&snapshot),
            )
                .into_response()
        }
        Err(e) => {
            error!("Collection pass aborted: {e}");
            STATS.scrape_errors.fetch_add(1, Ordering::Relaxed);
            (StatusCode::INTERNAL_SERVER_ERROR, "collection failed\n").into_response()
        }
    }
}
