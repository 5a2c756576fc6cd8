//! Tracing setup and the request log.
//!
//! Three sinks: a compact console layer honoring `RUST_LOG`, a daily-rotated
//! error file, and a daily-rotated JSON file for log shippers. The request
//! middleware tags every request with a generated id and logs one completion
//! event whose level follows the response status.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing_appender::rolling;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry, util::SubscriberInitExt,
};
use uuid::Uuid;

const LOG_DIR: &str = "storage/logs";

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    // Prefer the matched route template over the raw path so ids don't
    // explode the cardinality of the log.
    let path = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis();
    if status >= 500 {
        tracing::error!(%request_id, %method, path, status, elapsed_ms, "request failed");
    } else if status >= 400 {
        tracing::warn!(%request_id, %method, path, status, elapsed_ms, "request rejected");
    } else {
        tracing::info!(%request_id, %method, path, status, elapsed_ms, "request completed");
    }

    response
}

pub fn init_tracing() {
    std::fs::create_dir_all(LOG_DIR).expect("Failed to create logs directory");

    let console = fmt::layer()
        .compact()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,tower_http=warn,hyper=info",
                env!("CARGO_CRATE_NAME")
            ))
        }));

    let error_file = fmt::layer()
        .with_writer(rolling::daily(LOG_DIR, "dealdesk.log"))
        .with_ansi(false)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(EnvFilter::new("error"));

    let json_file = fmt::layer()
        .json()
        .with_writer(rolling::daily(LOG_DIR, "dealdesk.json"))
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    registry().with(console).with(error_file).with(json_file).init();

    tracing::info!("tracing initialized, file sinks under {}", LOG_DIR);
}
