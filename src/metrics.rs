//! Prometheus metrics: an HTTP middleware for request counts and latency,
//! a `/metrics` endpoint, and counters for the business events worth
//! alerting on. Everything is a no-op when `METRICS_ENABLED=false`.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

static ENABLED: OnceLock<bool> = OnceLock::new();

pub fn metrics_enabled() -> bool {
    *ENABLED.get_or_init(|| match std::env::var("METRICS_ENABLED") {
        Ok(v) => v != "0" && !v.eq_ignore_ascii_case("false"),
        Err(_) => true,
    })
}

/// Install the Prometheus recorder and start its upkeep task. `None` when
/// metrics are disabled.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !metrics_enabled() {
        return None;
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .expect("Failed to set buckets")
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    let upkeep = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep.run_upkeep();
        }
    });

    Some(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !metrics_enabled() {
        return next.run(req).await;
    }

    let started = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };

    gauge!("http_requests_active").increment(1.0);
    let response = next.run(req).await;
    gauge!("http_requests_active").decrement(1.0);

    let status = response.status().as_u16().to_string();
    counter!(
        "http_requests_total",
        "method" => method.clone(), "path" => path.clone(), "status" => status
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(started.elapsed().as_secs_f64());

    response
}

pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_login_success(role: &str) {
    if metrics_enabled() {
        counter!("user_logins_total", "role" => role.to_string(), "status" => "success")
            .increment(1);
    }
}

pub fn track_login_failure(reason: &str) {
    if metrics_enabled() {
        counter!(
            "user_logins_total",
            "role" => "unknown", "status" => "failure", "reason" => reason.to_string()
        )
        .increment(1);
    }
}

pub fn track_member_invited(role: &str) {
    if metrics_enabled() {
        counter!("members_invited_total", "role" => role.to_string()).increment(1);
    }
}

pub fn track_company_registered() {
    if metrics_enabled() {
        counter!("companies_registered_total").increment(1);
    }
}

pub fn track_lead_captured(source: &str) {
    if metrics_enabled() {
        counter!("leads_captured_total", "source" => source.to_string()).increment(1);
    }
}
