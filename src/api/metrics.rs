use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter exported on `/metrics`
pub struct Counter {
    name: &'static str,
    help: &'static str,
    value: AtomicU64,
}

impl Counter {
    const fn new(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            value: AtomicU64::new(0),
        }
    }

    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    fn exposition(&self) -> String {
        format!(
            "# HELP {name} {help}\n# TYPE {name} counter\n{name} {value}\n",
            name = self.name,
            help = self.help,
            value = self.get()
        )
    }
}

pub static REQUESTS: Counter = Counter::new("http_requests_total", "Requests received by the gateway");
pub static ERRORS: Counter = Counter::new("http_errors_total", "Responses with a 4xx or 5xx status");

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
}

pub fn snapshot() -> MetricsResponse {
    MetricsResponse {
        http_requests_total: REQUESTS.get(),
        http_errors_total: ERRORS.get(),
    }
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Request counters in Prometheus text format", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let body = [&REQUESTS, &ERRORS]
        .iter()
        .map(|counter| counter.exposition())
        .collect::<Vec<_>>()
        .join("\n");

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body)
}
