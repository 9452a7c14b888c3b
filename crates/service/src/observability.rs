use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder,
};
use tracing::warn;

use crate::errors::ServiceError;
use crate::resource::Resource;
use crate::store::{Record, SheetStore};

// Prometheus metrics (default registry)
pub static STORE_CALLS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "property_api_store_calls_total",
        "Sheet store calls by resource and operation",
        &["resource", "op"]
    )
    .expect("register store_calls_total")
});

pub static STORE_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "property_api_store_errors_total",
        "Failed sheet store calls by resource, operation and error kind",
        &["resource", "op", "kind"]
    )
    .expect("register store_errors_total")
});

pub static STORE_CALL_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "property_api_store_call_duration_seconds",
        "Sheet store call duration in seconds",
        &["resource", "op"],
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register store_call_duration")
});

/// Wraps a store and records call counts, failures and latency.
pub struct InstrumentedStore {
    inner: Arc<dyn SheetStore>,
}

impl InstrumentedStore {
    pub fn new(inner: Arc<dyn SheetStore>) -> Self {
        Self { inner }
    }
}

fn observe<T>(resource: Resource, op: &str, started: Instant, result: &Result<T, ServiceError>) {
    let labels = [resource.as_str(), op];
    STORE_CALLS_TOTAL.with_label_values(&labels).inc();
    STORE_CALL_DURATION
        .with_label_values(&labels)
        .observe(started.elapsed().as_secs_f64());
    if let Err(e) = result {
        STORE_ERRORS_TOTAL
            .with_label_values(&[resource.as_str(), op, e.kind()])
            .inc();
        warn!(%resource, op, error = %e, "sheet store call failed");
    }
}

#[async_trait]
impl SheetStore for InstrumentedStore {
    async fn list(&self, resource: Resource) -> Result<Vec<Record>, ServiceError> {
        let started = Instant::now();
        let result = self.inner.list(resource).await;
        observe(resource, "list", started, &result);
        result
    }

    async fn append(&self, resource: Resource, record: Record) -> Result<Record, ServiceError> {
        let started = Instant::now();
        let result = self.inner.append(resource, record).await;
        observe(resource, "append", started, &result);
        result
    }
}

/// Prometheus text exposition of the default registry.
pub fn encode_metrics() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("metrics encode error: {e}"))?;
    String::from_utf8(buffer).map_err(|e| format!("metrics encode error: {e}"))
}
