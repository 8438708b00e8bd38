use ml_client::ErrorKind;
use opentelemetry::{
    global,
    metrics::{Counter, Histogram, MeterProvider},
    KeyValue,
};
use prometheus::Registry;
use std::collections::HashSet;

pub struct Metrics {
    request_counter: Counter<u64>,
    prediction_duration: Histogram<u64>,
    prediction_failures: Counter<u64>,
    pub registry: Registry,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();
        let exporter = opentelemetry_prometheus::exporter()
            .with_registry(registry.clone())
            .build()?;

        let provider = opentelemetry_sdk::metrics::SdkMeterProvider::builder()
            .with_reader(exporter)
            .build();

        let meter = provider.meter("ml_portal");
        global::set_meter_provider(provider);

        let request_counter = meter
            .u64_counter("requests_total")
            .with_description("Total number of page requests")
            .build();

        // Up to the production request timeout.
        let boundaries = generate_boundaries((50, 250, 1000, 5000, 30000));

        let prediction_duration = meter
            .u64_histogram("prediction_duration_ms")
            .with_boundaries(boundaries)
            .with_description("Round-trip duration of prediction requests in milliseconds")
            .build();

        let prediction_failures = meter
            .u64_counter("prediction_failures_total")
            .with_description("Failed prediction requests by error kind")
            .build();

        Ok(Metrics {
            request_counter,
            prediction_duration,
            prediction_failures,
            registry,
        })
    }

    pub fn record_request(&self, route: &str) {
        let attributes = vec![KeyValue::new("route", route.to_string())];
        self.request_counter.add(1, &attributes);
    }

    pub fn record_prediction_duration(&self, duration_ms: u64, app_id: &str) {
        let attributes = vec![KeyValue::new("app_id", app_id.to_string())];
        self.prediction_duration.record(duration_ms, &attributes);
    }

    pub fn record_prediction_failure(&self, kind: ErrorKind, app_id: &str) {
        let attributes = vec![
            KeyValue::new("kind", kind.as_str()),
            KeyValue::new("app_id", app_id.to_string()),
        ];
        self.prediction_failures.add(1, &attributes);
    }
}

fn generate_boundaries(parts: (i32, i32, i32, i32, i32)) -> Vec<f64> {
    let first_step: usize = 50;
    let middle_step: usize = 250;
    let end_step: usize = 1000;
    let tail_step: usize = 5000;
    let first_part = (parts.0..=parts.1).step_by(first_step);
    let middle_part = (parts.1..=parts.2).step_by(middle_step);
    let end_part = (parts.2..=parts.3).step_by(end_step);
    let tail_part = (parts.3..=parts.4).step_by(tail_step);

    let mut seen = HashSet::new();
    first_part
        .chain(middle_part)
        .chain(end_part)
        .chain(tail_part)
        .filter(|&x| seen.insert(x))
        .map(|x| x as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_boundaries() {
        let parts = (50, 250, 1000, 5000, 30000);
        let get = generate_boundaries(parts);
        let expected = vec![
            50.0, 100.0, 150.0, 200.0, 250.0, 500.0, 750.0, 1000.0, 2000.0, 3000.0, 4000.0,
            5000.0, 10000.0, 15000.0, 20000.0, 25000.0, 30000.0,
        ];

        assert_eq!(get, expected);
    }

    #[test]
    fn test_metrics_are_exported() -> anyhow::Result<()> {
        let metrics = Metrics::new()?;
        metrics.record_request("/ml-select");
        metrics.record_prediction_duration(120, "1");
        metrics.record_prediction_failure(ErrorKind::Server, "1");

        let names: Vec<String> = metrics
            .registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();

        assert!(names.iter().any(|name| name.starts_with("requests_total")));
        assert!(names.iter().any(|name| name.starts_with("prediction_duration_ms")));

        Ok(())
    }
}
