//! Cross-worker metric aggregation.
//!
//! Workers append per-episode scores under string keys; the central
//! decision loop peeks the reduced value and deletes a key once a
//! promotion has consumed it. Each (stage, scenario) pair owns an
//! exclusive key, so delete-after-consume is safe.
//!
//! # Data Integrity
//!
//! Non-finite values (NaN, Inf) are dropped on write so a single
//! corrupted episode score cannot poison an aggregate that gates
//! promotion.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Reduction applied to a metric series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduce {
    /// Running mean over all logged values.
    Mean,
    /// Maximum of all logged values.
    Max,
}

#[derive(Debug, Clone)]
struct MetricSeries {
    reduce: Reduce,
    ema_coeff: Option<f32>,
    value: f32,
    count: usize,
}

impl MetricSeries {
    fn new(reduce: Reduce, ema_coeff: Option<f32>, first: f32) -> Self {
        Self {
            reduce,
            ema_coeff,
            value: first,
            count: 1,
        }
    }

    fn update(&mut self, value: f32) {
        self.count += 1;
        match self.reduce {
            Reduce::Max => self.value = self.value.max(value),
            Reduce::Mean => match self.ema_coeff {
                Some(coeff) => self.value = coeff * value + (1.0 - coeff) * self.value,
                // Welford's incremental mean, stable over long runs.
                None => self.value += (value - self.value) / self.count as f32,
            },
        }
    }
}

/// Thread-safe metric store shared by all workers and the driver.
#[derive(Debug, Default)]
pub struct MetricsAggregator {
    series: Mutex<HashMap<String, MetricSeries>>,
}

impl MetricsAggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self {
            series: Mutex::new(HashMap::new()),
        }
    }

    /// Append a value under `key` with the given reduction.
    ///
    /// The reduction mode is fixed by the first write to a key;
    /// subsequent writes reuse it. Non-finite values are dropped.
    pub fn log_value(&self, key: &str, value: f32, reduce: Reduce) {
        self.log(key, value, reduce, None);
    }

    /// Append a value reduced by an exponential moving average with
    /// the given coefficient (weight of the newest value).
    pub fn log_value_ema(&self, key: &str, value: f32, ema_coeff: f32) {
        self.log(key, value, Reduce::Mean, Some(ema_coeff));
    }

    fn log(&self, key: &str, value: f32, reduce: Reduce, ema_coeff: Option<f32>) {
        if !value.is_finite() {
            return;
        }
        let mut series = self.series.lock();
        match series.get_mut(key) {
            Some(existing) => existing.update(value),
            None => {
                series.insert(key.to_string(), MetricSeries::new(reduce, ema_coeff, value));
            }
        }
    }

    /// Reduced value at `key`, or `default` if the key is absent.
    pub fn peek(&self, key: &str, default: f32) -> f32 {
        self.series
            .lock()
            .get(key)
            .map(|series| series.value)
            .unwrap_or(default)
    }

    /// Number of values logged under `key`.
    pub fn count(&self, key: &str) -> usize {
        self.series
            .lock()
            .get(key)
            .map(|series| series.count)
            .unwrap_or(0)
    }

    /// Remove `key`. Returns whether it existed.
    pub fn delete(&self, key: &str) -> bool {
        self.series.lock().remove(key).is_some()
    }

    /// All live keys, in unspecified order.
    pub fn keys(&self) -> Vec<String> {
        self.series.lock().keys().cloned().collect()
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.series.lock().len()
    }

    /// Whether no keys are live.
    pub fn is_empty(&self) -> bool {
        self.series.lock().is_empty()
    }

    /// Drop every key.
    pub fn clear(&self) {
        self.series.lock().clear();
    }
}

/// Shared metrics aggregator.
pub type SharedMetricsAggregator = Arc<MetricsAggregator>;

/// Create a new shared metrics aggregator.
pub fn metrics_aggregator() -> SharedMetricsAggregator {
    Arc::new(MetricsAggregator::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_reduction() {
        let agg = MetricsAggregator::new();
        agg.log_value("score", 1.0, Reduce::Mean);
        agg.log_value("score", 0.0, Reduce::Mean);
        agg.log_value("score", 0.5, Reduce::Mean);
        assert!((agg.peek("score", -1.0) - 0.5).abs() < 1e-6);
        assert_eq!(agg.count("score"), 3);
    }

    #[test]
    fn test_max_reduction() {
        let agg = MetricsAggregator::new();
        agg.log_value("task", 3.0, Reduce::Max);
        agg.log_value("task", 7.0, Reduce::Max);
        agg.log_value("task", 5.0, Reduce::Max);
        assert_eq!(agg.peek("task", 0.0), 7.0);
    }

    #[test]
    fn test_ema_reduction() {
        let agg = MetricsAggregator::new();
        agg.log_value_ema("rate", 1.0, 0.2);
        agg.log_value_ema("rate", 0.0, 0.2);
        // 0.2 * 0.0 + 0.8 * 1.0
        assert!((agg.peek("rate", -1.0) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_peek_default_for_missing_key() {
        let agg = MetricsAggregator::new();
        assert_eq!(agg.peek("absent", f32::NEG_INFINITY), f32::NEG_INFINITY);
    }

    #[test]
    fn test_delete() {
        let agg = MetricsAggregator::new();
        agg.log_value("gone", 1.0, Reduce::Mean);
        assert!(agg.delete("gone"));
        assert!(!agg.delete("gone"));
        assert_eq!(agg.peek("gone", -1.0), -1.0);
    }

    #[test]
    fn test_non_finite_values_dropped() {
        let agg = MetricsAggregator::new();
        agg.log_value("score", 1.0, Reduce::Mean);
        agg.log_value("score", f32::NAN, Reduce::Mean);
        agg.log_value("score", f32::INFINITY, Reduce::Mean);
        assert_eq!(agg.peek("score", 0.0), 1.0);
        assert_eq!(agg.count("score"), 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let agg = metrics_aggregator();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let agg = Arc::clone(&agg);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        agg.log_value("shared", 2.0, Reduce::Mean);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(agg.count("shared"), 400);
        assert!((agg.peek("shared", 0.0) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_keys_and_clear() {
        let agg = MetricsAggregator::new();
        agg.log_value("a", 1.0, Reduce::Mean);
        agg.log_value("b", 2.0, Reduce::Max);
        let mut keys = agg.keys();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);

        agg.clear();
        assert!(agg.is_empty());
    }
}
