//! Loosely-typed stat bags from provider payloads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Metric name to value mapping for one player or one game.
///
/// Lookups never fail: a metric that is absent, null or non-numeric reads as
/// `0.0`, so a half-populated payload degrades to zero features instead of
/// aborting a whole recommendation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatBag(BTreeMap<String, f64>);

impl StatBag {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Value for `metric`, or `0.0` when missing.
    pub fn get(&self, metric: &str) -> f64 {
        self.0.get(metric).copied().filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    pub fn contains(&self, metric: &str) -> bool {
        self.0.contains_key(metric)
    }

    pub fn insert(&mut self, metric: impl Into<String>, value: f64) {
        self.0.insert(metric.into(), value);
    }

    pub fn with(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.insert(metric, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for StatBag {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Parse a JSON scalar that may be a number or a numeric string ("0.45").
pub fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

impl<'de> Deserialize<'de> for StatBag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<BTreeMap<String, Value>> = Deserialize::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(k, v)| lenient_f64(&v).map(|f| (k, f)))
            .collect())
    }
}
