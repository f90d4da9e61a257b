//! The load-test result data model.
//!
//! A report is a list of [`ApiGroup`]s, one per API under test, each holding
//! one [`TestRecord`] per network profile the API was exercised on. Parsing is
//! lenient at the record level: an absent or oddly typed metric becomes a
//! missing value instead of failing the whole document.

use std::fmt;
use std::io::Read;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{DashboardError, Result};
use crate::measure::Measurement;
use crate::ordering::SortKey;

/// Outcome of a check across the runs of one test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    /// Inconsistent pass/fail across runs.
    Flaky,
    /// Any result label the dashboard does not know.
    #[serde(other)]
    Unknown,
}

impl Outcome {
    /// Returns the report label of this outcome.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
            Outcome::Flaky => "flaky",
            Outcome::Unknown => "unknown",
        }
    }

    /// Reads a result label as written in a report.
    ///
    /// Only the exact lowercase labels are known; anything else, including
    /// `"Pass"` or `"passed"`, is [`Outcome::Unknown`].
    pub fn from_report_label(label: &str) -> Self {
        match label {
            "pass" => Outcome::Pass,
            "fail" => Outcome::Fail,
            "flaky" => Outcome::Flaky,
            _ => Outcome::Unknown,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = DashboardError;

    /// Parses a status filter label. Only the three known outcomes are accepted.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" | "passed" => Ok(Outcome::Pass),
            "fail" | "failed" => Ok(Outcome::Fail),
            "flaky" => Ok(Outcome::Flaky),
            _ => Err(DashboardError::InvalidStatus(s.to_string())),
        }
    }
}

/// Request duration statistics of one test.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationMetrics {
    pub avg: Measurement,
    pub min: Measurement,
    pub med: Measurement,
    pub max: Measurement,
    pub p90: Measurement,
    pub p95: Measurement,
}

/// Pass/fail tallies of one check (HTTP status or response-time threshold).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckMetrics {
    #[serde(deserialize_with = "lenient_outcome")]
    pub result: Option<Outcome>,
    pub pass_rate: Measurement,
    #[serde(deserialize_with = "lenient_count")]
    pub pass_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub fail_count: Option<u64>,
}

/// All metrics recorded for one (API, network) pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metrics {
    pub duration: DurationMetrics,
    pub status: CheckMetrics,
    pub response_time: CheckMetrics,
}

/// One (API, network) measurement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestRecord {
    pub network: String,
    pub metrics: Metrics,
}

impl TestRecord {
    /// Creates a record for `network` with no metrics.
    pub fn new(network: impl Into<String>) -> Self {
        TestRecord {
            network: network.into(),
            metrics: Metrics::default(),
        }
    }

    /// Sets the status check outcome.
    pub fn with_status(mut self, result: Outcome) -> Self {
        self.metrics.status.result = Some(result);
        self
    }

    /// Sets the status check pass rate.
    pub fn with_pass_rate(mut self, rate: impl Into<Measurement>) -> Self {
        self.metrics.status.pass_rate = rate.into();
        self
    }

    /// Sets the average request duration.
    pub fn with_avg_duration(mut self, avg: impl Into<Measurement>) -> Self {
        self.metrics.duration.avg = avg.into();
        self
    }

    /// Outcome of the status check, if reported.
    pub fn status(&self) -> Option<Outcome> {
        self.metrics.status.result
    }

    /// Returns `true` if the status check passed.
    pub fn is_passing(&self) -> bool {
        self.status() == Some(Outcome::Pass)
    }

    /// Parsed average duration.
    pub fn avg_duration(&self) -> Option<f64> {
        self.metrics.duration.avg.value()
    }

    /// Parsed status check pass rate.
    pub fn pass_rate(&self) -> Option<f64> {
        self.metrics.status.pass_rate.value()
    }
}

/// One API under test and its per-network records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiGroup {
    pub name: String,
    #[serde(default)]
    pub tests: Vec<TestRecord>,
}

impl ApiGroup {
    pub fn new(name: impl Into<String>, tests: Vec<TestRecord>) -> Self {
        ApiGroup {
            name: name.into(),
            tests,
        }
    }

    /// The record that stands for the group when ranking.
    pub fn first_test(&self) -> Option<&TestRecord> {
        self.tests.first()
    }

    /// Lists the records that lack the value `key` ranks on.
    ///
    /// Duration ranking reads every record; success-rate ranking reads only
    /// the first. Keys that rank on the name never report anything.
    pub fn malformed(&self, key: SortKey) -> Vec<DashboardError> {
        let Some(field) = key.required_field() else {
            return Vec::new();
        };
        let checked: &[TestRecord] = match key {
            SortKey::SuccessRate => self.tests.get(..1).unwrap_or(&[]),
            _ => &self.tests,
        };
        checked
            .iter()
            .enumerate()
            .filter(|(_, test)| key.value_of(test).is_none())
            .map(|(index, _)| DashboardError::MalformedRecord {
                api: self.name.clone(),
                index,
                field,
            })
            .collect()
    }
}

/// An immutable, shareable result collection.
///
/// Cloning a dataset is cheap; every clone views the same groups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    groups: Arc<[ApiGroup]>,
}

impl Dataset {
    pub fn new(groups: Vec<ApiGroup>) -> Self {
        Dataset {
            groups: groups.into(),
        }
    }

    /// Parses a result document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let groups: Vec<ApiGroup> = serde_json::from_str(json)?;
        Ok(Self::loaded(groups))
    }

    /// Reads a result document from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let groups: Vec<ApiGroup> = serde_json::from_reader(reader)?;
        Ok(Self::loaded(groups))
    }

    /// Converts an already parsed document, e.g. a fetch response body.
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let groups: Vec<ApiGroup> = serde_json::from_value(value)?;
        Ok(Self::loaded(groups))
    }

    fn loaded(groups: Vec<ApiGroup>) -> Self {
        let dataset = Dataset::new(groups);
        tracing::debug!(
            groups = dataset.len(),
            tests = dataset.test_count(),
            "loaded result dataset"
        );
        dataset
    }

    pub fn groups(&self) -> &[ApiGroup] {
        &self.groups
    }

    /// Number of API groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of test records across all groups.
    pub fn test_count(&self) -> usize {
        self.groups.iter().map(|g| g.tests.len()).sum()
    }
}

impl AsRef<[ApiGroup]> for Dataset {
    fn as_ref(&self) -> &[ApiGroup] {
        &self.groups
    }
}

impl From<Vec<ApiGroup>> for Dataset {
    fn from(groups: Vec<ApiGroup>) -> Self {
        Dataset::new(groups)
    }
}

fn lenient_outcome<'de, D>(deserializer: D) -> std::result::Result<Option<Outcome>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match raw {
        Some(JsonValue::String(label)) => Some(Outcome::from_report_label(&label)),
        _ => None,
    })
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match raw {
        Some(JsonValue::Number(n)) => n.as_u64(),
        Some(JsonValue::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
