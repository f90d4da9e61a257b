//! Summary statistics over a projection.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::ApiGroup;

/// Mean request duration shown on the summary card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AvgResponseTime {
    /// Mean in milliseconds, rounded to two decimals.
    Millis(f64),
    /// No record carried a usable duration.
    #[default]
    NotAvailable,
}

impl AvgResponseTime {
    pub fn value(self) -> Option<f64> {
        match self {
            AvgResponseTime::Millis(ms) => Some(ms),
            AvgResponseTime::NotAvailable => None,
        }
    }
}

impl fmt::Display for AvgResponseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvgResponseTime::Millis(ms) => write!(f, "{ms:.2}ms"),
            AvgResponseTime::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for AvgResponseTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Figures for the dashboard's summary cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub api_count: usize,
    pub total_tests: usize,
    pub passed_tests: usize,
    /// Share of passing records, e.g. `"50.0%"`; `"0%"` with no records.
    pub pass_percentage: String,
    pub avg_response_time: AvgResponseTime,
}

impl Default for Summary {
    fn default() -> Self {
        summarize(&[])
    }
}

/// Computes the summary of `groups`.
///
/// The average duration skips records whose `duration.avg` is missing,
/// unparseable, or the `"0s"` placeholder. A genuine zero reading is counted.
///
/// ```
/// use loadboard::{summarize, ApiGroup, Outcome, TestRecord};
///
/// let groups = vec![ApiGroup::new("Login", vec![
///     TestRecord::new("4G").with_status(Outcome::Pass).with_avg_duration("100ms"),
///     TestRecord::new("3G").with_status(Outcome::Fail).with_avg_duration("0s"),
/// ])];
///
/// let summary = summarize(&groups);
/// assert_eq!(summary.pass_percentage, "50.0%");
/// assert_eq!(summary.avg_response_time.to_string(), "100.00ms");
/// ```
pub fn summarize(groups: &[ApiGroup]) -> Summary {
    let mut total_tests = 0;
    let mut passed_tests = 0;
    let mut duration_sum = 0.0;
    let mut duration_count = 0usize;

    for test in groups.iter().flat_map(|g| g.tests.iter()) {
        total_tests += 1;
        if test.is_passing() {
            passed_tests += 1;
        }

        let avg = &test.metrics.duration.avg;
        if avg.is_zero_sentinel() {
            continue;
        }
        if let Some(ms) = avg.value() {
            duration_sum += ms;
            duration_count += 1;
        }
    }

    let avg_response_time = if duration_count > 0 {
        let mean = duration_sum / duration_count as f64;
        AvgResponseTime::Millis((mean * 100.0).round() / 100.0)
    } else {
        AvgResponseTime::NotAvailable
    };

    Summary {
        api_count: groups.len(),
        total_tests,
        passed_tests,
        pass_percentage: pass_percentage(passed_tests, total_tests),
        avg_response_time,
    }
}

/// Formats `passed / total` as a percentage with one decimal.
///
/// Halves round up, so 1 of 16 reads `"6.3%"`.
pub fn pass_percentage(passed: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    let pct = passed as f64 / total as f64 * 100.0;
    format!("{:.1}%", (pct * 10.0).round() / 10.0)
}
