//! Ranking of a filtered projection.
//!
//! Provides [`SortKey`] for the dashboard's sort selector, [`Dir`] for sort
//! direction, and [`sort`] which reorders API groups accordingly. All sorts
//! are stable: groups that compare equal keep their prior relative order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::model::{ApiGroup, TestRecord};

/// Sort selection offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortKey {
    /// Keep the dataset order.
    #[default]
    None,
    /// Alias of [`SortKey::Name`]: reports carry no timestamp to rank on.
    MostRecent,
    /// Slowest API first, each API's own records fastest first.
    Duration,
    /// Highest status pass rate of the API's first record first.
    SuccessRate,
    /// Ascending by API name.
    Name,
}

impl SortKey {
    /// All keys in selector order.
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::MostRecent,
        SortKey::Duration,
        SortKey::SuccessRate,
        SortKey::Name,
    ];

    /// Returns the selector value of this key (`""` for no sorting).
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::None => "",
            SortKey::MostRecent => "Most Recent",
            SortKey::Duration => "Duration",
            SortKey::SuccessRate => "Success Rate",
            SortKey::Name => "Name",
        }
    }

    /// The record field this key ranks on, if it ranks on a metric.
    pub fn required_field(self) -> Option<&'static str> {
        match self {
            SortKey::Duration => Some("duration.avg"),
            SortKey::SuccessRate => Some("status.passRate"),
            SortKey::None | SortKey::MostRecent | SortKey::Name => None,
        }
    }

    /// Reads the metric this key ranks on from `test`.
    pub fn value_of(self, test: &TestRecord) -> Option<f64> {
        match self {
            SortKey::Duration => test.avg_duration(),
            SortKey::SuccessRate => test.pass_rate(),
            SortKey::None | SortKey::MostRecent | SortKey::Name => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::None => f.write_str("Default"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for SortKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "" | "default" | "none" => Ok(SortKey::None),
            "mostrecent" | "recent" => Ok(SortKey::MostRecent),
            "duration" => Ok(SortKey::Duration),
            "successrate" => Ok(SortKey::SuccessRate),
            "name" => Ok(SortKey::Name),
            _ => Err(DashboardError::InvalidSortKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for SortKey {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }
}

/// Compares two optional metric values.
///
/// Present values are ordered by `dir`. Missing values sort last in either
/// direction and compare equal to each other.
pub fn compare_measures(a: Option<f64>, b: Option<f64>, dir: Dir) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => dir.apply(a.partial_cmp(&b).unwrap_or(Ordering::Equal)),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Compares two names the way a user expects them alphabetized.
///
/// Names are compared on an accent-stripped, case-folded key first; equal
/// keys fall back to lowercase-before-uppercase, then to code points, so the
/// result is a total order.
///
/// ```
/// use std::cmp::Ordering;
/// use loadboard::ordering::locale_cmp;
///
/// assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
/// assert_eq!(locale_cmp("Éclair", "eagle"), Ordering::Greater);
/// assert_eq!(locale_cmp("login", "Login"), Ordering::Less);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded_a = deunicode(a).to_lowercase();
    let folded_b = deunicode(b).to_lowercase();
    folded_a
        .cmp(&folded_b)
        .then_with(|| case_ranks(a).cmp(case_ranks(b)))
        .then_with(|| a.cmp(b))
}

fn case_ranks(s: &str) -> impl Iterator<Item = u8> + '_ {
    s.chars().map(|c| u8::from(c.is_uppercase()))
}

/// Orders `groups` by `key`, returning the reordered projection.
pub fn sort(mut groups: Vec<ApiGroup>, key: SortKey) -> Vec<ApiGroup> {
    sort_in_place(&mut groups, key);
    groups
}

/// Orders `groups` by `key` in place.
///
/// Records missing the ranked value are logged and placed after every record
/// that has it; they are never treated as zero.
pub fn sort_in_place(groups: &mut [ApiGroup], key: SortKey) {
    report_malformed(groups, key);

    match key {
        SortKey::None => {}
        SortKey::Name | SortKey::MostRecent => {
            groups.sort_by(|a, b| locale_cmp(&a.name, &b.name));
        }
        SortKey::Duration => {
            for group in groups.iter_mut() {
                group.tests.sort_by(|a, b| {
                    compare_measures(a.avg_duration(), b.avg_duration(), Dir::Asc)
                });
            }
            groups.sort_by(|a, b| {
                compare_measures(lead_value(a, key), lead_value(b, key), Dir::Desc)
            });
        }
        SortKey::SuccessRate => {
            groups.sort_by(|a, b| {
                compare_measures(lead_value(a, key), lead_value(b, key), Dir::Desc)
            });
        }
    }
}

fn lead_value(group: &ApiGroup, key: SortKey) -> Option<f64> {
    group.first_test().and_then(|test| key.value_of(test))
}

fn report_malformed(groups: &[ApiGroup], key: SortKey) {
    for group in groups {
        for err in group.malformed(key) {
            if let DashboardError::MalformedRecord { api, index, field } = &err {
                tracing::warn!(%api, index, field, sort_key = %key, "ranking past malformed record");
            }
        }
    }
}
