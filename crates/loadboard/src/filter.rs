//! Predicate engine for narrowing the dataset.
//!
//! A [`Filter`] is a list of [`Predicate`]s combined with AND: an API group is
//! retained only when every predicate matches it. An empty filter retains
//! everything. Filters are usually built from the dashboard's [`FilterState`],
//! but can also be assembled fluently:
//!
//! ```
//! use loadboard::{ApiGroup, Filter, Outcome, TestRecord};
//!
//! let groups = vec![
//!     ApiGroup::new("Login", vec![TestRecord::new("4G").with_status(Outcome::Pass)]),
//!     ApiGroup::new("Checkout", vec![TestRecord::new("WiFi").with_status(Outcome::Fail)]),
//! ];
//!
//! let filter = Filter::new().search("log").status(Outcome::Pass);
//! let kept = filter.apply(&groups);
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].name, "Login");
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::{ApiGroup, Outcome};
use crate::ordering::SortKey;

/// The dashboard's current filter and sort selections.
///
/// Every field is optional: an empty string (or `None`) places no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    /// Case-insensitive substring of the API name.
    pub api: String,
    /// Case-sensitive substring of a record's network.
    pub network: String,
    /// Required status outcome of at least one record.
    #[serde(
        serialize_with = "serialize_status",
        deserialize_with = "deserialize_status"
    )]
    pub status: Option<Outcome>,
    pub sort_key: SortKey,
    /// Case-insensitive substring of the API name or any record's network.
    pub search: String,
}

impl FilterState {
    pub fn new() -> Self {
        FilterState::default()
    }

    pub fn with_api(mut self, api: impl Into<String>) -> Self {
        self.api = api.into();
        self
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = network.into();
        self
    }

    pub fn with_status(mut self, status: Option<Outcome>) -> Self {
        self.status = status;
        self
    }

    pub fn with_sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Returns `true` if no predicate is active (sorting aside).
    pub fn is_unconstrained(&self) -> bool {
        self.api.is_empty()
            && self.network.is_empty()
            && self.status.is_none()
            && self.search.is_empty()
    }
}

fn serialize_status<S: Serializer>(status: &Option<Outcome>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(status.map_or("", Outcome::as_str))
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<Option<Outcome>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => label.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// A single selection criterion over an API group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Name or any record's network contains the text, ignoring case.
    Search(String),
    /// Name contains the text, ignoring case.
    ApiName(String),
    /// Some record's network contains the text, case preserved.
    Network(String),
    /// Some record's status check has this outcome.
    Status(Outcome),
}

impl Predicate {
    /// Evaluates this predicate against a group.
    pub fn matches(&self, group: &ApiGroup) -> bool {
        match self {
            Predicate::Search(text) => {
                let needle = text.to_lowercase();
                group.name.to_lowercase().contains(&needle)
                    || group
                        .tests
                        .iter()
                        .any(|test| test.network.to_lowercase().contains(&needle))
            }
            Predicate::ApiName(text) => group.name.to_lowercase().contains(&text.to_lowercase()),
            // Unlike the other text predicates this one is case-sensitive;
            // "wifi" does not select "WiFi".
            Predicate::Network(text) => group.tests.iter().any(|test| test.network.contains(text)),
            Predicate::Status(outcome) => {
                group
                    .tests
                    .iter()
                    .enumerate()
                    .any(|(index, test)| match test.status() {
                        Some(result) => result == *outcome,
                        None => {
                            tracing::warn!(
                                api = %group.name,
                                index,
                                field = "status.result",
                                "skipping malformed record in status filter"
                            );
                            false
                        }
                    })
            }
        }
    }
}

/// An AND-combination of predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Creates an empty filter, which matches every group.
    pub fn new() -> Self {
        Filter::default()
    }

    /// Builds the filter described by a dashboard state.
    pub fn from_state(state: &FilterState) -> Self {
        let filter = Filter::new()
            .search(&state.search)
            .api(&state.api)
            .network(&state.network);
        match state.status {
            Some(outcome) => filter.status(outcome),
            None => filter,
        }
    }

    /// Adds a predicate.
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds a search predicate; empty text adds nothing.
    pub fn search(self, text: &str) -> Self {
        self.and_text(text, Predicate::Search)
    }

    /// Adds an API-name predicate; empty text adds nothing.
    pub fn api(self, text: &str) -> Self {
        self.and_text(text, Predicate::ApiName)
    }

    /// Adds a network predicate; empty text adds nothing.
    pub fn network(self, text: &str) -> Self {
        self.and_text(text, Predicate::Network)
    }

    /// Adds a status predicate.
    pub fn status(self, outcome: Outcome) -> Self {
        self.and(Predicate::Status(outcome))
    }

    fn and_text(self, text: &str, make: fn(String) -> Predicate) -> Self {
        if text.is_empty() {
            self
        } else {
            self.and(make(text.to_string()))
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Returns `true` if this filter has no predicates (matches everything).
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Tests if a single group satisfies every predicate.
    pub fn matches(&self, group: &ApiGroup) -> bool {
        self.predicates.iter().all(|p| p.matches(group))
    }

    /// Returns copies of the matching groups in dataset order.
    pub fn apply(&self, groups: &[ApiGroup]) -> Vec<ApiGroup> {
        self.select(groups).into_iter().cloned().collect()
    }

    /// Returns references to the matching groups in dataset order.
    pub fn select<'a>(&self, groups: &'a [ApiGroup]) -> Vec<&'a ApiGroup> {
        groups.iter().filter(|g| self.matches(g)).collect()
    }

    /// Counts the matching groups.
    pub fn count(&self, groups: &[ApiGroup]) -> usize {
        groups.iter().filter(|g| self.matches(g)).count()
    }

    /// Returns `true` if any group matches.
    pub fn any(&self, groups: &[ApiGroup]) -> bool {
        groups.iter().any(|g| self.matches(g))
    }
}

/// Retains the groups matching every active predicate of `state`.
///
/// Sorting is not applied here; see [`crate::ordering::sort`].
pub fn filter(dataset: &[ApiGroup], state: &FilterState) -> Vec<ApiGroup> {
    Filter::from_state(state).apply(dataset)
}

/// Distinct API names for the API selector, in first-seen order.
pub fn api_names(groups: &[ApiGroup]) -> Vec<&str> {
    let mut seen = HashSet::new();
    groups
        .iter()
        .map(|g| g.name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Distinct networks for the network selector, in first-seen order.
///
/// A non-empty `speed` keeps only networks containing it, ignoring case.
pub fn networks<'a>(groups: &'a [ApiGroup], speed: &str) -> Vec<&'a str> {
    let speed = speed.to_lowercase();
    let mut seen = HashSet::new();
    groups
        .iter()
        .flat_map(|g| g.tests.iter())
        .map(|test| test.network.as_str())
        .filter(|network| speed.is_empty() || network.to_lowercase().contains(&speed))
        .filter(|network| seen.insert(*network))
        .collect()
}
