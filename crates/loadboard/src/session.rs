//! A dashboard session over one loaded dataset.
//!
//! [`Session`] owns the current [`FilterState`], the projection it selects
//! (filtered, then ranked) and the current page. Every filter or sort change
//! replaces the state as a whole, recomputes the projection and returns to the
//! first page, so callers never observe a half-applied update.
//!
//! ```
//! use loadboard::{ApiGroup, DashboardConfig, Dataset, Outcome, Session, TestRecord};
//!
//! let dataset = Dataset::new(vec![
//!     ApiGroup::new("Login", vec![TestRecord::new("4G").with_status(Outcome::Pass)]),
//!     ApiGroup::new("Checkout", vec![TestRecord::new("4G").with_status(Outcome::Fail)]),
//!     ApiGroup::new("Search", vec![TestRecord::new("WiFi").with_status(Outcome::Pass)]),
//! ]);
//!
//! let mut session = Session::new(dataset, DashboardConfig::default());
//! assert_eq!(session.page().total_pages, 2);
//! assert!(session.change_page(1));
//! assert!(!session.change_page(1));
//!
//! session.set_status(Some(Outcome::Pass));
//! assert_eq!(session.current_page(), 1);
//! assert_eq!(session.summary().api_count, 2);
//! ```

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::filter::{self, FilterState};
use crate::model::{ApiGroup, Dataset, Outcome, TestRecord};
use crate::ordering::{self, SortKey};
use crate::pager::{self, Page};
use crate::summary::{summarize, Summary};

/// Everything a renderer needs for one frame of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    pub summary: Summary,
    pub page: Page<'a, ApiGroup>,
    pub filters: &'a FilterState,
}

#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    state: FilterState,
    projection: Vec<ApiGroup>,
    page: usize,
    page_size: NonZeroUsize,
}

impl Session {
    /// Starts a session on page 1 with the configured filters applied.
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        let mut session = Session {
            dataset,
            state: FilterState::default(),
            projection: Vec::new(),
            page: 1,
            page_size: config.page_size,
        };
        session.apply(config.filters);
        session
    }

    /// Replaces the filter state and returns to page 1.
    pub fn apply(&mut self, state: FilterState) {
        let filtered = filter::filter(self.dataset.groups(), &state);
        self.projection = ordering::sort(filtered, state.sort_key);
        self.state = state;
        self.page = 1;
        tracing::debug!(
            groups = self.dataset.len(),
            retained = self.projection.len(),
            sort_key = %self.state.sort_key,
            "recomputed projection"
        );
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.apply(self.state.clone().with_search(search));
    }

    pub fn set_api(&mut self, api: impl Into<String>) {
        self.apply(self.state.clone().with_api(api));
    }

    pub fn set_network(&mut self, network: impl Into<String>) {
        self.apply(self.state.clone().with_network(network));
    }

    pub fn set_status(&mut self, status: Option<Outcome>) {
        self.apply(self.state.clone().with_status(status));
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.apply(self.state.clone().with_sort_key(key));
    }

    /// Swaps in a freshly loaded dataset, keeping the current selections.
    pub fn reload(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.apply(self.state.clone());
    }

    /// Moves `offset` pages. Returns `false`, leaving the page unchanged, if
    /// the target page does not exist.
    pub fn change_page(&mut self, offset: isize) -> bool {
        let next = pager::change_page(self.page, offset, self.total_pages());
        let moved = next != self.page;
        self.page = next;
        moved
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        pager::total_pages(self.projection.len(), self.page_size)
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// The current page of the projection.
    pub fn page(&self) -> Page<'_, ApiGroup> {
        pager::paginate(&self.projection, self.page_size, self.page)
    }

    /// Summary of the whole projection, not just the current page.
    pub fn summary(&self) -> Summary {
        summarize(&self.projection)
    }

    pub fn view(&self) -> DashboardView<'_> {
        DashboardView {
            summary: self.summary(),
            page: self.page(),
            filters: &self.state,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.state
    }

    /// The filtered and ranked groups.
    pub fn projection(&self) -> &[ApiGroup] {
        &self.projection
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Looks up record `index` of the first projected group named `api_name`.
    ///
    /// Indices refer to the group's records as currently ranked.
    pub fn test_details(&self, api_name: &str, index: usize) -> Option<&TestRecord> {
        self.projection
            .iter()
            .find(|g| g.name == api_name)
            .and_then(|g| g.tests.get(index))
    }

    /// API names for the API selector, drawn from the full dataset.
    pub fn api_options(&self) -> Vec<&str> {
        filter::api_names(self.dataset.groups())
    }

    /// Networks for the network selector, narrowed by a speed class.
    pub fn network_options(&self, speed: &str) -> Vec<&str> {
        filter::networks(self.dataset.groups(), speed)
    }
}
