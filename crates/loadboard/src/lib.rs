//! Loadboard - Query engine for API load-test result dashboards.
//!
//! Loadboard takes a load-test report (one entry per API, each with one
//! record per network profile) and derives everything a dashboard displays:
//!
//! - Filtering by free-text search, API name, network and status outcome
//! - Ranking by duration, success rate or name
//! - Summary cards: API count, test count, pass percentage, mean duration
//! - Fixed-size pages with clamped navigation
//!
//! Rendering and fetching are left to the host; every output is plain data
//! that serializes with `serde`.
//!
//! # Quick Start
//!
//! ```rust
//! use loadboard::{DashboardConfig, Dataset, Outcome, Session, SortKey};
//!
//! let report = r#"[
//!   {"name": "Login", "tests": [
//!     {"network": "4G", "metrics": {
//!       "duration": {"avg": "120.50ms"},
//!       "status": {"result": "pass", "passRate": "100.00%"}}}
//!   ]},
//!   {"name": "Checkout", "tests": [
//!     {"network": "WiFi", "metrics": {
//!       "duration": {"avg": "340.00ms"},
//!       "status": {"result": "fail", "passRate": "40.00%"}}}
//!   ]}
//! ]"#;
//!
//! let dataset = Dataset::from_json_str(report)?;
//! let mut session = Session::new(dataset, DashboardConfig::default());
//!
//! let summary = session.summary();
//! assert_eq!(summary.pass_percentage, "50.0%");
//! assert_eq!(summary.avg_response_time.to_string(), "230.25ms");
//!
//! session.set_sort_key(SortKey::Duration);
//! assert_eq!(session.page().items[0].name, "Checkout");
//!
//! session.set_status(Some(Outcome::Pass));
//! assert_eq!(session.projection().len(), 1);
//! # Ok::<(), loadboard::DashboardError>(())
//! ```
//!
//! # Projection Semantics
//!
//! ```text
//! projection = sort(filter(dataset, state), state.sort_key)
//! page       = projection[(n - 1) * size .. n * size]
//! ```
//!
//! Filter predicates are AND-combined; an empty field places no constraint.
//! Search and API name ignore case, the network filter does not. A status
//! filter keeps an API if any of its records has that outcome.
//!
//! | Sort key | Order |
//! |----------|-------|
//! | (none) | Dataset order |
//! | `Name`, `Most Recent` | API name, locale-style ascending |
//! | `Duration` | Records fastest first, then APIs slowest first |
//! | `Success Rate` | APIs by first record's pass rate, highest first |
//!
//! Values that are missing or unparseable never count as zero: they sort last
//! and are left out of the mean duration.

mod config;
mod error;
mod filter;
pub mod measure;
mod model;
pub mod ordering;
mod pager;
mod session;
mod summary;

// Re-export public API
pub use config::{DashboardConfig, DEFAULT_PAGE_SIZE};
pub use error::{DashboardError, Result};
pub use filter::{api_names, filter, networks, Filter, FilterState, Predicate};
pub use measure::Measurement;
pub use model::{
    ApiGroup, CheckMetrics, Dataset, DurationMetrics, Metrics, Outcome, TestRecord,
};
pub use ordering::{sort, sort_in_place, Dir, SortKey};
pub use pager::{change_page, paginate, total_pages, Page};
pub use session::{DashboardView, Session};
pub use summary::{pass_percentage, summarize, AvgResponseTime, Summary};
