//! Dashboard configuration.
//!
//! Configuration is read from YAML or JSON with camelCase keys. Every key is
//! optional:
//!
//! ```yaml
//! pageSize: 5
//! filters:
//!   network: WiFi
//!   status: fail
//!   sortKey: Duration
//! ```

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::filter::FilterState;

/// API groups per page when no size is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(size) => size,
    None => unreachable!(),
};

/// Settings a [`Session`](crate::Session) starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig", rename_all = "camelCase")]
pub struct DashboardConfig {
    pub page_size: NonZeroUsize,
    /// Filter and sort selections applied before the first render.
    pub filters: FilterState,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            page_size: DEFAULT_PAGE_SIZE,
            filters: FilterState::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses a YAML configuration document.
    ///
    /// An empty document yields the defaults.
    ///
    /// ```
    /// use loadboard::{DashboardConfig, SortKey};
    ///
    /// let config = DashboardConfig::from_yaml_str("pageSize: 5\nfilters:\n  sortKey: Name\n")?;
    /// assert_eq!(config.page_size.get(), 5);
    /// assert_eq!(config.filters.sort_key, SortKey::Name);
    /// # Ok::<(), loadboard::DashboardError>(())
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(DashboardConfig::default());
        }
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        raw.try_into()
    }

    /// Parses a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        raw.try_into()
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }
}

/// Wire shape of [`DashboardConfig`] before the page size is validated.
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawConfig {
    page_size: usize,
    filters: FilterState,
}

impl Default for RawConfig {
    fn default() -> Self {
        RawConfig {
            page_size: DEFAULT_PAGE_SIZE.get(),
            filters: FilterState::default(),
        }
    }
}

impl TryFrom<RawConfig> for DashboardConfig {
    type Error = DashboardError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let page_size = NonZeroUsize::new(raw.page_size).ok_or(DashboardError::InvalidPageSize)?;
        Ok(DashboardConfig {
            page_size,
            filters: raw.filters,
        })
    }
}
