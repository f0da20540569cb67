//! Crime categories and analytics time windows.
//!
//! Wire tokens follow the platform API: categories serialize as
//! `SCREAMING_SNAKE_CASE` identifiers (`THEFT`, `DRUG`, ...) and time
//! windows as `camelCase` tokens (`last30Days`, `custom`, ...).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// CrimeCategory
// ---------------------------------------------------------------------------

/// Category an incident is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrimeCategory {
    Theft,
    Assault,
    Burglary,
    Robbery,
    Vandalism,
    Drug,
    Fraud,
    Other,
}

impl CrimeCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 8] = [
        Self::Theft,
        Self::Assault,
        Self::Burglary,
        Self::Robbery,
        Self::Vandalism,
        Self::Drug,
        Self::Fraud,
        Self::Other,
    ];

    /// Return the identifier used in query strings and API payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Theft => "THEFT",
            Self::Assault => "ASSAULT",
            Self::Burglary => "BURGLARY",
            Self::Robbery => "ROBBERY",
            Self::Vandalism => "VANDALISM",
            Self::Drug => "DRUG",
            Self::Fraud => "FRAUD",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for CrimeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrimeCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::Validation(format!("unknown crime category: {s}")))
    }
}

// ---------------------------------------------------------------------------
// TimeWindow
// ---------------------------------------------------------------------------

/// Time window an analytics query covers.
///
/// `Custom` requires explicit start and end dates on the filter; the other
/// windows are resolved relative to "now" by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum TimeWindow {
    Last24Hours,
    Last7Days,
    #[default]
    Last30Days,
    LastYear,
    Custom,
}

impl TimeWindow {
    /// Every window, in display order.
    pub const ALL: [Self; 5] = [
        Self::Last24Hours,
        Self::Last7Days,
        Self::Last30Days,
        Self::LastYear,
        Self::Custom,
    ];

    /// Return the token used in query strings and API payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Last24Hours => "last24Hours",
            Self::Last7Days => "last7Days",
            Self::Last30Days => "last30Days",
            Self::LastYear => "lastYear",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|window| window.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::Validation(format!("unknown time window: {s}")))
    }
}
