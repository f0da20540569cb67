//! The display mode enum and its wire token.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display mode. Persists as the lowercase token (`light` / `dark`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// Return the token used in storage and command output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse failure carries no detail; callers either report the raw input or
/// silently ignore it (the defensive `set_from_name` contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseThemeModeError;

impl fmt::Display for ParseThemeModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected 'light' or 'dark'")
    }
}

impl std::error::Error for ParseThemeModeError {}

impl FromStr for ThemeMode {
    type Err = ParseThemeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("light") {
            Ok(Self::Light)
        } else if s.eq_ignore_ascii_case("dark") {
            Ok(Self::Dark)
        } else {
            Err(ParseThemeModeError)
        }
    }
}
