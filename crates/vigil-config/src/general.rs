//! General application configuration.

use serde::{Deserialize, Serialize};

/// Whether successful logins persist credentials by default.
const fn default_remember() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Persist credentials after login/register unless overridden per call.
    #[serde(default = "default_remember")]
    pub remember: bool,

    /// Override for the preference file path (empty = `~/.vigil/theme`).
    #[serde(default)]
    pub theme_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            remember: default_remember(),
            theme_path: String::new(),
        }
    }
}
