use clap::Subcommand;

use vigil_prefs::ThemeMode;

/// Display mode commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ThemeCommands {
    /// Print the active mode.
    Get,
    /// Persist an explicit mode.
    Set {
        /// light or dark
        mode: ThemeMode,
    },
    /// Flip between light and dark.
    Toggle,
}
