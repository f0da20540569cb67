use clap::{Args, Subcommand};

use crate::cli::filter_args::FilterArgs;
use crate::cli::subcommands::{AuthCommands, ThemeCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Authentication and account management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Aggregate crime statistics for the current filter.
    Stats(FilterArgs),
    /// Monthly crime trend series.
    Trends(FilterArgs),
    /// Statistics and trends in one all-or-nothing fetch.
    Dashboard(FilterArgs),
    /// Display mode preference.
    Theme {
        #[command(subcommand)]
        action: ThemeCommands,
    },
    /// Dump JSON schema for a public wire type.
    Schema(SchemaArgs),
}

/// Arguments for `vgl schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name (omit to list the available types).
    pub type_name: Option<String>,
}
