use anyhow::Context;
use serde::Serialize;

use vigil_prefs::ThemeMode;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::ThemeCommands;
use crate::output::output;

#[derive(Serialize)]
struct ThemeResponse {
    mode: ThemeMode,
    changed: bool,
}

/// Handle `vgl theme <subcommand>`.
pub fn handle(
    action: &ThemeCommands,
    flags: &GlobalFlags,
    config: &vigil_config::VigilConfig,
) -> anyhow::Result<()> {
    let mut store = bootstrap::preference_store(config)?;

    let response = match action {
        ThemeCommands::Get => ThemeResponse {
            mode: store.mode(),
            changed: false,
        },
        ThemeCommands::Set { mode } => {
            store
                .set(*mode)
                .context("failed to persist the display mode")?;
            ThemeResponse {
                mode: *mode,
                changed: true,
            }
        }
        ThemeCommands::Toggle => {
            let mode = store
                .toggle()
                .context("failed to persist the display mode")?;
            ThemeResponse {
                mode,
                changed: true,
            }
        }
    };

    output(&response, flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use vigil_config::{GeneralConfig, VigilConfig};
    use vigil_prefs::ThemeMode;

    use crate::bootstrap;

    fn config_with_theme_path(path: &std::path::Path) -> VigilConfig {
        VigilConfig {
            general: GeneralConfig {
                theme_path: path.to_string_lossy().into_owned(),
                ..GeneralConfig::default()
            },
            ..VigilConfig::default()
        }
    }

    #[test]
    fn configured_theme_path_routes_the_store_to_that_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("theme");
        std::fs::write(&path, "dark").expect("seed file");

        let store = bootstrap::preference_store(&config_with_theme_path(&path))
            .expect("store should open");
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn set_through_the_configured_path_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("theme");
        let config = config_with_theme_path(&path);

        let mut store = bootstrap::preference_store(&config).expect("store should open");
        store.set(ThemeMode::Dark).expect("set should persist");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "dark");
    }
}
