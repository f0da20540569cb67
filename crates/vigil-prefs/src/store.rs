//! The preference store: one durable setting, one file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PrefsError;
use crate::mode::ThemeMode;

const THEME_FILE_NAME: &str = "theme";

/// Durable display mode preference.
///
/// Mutations write the storage file before the in-memory field, so a crash
/// between the two leaves storage ahead of memory by at most one mutation,
/// never behind it.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    mode: ThemeMode,
}

impl PreferenceStore {
    /// Open the store backed by `path`.
    ///
    /// A persisted value is used verbatim; only when the file is absent (or
    /// unreadable) does the injected `ambient` mode apply. This order is
    /// load-bearing: an explicit earlier choice must survive a change in the
    /// host environment's ambient preference.
    #[must_use]
    pub fn open(path: PathBuf, ambient: ThemeMode) -> Self {
        let mode = Self::read_persisted(&path).unwrap_or(ambient);
        Self { path, mode }
    }

    /// The current mode.
    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip between light and dark.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Storage`] when the preference file cannot be
    /// written; the in-memory mode is left unchanged in that case.
    pub fn toggle(&mut self) -> Result<ThemeMode, PrefsError> {
        let next = self.mode.toggled();
        self.set(next)?;
        Ok(next)
    }

    /// Set an explicit mode.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Storage`] when the preference file cannot be
    /// written; the in-memory mode is left unchanged in that case.
    pub fn set(&mut self, mode: ThemeMode) -> Result<(), PrefsError> {
        self.persist(mode)?;
        self.mode = mode;
        Ok(())
    }

    /// String-facing defensive variant of [`Self::set`]: anything that is not
    /// `light` or `dark` is silently ignored, per the original contract.
    pub fn set_from_name(&mut self, name: &str) -> Result<(), PrefsError> {
        match name.parse::<ThemeMode>() {
            Ok(mode) => self.set(mode),
            Err(_) => {
                tracing::debug!(name, "ignoring unknown theme mode");
                Ok(())
            }
        }
    }

    fn persist(&self, mode: ThemeMode) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| PrefsError::Storage(format!("mkdir {}: {e}", parent.display())))?;
        }
        fs::write(&self.path, mode.as_str())
            .map_err(|e| PrefsError::Storage(format!("write {}: {e}", self.path.display())))
    }

    fn read_persisted(path: &Path) -> Option<ThemeMode> {
        let content = fs::read_to_string(path).ok()?;
        match content.trim().parse() {
            Ok(mode) => Some(mode),
            Err(_) => {
                tracing::warn!(
                    path = %path.display(),
                    "preference file holds an unknown mode; falling back to ambient"
                );
                None
            }
        }
    }
}

/// Default storage location: `~/.vigil/theme`.
///
/// # Errors
///
/// Returns [`PrefsError::Storage`] when the home directory cannot be
/// resolved.
pub fn default_theme_path() -> Result<PathBuf, PrefsError> {
    dirs::home_dir()
        .map(|home| home.join(".vigil").join(THEME_FILE_NAME))
        .ok_or_else(|| PrefsError::Storage("home directory not found".into()))
}

/// Probe the host environment for its ambient display preference.
///
/// Terminal hosts advertise their palette through `COLORFGBG`
/// (`<fg>;<bg>`, e.g. `15;0` for white-on-black). A dark background maps to
/// [`ThemeMode::Dark`]; anything unparseable defaults to light.
#[must_use]
pub fn detect_ambient() -> ThemeMode {
    match std::env::var("COLORFGBG") {
        Ok(value) => ambient_from_colorfgbg(&value),
        Err(_) => ThemeMode::Light,
    }
}

fn ambient_from_colorfgbg(value: &str) -> ThemeMode {
    let Some(background) = value
        .rsplit(';')
        .next()
        .and_then(|token| token.trim().parse::<u8>().ok())
    else {
        return ThemeMode::Light;
    };
    // ANSI palette entries 0-6 and 8 are dark colors.
    if background <= 6 || background == 8 {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{PreferenceStore, ambient_from_colorfgbg};
    use crate::mode::ThemeMode;

    fn theme_path(dir: &tempfile::TempDir) -> std::path::PathBuf {
        dir.path().join("prefs").join("theme")
    }

    #[test]
    fn no_persisted_value_initializes_from_ambient() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let store = PreferenceStore::open(theme_path(&dir), ThemeMode::Dark);
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn persisted_value_wins_over_ambient() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let path = theme_path(&dir);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(&path, "light\n").expect("seed");

        let store = PreferenceStore::open(path, ThemeMode::Dark);
        assert_eq!(store.mode(), ThemeMode::Light);
    }

    #[test]
    fn garbage_persisted_value_falls_back_to_ambient() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let path = theme_path(&dir);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(&path, "aubergine").expect("seed");

        let store = PreferenceStore::open(path, ThemeMode::Dark);
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn toggle_twice_returns_to_the_original_mode() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let mut store = PreferenceStore::open(theme_path(&dir), ThemeMode::Light);

        assert_eq!(store.toggle().expect("toggle"), ThemeMode::Dark);
        assert_eq!(store.toggle().expect("toggle"), ThemeMode::Light);
        assert_eq!(store.mode(), ThemeMode::Light);
    }

    #[test]
    fn mutations_survive_a_reopen() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let path = theme_path(&dir);

        let mut store = PreferenceStore::open(path.clone(), ThemeMode::Light);
        store.set(ThemeMode::Dark).expect("set");
        drop(store);

        let reopened = PreferenceStore::open(path, ThemeMode::Light);
        assert_eq!(reopened.mode(), ThemeMode::Dark);
    }

    #[test]
    fn set_persists_before_updating_memory() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let path = theme_path(&dir);

        let mut store = PreferenceStore::open(path.clone(), ThemeMode::Light);
        store.set(ThemeMode::Dark).expect("set");

        let on_disk = std::fs::read_to_string(&path).expect("read");
        assert_eq!(on_disk, "dark");
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn set_from_name_ignores_unknown_modes() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let mut store = PreferenceStore::open(theme_path(&dir), ThemeMode::Light);

        store.set_from_name("dark").expect("set");
        assert_eq!(store.mode(), ThemeMode::Dark);

        store.set_from_name("aubergine").expect("no-op");
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn colorfgbg_heuristic_maps_dark_backgrounds() {
        assert_eq!(ambient_from_colorfgbg("15;0"), ThemeMode::Dark);
        assert_eq!(ambient_from_colorfgbg("0;15"), ThemeMode::Light);
        assert_eq!(ambient_from_colorfgbg("12;8"), ThemeMode::Dark);
        assert_eq!(ambient_from_colorfgbg("garbage"), ThemeMode::Light);
        assert_eq!(ambient_from_colorfgbg(""), ThemeMode::Light);
    }
}
