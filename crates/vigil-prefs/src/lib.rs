//! # vigil-prefs
//!
//! The display mode preference store.
//!
//! One user-visible binary setting ([`ThemeMode`]), durable across restarts.
//! [`PreferenceStore`] persists the mode to a single small file and follows
//! one rule on startup: a persisted explicit choice always wins over the
//! ambient environment default.
//!
//! The storage path and ambient mode are injected at construction, so tests
//! instantiate isolated stores instead of sharing a process-wide singleton.

mod error;
mod mode;
mod store;

pub use error::PrefsError;
pub use mode::ThemeMode;
pub use store::{PreferenceStore, default_theme_path, detect_ambient};
