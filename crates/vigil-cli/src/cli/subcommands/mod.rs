pub mod auth;
pub mod theme;

pub use auth::AuthCommands;
pub use theme::ThemeCommands;
