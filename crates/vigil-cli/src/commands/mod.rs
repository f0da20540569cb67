pub mod auth;
pub mod crimes;
pub mod schema;
pub mod theme;
