//! # vigil-api
//!
//! Typed REST client for the crime platform API.
//!
//! [`ApiClient`] wraps a `reqwest::Client` with the configured base URL and
//! an optional bearer token, and maps transport and status failures onto
//! [`vigil_core::errors::ApiError`]. It implements the
//! [`vigil_core::transport`] traits so the state stores never see reqwest
//! directly.

mod auth;
mod client;
mod crimes;

pub use client::ApiClient;
