//! # vigil-core
//!
//! Shared domain types and error types for Vigil.
//!
//! This crate provides the foundational types shared across all Vigil crates:
//! - Crime category and time window enums with their wire tokens
//! - The analytics query filter with validation and partial-update merging
//! - Analytics response records (statistics, trend points)
//! - User identity and credential types
//! - Cross-cutting error types
//! - Transport traits the state stores consume

pub mod enums;
pub mod errors;
pub mod filter;
pub mod identity;
pub mod responses;
pub mod transport;
