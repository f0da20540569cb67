//! # vigil-data
//!
//! The filtered data store.
//!
//! [`CrimeDataStore`] owns an analytics [`QueryFilter`](vigil_core::filter::QueryFilter)
//! and the two result sets produced by sending it to the platform
//! (aggregate statistics, monthly trends). Filter edits never trigger a
//! fetch on their own; callers batch edits and then invoke one of the fetch
//! operations explicitly. The combined fetch is all-or-nothing so a
//! dashboard never mixes statistics and trends from different snapshots.

mod error;
mod state;
mod store;

pub use error::DataError;
pub use state::DataState;
pub use store::CrimeDataStore;
