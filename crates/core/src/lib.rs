//! GameHub core domain logic.
//!
//! Pure functions over review records: normalization of loosely-typed
//! documents, slug/excerpt derivation, filtering and stable sorting,
//! rating tiers, view-model presentation, and dashboard statistics.
//! No I/O happens in this crate.

pub mod error;
pub mod present;
pub mod query;
pub mod rating;
pub mod review;
pub mod stats;
pub mod text;
