//! Review catalog: the query orchestrator.
//!
//! Composes a remote [`source::ReviewSource`] with a local
//! [`fallback::FallbackStore`], normalizes everything at the boundary, and
//! runs the filter/sort pipeline against the most recently fetched
//! collection. Interactive re-querying is debounced and strictly
//! last-trigger-wins: every trigger takes a monotonically increasing
//! sequence number and any execution whose trigger has been superseded is
//! discarded.

mod catalog;
pub mod fallback;
pub mod source;

pub use catalog::{CatalogConfig, QueryOutcome, ReviewCatalog};
