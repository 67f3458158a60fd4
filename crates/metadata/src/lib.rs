//! Game-metadata lookup client.
//!
//! Thin wrapper over a RAWG-compatible HTTP API, used to auto-fill the
//! admin review form. Both calls are best-effort single attempts; the
//! admin UI degrades gracefully when the service is unreachable.

pub mod client;
pub mod mapping;

pub use client::{GameDetail, GameMetadataClient, GameSummary, MetadataError};
pub use mapping::{autofill_draft, ReviewDraft};
