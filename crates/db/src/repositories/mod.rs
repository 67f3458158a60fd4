//! Repository layer.
//!
//! Repositories are zero-sized structs providing async CRUD methods that
//! accept `&PgPool` as the first argument.

pub mod review_repo;

pub use review_repo::ReviewRepo;
