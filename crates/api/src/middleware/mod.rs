//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AdminUser`] -- Extracts and authorizes an allowlisted admin
//!   from a JWT Bearer token.

pub mod auth;
