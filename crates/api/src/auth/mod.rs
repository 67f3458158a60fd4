//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation, validation, and the admin
//!   email allowlist.

pub mod jwt;
