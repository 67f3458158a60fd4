//! Row and write-record types for the review store.

pub mod review;
