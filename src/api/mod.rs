//! API endpoint handlers for the roleta backend.

pub mod random;
