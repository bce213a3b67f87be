//! Application services for the roleta backend.

pub mod tmdb;

pub use tmdb::{TitleKind, TmdbClient};
