//! Configuration: TOML file plus environment overrides.
//!
//! The schema lives in `config::schema`, loading and path resolution in
//! `config::load`.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
