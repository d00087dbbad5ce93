//! Test helpers shared across the schema-args workspace.
//!
//! - [`with_jail`] runs a closure inside a `figment::Jail` and returns its
//!   output as an `anyhow::Result`.
//! - [`env`] provides RAII guards for environment variables, including
//!   `HOME` for `~` expansion tests.
//! - [`fixtures`] writes configuration files into temporary directories.

pub mod env;
mod figment;
pub mod fixtures;

pub use figment::with_jail;
