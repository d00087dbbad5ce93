//! Error types produced while analysing schemas and building configuration.

mod constructors;
mod conversions;
mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::ArgsError;

#[cfg(test)]
mod tests;
