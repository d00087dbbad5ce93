//! Extensions for mapping errors to `ArgsResult` concisely.
//!
//! [`ArgsResultExt::into_args`] replaces repetitive
//! `.map_err(|e| Arc::new(ArgsError::from(e)))` chains for error types that
//! implement `Into<ArgsError>`, such as `serde_json::Error` and
//! `clap::Error`.
//!
//! # Examples
//!
//! ```
//! use schema_args::{ArgsResult, ArgsResultExt};
//!
//! fn serialize() -> ArgsResult<serde_json::Value> {
//!     serde_json::to_value(42).into_args()
//! }
//! assert!(serialize().is_ok());
//! ```

use std::sync::Arc;

use crate::{ArgsError, ArgsResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ArgsError>` into an `ArgsResult<T>`.
pub trait ArgsResultExt<T, E> {
    /// Convert `Result<T, E>` into `ArgsResult<T>` using `Into<ArgsError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ArgsError>`.
    fn into_args(self) -> ArgsResult<T>;
}

impl<T, E> ArgsResultExt<T, E> for Result<T, E>
where
    E: Into<ArgsError>,
{
    fn into_args(self) -> ArgsResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
