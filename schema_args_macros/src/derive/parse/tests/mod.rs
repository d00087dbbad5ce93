//! Unit tests for derive input parsing.

mod attrs;
mod serde;
mod type_utils;
