//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation acquires a global re-entrant mutex only for the duration of
//! the update and returns an RAII guard that restores the
//! previous state when dropped, removing the variable if it was previously
//! absent. Stacked guards for the same key restore in LIFO order.
//!
//! Tests that rely on a variable staying put for their whole body (for
//! example `HOME` during `~` expansion) should also be marked
//! `#[serial_test::serial]`.
//!
//! # Examples
//!
//! ```
//! use schema_args_test_helpers::env;
//!
//! let _g = env::set_var("KEY", "VALUE");
//! // `KEY` is set to `VALUE` for the duration of the guard.
//! ```

use parking_lot::ReentrantMutex;
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Wrapper around `std::env::set_var`.
///
/// # Safety
///
/// Callers must ensure the global environment is synchronised.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Wrapper around `std::env::remove_var`.
///
/// # Safety
///
/// Callers must ensure the global environment is synchronised.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

fn mutate_env_var<K, F>(name: K, mutator: F) -> EnvVarGuard
where
    K: Into<String>,
    F: FnOnce(&str),
{
    let key = name.into();
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        if let Some(val) = self.original.take() {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env_set_var(&self.key, &val) };
        } else {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env_remove_var(&self.key) };
        }
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use schema_args_test_helpers::env;
/// let _g = env::set_var("SCHEMA_ARGS_DOC", "bar");
/// assert!(matches!(std::env::var("SCHEMA_ARGS_DOC"), Ok(ref value) if value == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate_env_var` holds `ENV_MUTEX` while the mutator runs.
    mutate_env_var(key, |k| unsafe { env_set_var(k, value.as_ref()) })
}

/// Points `HOME` at `dir` so `~` expands beneath it.
///
/// # Examples
/// ```
/// use schema_args_test_helpers::env;
///
/// let dir = tempfile::tempdir()?;
/// let _home = env::set_home(dir.path());
/// assert_eq!(std::env::var_os("HOME").as_deref(), Some(dir.path().as_os_str()));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn set_home(dir: &Path) -> EnvVarGuard {
    set_var("HOME", dir)
}

#[cfg(test)]
mod tests;
