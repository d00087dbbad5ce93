//! Shared helper for working with `figment::Jail` in tests.
//!
//! A jail gives each test a private working directory, so relative paths
//! such as `--config override.json` resolve to files the test created.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it returns an
/// error. Failures are converted into `anyhow::Error` values so callers can
/// use the `?` operator without extra boilerplate.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
///
/// # Examples
///
/// ```
/// use schema_args_test_helpers::with_jail;
///
/// let contents = with_jail(|jail| {
///     jail.create_file("app.json", r#"{"port": 80}"#)?;
///     let text = std::fs::read_to_string("app.json").map_err(|e| e.to_string())?;
///     Ok(text)
/// })?;
/// assert!(contents.contains("80"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}
