//! Post-build hook support.
//!
//! [`PostBuildHook`] lets a record adjust or validate itself once every
//! layer has been merged and the value constructed. [`BuildContext`] tells
//! the hook which sources contributed.

use camino::Utf8PathBuf;

use crate::ArgsResult;

/// Hook invoked on the constructed record before it is returned.
///
/// Enable it with `#[schema_args(post_build_hook)]`; the derived
/// [`CliSchema::post_build`](crate::CliSchema::post_build) then delegates
/// here.
///
/// # Examples
///
/// ```rust
/// use schema_args::{ArgsError, ArgsResult, BuildContext, CliSchema, PostBuildHook};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize, CliSchema)]
/// #[schema_args(post_build_hook)]
/// struct Range {
///     low: i64,
///     high: i64,
/// }
///
/// impl PostBuildHook for Range {
///     fn post_build(&mut self, _ctx: &BuildContext) -> ArgsResult<()> {
///         if self.low > self.high {
///             return Err(ArgsError::validation("low", "must not exceed high"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait PostBuildHook: Sized {
    /// Adjust or validate the constructed record.
    ///
    /// # Errors
    ///
    /// Returns an error when the record is invalid; it is propagated to the
    /// caller of `build_config`.
    fn post_build(&mut self, ctx: &BuildContext) -> ArgsResult<()>;
}

/// Metadata about one `build_config` run.
///
/// # Examples
///
/// ```rust
/// use camino::Utf8PathBuf;
/// use schema_args::BuildContext;
///
/// let mut ctx = BuildContext::new();
/// ctx.with_file(Utf8PathBuf::from("/etc/app/config.json"))
///     .with_base_layers(2)
///     .with_cli_input();
/// assert_eq!(ctx.loaded_files().len(), 1);
/// assert_eq!(ctx.base_layers(), 2);
/// assert!(ctx.has_cli_input());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    loaded_files: Vec<Utf8PathBuf>,
    base_layers: usize,
    has_cli_input: bool,
}

impl BuildContext {
    /// Empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a configuration file that contributed a layer.
    pub fn with_file(&mut self, path: Utf8PathBuf) -> &mut Self {
        self.loaded_files.push(path);
        self
    }

    /// Record the number of base configuration layers applied.
    pub const fn with_base_layers(&mut self, count: usize) -> &mut Self {
        self.base_layers = count;
        self
    }

    /// Mark that at least one value was supplied on the command line.
    pub const fn with_cli_input(&mut self) -> &mut Self {
        self.has_cli_input = true;
        self
    }

    /// Files loaded during the build, in merge order.
    #[must_use]
    pub fn loaded_files(&self) -> &[Utf8PathBuf] {
        &self.loaded_files
    }

    /// Number of base configuration layers applied.
    #[must_use]
    pub const fn base_layers(&self) -> usize {
        self.base_layers
    }

    /// Whether the command line supplied any value.
    #[must_use]
    pub const fn has_cli_input(&self) -> bool {
        self.has_cli_input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_accumulates_files_in_order() {
        let mut ctx = BuildContext::new();
        ctx.with_file(Utf8PathBuf::from("a.json"))
            .with_file(Utf8PathBuf::from("b.toml"));
        let names: Vec<_> = ctx.loaded_files().iter().map(|p| p.as_str()).collect();
        assert_eq!(names, ["a.json", "b.toml"]);
        assert!(!ctx.has_cli_input());
    }

    const fn mark_cli_build(ctx: &mut BuildContext) {
        ctx.with_base_layers(2).with_cli_input();
    }

    #[test]
    fn counters_are_settable_from_const_code() {
        let mut ctx = BuildContext::new();
        mark_cli_build(&mut ctx);
        assert_eq!(ctx.base_layers(), 2);
        assert!(ctx.has_cli_input());
    }
}
