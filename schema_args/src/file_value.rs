//! File-loadable values.
//!
//! A string field marked file-loadable whose merged value starts with `@`
//! is replaced by the text of the named file. `~`, `~/rest` and
//! `~user/rest` are expanded before reading; anything else is used as
//! given, relative to the working directory.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::analyze::FieldDescriptor;
use crate::merge::paths::get_path_mut;
use crate::{ArgsError, ArgsResult};

/// Prefix marking a value as a path to load.
pub const FILE_MARKER: char = '@';

/// Expand a leading `~` or `~user` in `raw`.
///
/// # Errors
///
/// Returns an error when the home directory cannot be determined or the
/// named user does not exist.
///
/// # Examples
///
/// ```
/// use schema_args::expand_home;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_home("notes.txt")?, PathBuf::from("notes.txt"));
/// # Ok::<_, std::io::Error>(())
/// ```
pub fn expand_home(raw: &str) -> io::Result<PathBuf> {
    let Some(rest) = raw.strip_prefix('~') else {
        return Ok(PathBuf::from(raw));
    };
    let (user, tail) = rest.split_once('/').unwrap_or((rest, ""));
    let home = if user.is_empty() {
        dirs::home_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "home directory is unknown"))?
    } else {
        user_home(user)?
    };
    Ok(if tail.is_empty() { home } else { home.join(tail) })
}

#[cfg(unix)]
fn user_home(name: &str) -> io::Result<PathBuf> {
    nix::unistd::User::from_name(name)
        .map_err(io::Error::from)?
        .map(|user| user.dir)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("unknown user '{name}'")))
}

#[cfg(not(unix))]
fn user_home(name: &str) -> io::Result<PathBuf> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot resolve the home directory of '{name}' on this platform"),
    ))
}

/// Read the file named by a marked value, or `None` when unmarked.
fn load(field: &str, raw: &str) -> ArgsResult<Option<String>> {
    let Some(target) = raw.strip_prefix(FILE_MARKER) else {
        return Ok(None);
    };
    let to_error = |path: PathBuf, source: io::Error| {
        Arc::new(ArgsError::FileLoadable {
            field: field.to_owned(),
            path,
            source,
        })
    };
    let path = expand_home(target).map_err(|e| to_error(PathBuf::from(target), e))?;
    let text = std::fs::read_to_string(&path).map_err(|e| to_error(path.clone(), e))?;
    debug!(field, path = %path.display(), bytes = text.len(), "loaded file-backed value");
    Ok(Some(text))
}

/// Resolve every file-loadable field present in `acc`.
pub(crate) fn resolve_all(
    descriptors: &[FieldDescriptor],
    acc: &mut Map<String, Value>,
) -> ArgsResult<()> {
    for descriptor in descriptors.iter().filter(|d| d.is_file_loadable()) {
        let Some(Value::String(raw)) = get_path_mut(acc, descriptor.path()) else {
            continue;
        };
        if let Some(text) = load(&descriptor.dest(), raw)? {
            *raw = text;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};
    use serial_test::serial;

    #[test]
    fn unmarked_values_are_untouched() -> Result<()> {
        ensure!(load("f", "plain")?.is_none());
        Ok(())
    }

    #[test]
    fn marked_values_read_the_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "hello\n")?;
        let raw = format!("@{}", path.display());
        ensure!(load("f", &raw)?.as_deref() == Some("hello\n"));
        Ok(())
    }

    #[test]
    fn unreadable_path_names_field_and_path() {
        let err = load("prompt", "@/definitely/not/here.txt").expect_err("missing file");
        let ArgsError::FileLoadable { field, path, .. } = &*err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(field, "prompt");
        assert_eq!(path, &PathBuf::from("/definitely/not/here.txt"));
    }

    #[test]
    #[serial]
    fn tilde_expands_to_home() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let _home = test_helpers::env::set_home(dir.path());
        std::fs::write(dir.path().join("note.txt"), "from home")?;
        ensure!(expand_home("~")? == dir.path());
        ensure!(load("f", "@~/note.txt")?.as_deref() == Some("from home"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn unknown_user_is_an_error() {
        assert!(expand_home("~no-such-user-4f9a/x").is_err());
    }
}
