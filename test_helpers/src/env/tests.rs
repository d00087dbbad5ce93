//! Unit tests for environment helpers.

use super::*;

// Panics on missing or invalid values so failures are loud.
fn env_value(key: &str) -> String {
    match std::env::var(key) {
        Ok(value) => value,
        Err(err) => panic!("expected environment variable {key}: {err}"),
    }
}

fn setup_test_env(key: &str, value: &str) {
    let _guard = ENV_MUTEX.lock();
    // SAFETY: Serialised by ENV_MUTEX.
    unsafe { env_set_var(key, OsStr::new(value)) };
}

fn cleanup_test_env(key: &str) {
    let _guard = ENV_MUTEX.lock();
    // SAFETY: Serialised by ENV_MUTEX.
    unsafe { env_remove_var(key) };
}

#[test]
fn set_var_restores_original() {
    let key = "SCHEMA_ARGS_HELPERS_SET_VAR";
    setup_test_env(key, "orig");
    {
        let _guard = set_var(key, "temp");
        assert_eq!(env_value(key), "temp");
    }
    assert_eq!(env_value(key), "orig");
    cleanup_test_env(key);
}

#[test]
fn set_var_removes_previously_absent_key() {
    let key = "SCHEMA_ARGS_HELPERS_ABSENT";
    cleanup_test_env(key);
    {
        let _guard = set_var(key, "temp");
        assert_eq!(env_value(key), "temp");
    }
    assert!(std::env::var(key).is_err());
}

#[test]
fn stacking_restores_in_lifo() {
    let key = "SCHEMA_ARGS_HELPERS_STACKING";
    cleanup_test_env(key);
    let outer = set_var(key, "v1");
    let inner = set_var(key, "v2");
    assert_eq!(env_value(key), "v2");
    drop(inner);
    assert_eq!(env_value(key), "v1");
    drop(outer);
    assert!(std::env::var(key).is_err());
}

#[test]
fn set_home_points_home_at_directory() {
    let dir = std::env::temp_dir();
    let before = std::env::var_os("HOME");
    {
        let _home = set_home(&dir);
        assert_eq!(std::env::var_os("HOME").as_deref(), Some(dir.as_os_str()));
    }
    assert_eq!(std::env::var_os("HOME"), before);
}
