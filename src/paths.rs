//! XDG-style path utilities for configuration and cache directories.
//!
//! XDG Base Directory conventions are preferred over OS-specific
//! locations so the same layout works on every platform.

use std::path::PathBuf;

const APP_DIR: &str = "lingo";

/// Returns the configuration directory for lingo.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/lingo` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/lingo` otherwise
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Returns the cache directory for lingo.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/lingo` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/lingo` otherwise
pub fn cache_dir() -> PathBuf {
    xdg_dir("XDG_CACHE_HOME", ".cache")
}

fn xdg_dir(env_var: &str, fallback: &str) -> PathBuf {
    std::env::var(env_var)
        .ok()
        .filter(|value| !value.is_empty())
        .map_or_else(
            || home_dir().join(fallback).join(APP_DIR),
            |xdg| PathBuf::from(xdg).join(APP_DIR),
        )
}

/// Returns the user's home directory.
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
#[allow(clippy::expect_used)]
fn home_dir() -> PathBuf {
    dirs::home_dir().expect("Failed to determine home directory")
}
