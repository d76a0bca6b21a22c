//! Resolution of the application data directory and store file.

use std::{env, path::PathBuf};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".calendar_core";
const STORE_FILE: &str = "store.json";

/// Returns the application data directory, defaulting to `~/.calendar_core`.
///
/// `CALENDAR_CORE_HOME` overrides the location, which keeps tests and
/// scripted runs away from the real user data.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("CALENDAR_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path of the single JSON store document.
pub fn store_file() -> PathBuf {
    app_data_dir().join(STORE_FILE)
}
