use std::ffi::OsString;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clinica";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "CLINICA_DATA_DIR";

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "clinica.db";

/// Get the application data directory.
/// `$CLINICA_DATA_DIR` when set, otherwise ~/Clinica/ (or ./Clinica without a home directory).
pub fn app_data_dir() -> PathBuf {
    resolve_data_dir(std::env::var_os(DATA_DIR_ENV))
}

/// An empty override counts as unset.
fn resolve_data_dir(override_dir: Option<OsString>) -> PathBuf {
    match override_dir.filter(|d| !d.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME),
    }
}

/// Path of the collection database under `data_dir`.
pub fn database_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "clinica_lib=info,clinica=info"
}
