// src/infra/paths.rs — Config path resolution
//
// PRODKIT_HOME overrides everything; otherwise config lives in ~/.prodkit/.

use std::path::PathBuf;

/// Returns the PRODKIT_HOME override, if set.
fn prodkit_home() -> Option<PathBuf> {
    std::env::var_os("PRODKIT_HOME").map(PathBuf::from)
}

/// Configuration directory: $PRODKIT_HOME/ or ~/.prodkit/
pub fn config_dir() -> Option<PathBuf> {
    if let Some(home) = prodkit_home() {
        return Some(home);
    }
    directories::BaseDirs::new().map(|b| b.home_dir().join(".prodkit"))
}

/// Default config file location, if a home directory can be determined.
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}
