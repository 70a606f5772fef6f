pub mod types;

use crate::error::{AuditError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub use types::{AuditConfig, Config, ScannerConfig};

const CONFIG_FILE_NAME: &str = ".nsaudit.toml";

/// Get the global config file path (~/.nsaudit.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Load configuration.
///
/// An explicitly given file must parse; a broken explicit config is a
/// startup error. Otherwise the local `.nsaudit.toml` is tried, then the
/// global one, then defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path).map_err(|e| AuditError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        return toml::from_str(&content).map_err(|e| AuditError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        });
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        if let Ok(content) = fs::read_to_string(&local) {
            if let Ok(config) = toml::from_str(&content) {
                return Ok(config);
            }
        }
    }

    if let Some(global) = global_config_path() {
        if global.exists() {
            if let Ok(content) = fs::read_to_string(&global) {
                if let Ok(config) = toml::from_str(&content) {
                    return Ok(config);
                }
            }
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_config_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scanner]\ntimeout_secs = 30").unwrap();
        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.scanner.timeout_secs, 30);
    }

    #[test]
    fn broken_explicit_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml [").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, AuditError::Config { .. }));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/nsaudit.toml"))).unwrap_err();
        assert!(matches!(err, AuditError::Config { .. }));
    }
}
