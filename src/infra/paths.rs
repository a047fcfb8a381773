// src/infra/paths.rs — XDG-compliant path management
//
// Only configuration and logs live on disk. Session state (the base URL,
// the loaded dataset) is never written anywhere.

use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "roas-dash")
}

/// Configuration directory: XDG_CONFIG_HOME/roas-dash (or the platform equivalent).
/// Falls back to the working directory when no home directory is known.
pub fn config_dir() -> PathBuf {
    project_dirs()
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Data directory: XDG_DATA_HOME/roas-dash (or the platform equivalent).
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|d| d.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default log file for dashboard mode.
pub fn log_file_path() -> PathBuf {
    data_dir().join("roas-dash.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_is_toml_in_config_dir() {
        let path = config_file_path();
        assert!(path.starts_with(config_dir()));
        assert_eq!(path.file_name().unwrap(), "config.toml");
    }

    #[test]
    fn test_log_file_in_data_dir() {
        let path = log_file_path();
        assert!(path.starts_with(data_dir()));
        assert_eq!(path.extension().unwrap(), "log");
    }
}
