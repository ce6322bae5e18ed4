use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", "tabata") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("tabata_config.json")
        }
    }

    pub fn log_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("tabata")
        } else {
            ProjectDirs::from("", "", "tabata")
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
                .unwrap_or_else(std::env::temp_dir)
        }
    }
}
