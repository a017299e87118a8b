use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "keyrace").map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }

    pub fn results_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "keyrace")
            .map(|proj_dirs| proj_dirs.data_local_dir().join("results.csv"))
    }
}
