use std::path::PathBuf;

/// File name of the config file looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".gover.yml";

/// `~/.gover.yml`, or `None` when the home directory is unknown.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}
