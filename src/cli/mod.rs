mod args;
mod paths;

pub use args::{Cli, Commands, CredentialArgs};
pub use paths::default_config_path;
