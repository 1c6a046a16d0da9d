//! Configuration resolution.
//!
//! Values come from three places, highest priority first: command-line flags
//! (clap already folds the matching environment variables into these), the
//! YAML config file (`~/.gover.yml` by default), and built-in defaults. The
//! three secrets have no default; resolution fails before any network call
//! if one is missing.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::cli;
use crate::error::ConfigError;

pub const DEFAULT_APP_NAME: &str = "my-go-serverless-app";
pub const DEFAULT_GO_VERSION: &str = "1.18";

/// A required value and the places a user can supply it.
struct RequiredKey {
    key: &'static str,
    flag: &'static str,
    env: &'static str,
}

const GITHUB_USERNAME: RequiredKey = RequiredKey {
    key: "github_username",
    flag: "github-username",
    env: "GITHUB_USERNAME",
};

const GITHUB_ACCESS_TOKEN: RequiredKey = RequiredKey {
    key: "github_access_token",
    flag: "github-access-token",
    env: "GITHUB_ACCESS_TOKEN",
};

const VERCEL_ACCESS_TOKEN: RequiredKey = RequiredKey {
    key: "vercel_access_token",
    flag: "vercel-access-token",
    env: "VERCEL_ACCESS_TOKEN",
};

/// Contents of the YAML config file. Every key is optional.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub github_username: Option<String>,
    pub github_access_token: Option<String>,
    pub vercel_access_token: Option<String>,
    pub go_version: Option<String>,
}

impl ConfigFile {
    /// Load the config file.
    ///
    /// An explicitly requested file must exist. The default file is optional;
    /// when it is absent (or the home directory is unknown) an empty config is
    /// returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => match cli::default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("No config file found, using flags and environment only");
                    return Ok(Self::default());
                }
            },
        };

        let config = Self::from_path(&path)?;
        info!("Using config file: {}", path.display());
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for ConfigFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigFile")
            .field("github_username", &self.github_username)
            .field("github_access_token", &redact(&self.github_access_token))
            .field("vercel_access_token", &redact(&self.vercel_access_token))
            .field("go_version", &self.go_version)
            .finish()
    }
}

/// Values taken from the command line (flags, or their environment variables).
#[derive(Clone, Default)]
pub struct Overrides {
    pub app_name: Option<String>,
    pub go_version: Option<String>,
    pub github_username: Option<String>,
    pub github_access_token: Option<String>,
    pub vercel_access_token: Option<String>,
}

/// Fully resolved inputs of one run. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct InvocationParameters {
    pub app_name: String,
    pub github_username: String,
    pub github_access_token: String,
    pub vercel_access_token: String,
    pub go_version: String,
}

impl InvocationParameters {
    pub fn resolve(overrides: &Overrides, file: &ConfigFile) -> Result<Self, ConfigError> {
        let github_username = required(
            &GITHUB_USERNAME,
            &overrides.github_username,
            &file.github_username,
        )?;
        let github_access_token = required(
            &GITHUB_ACCESS_TOKEN,
            &overrides.github_access_token,
            &file.github_access_token,
        )?;
        let vercel_access_token = required(
            &VERCEL_ACCESS_TOKEN,
            &overrides.vercel_access_token,
            &file.vercel_access_token,
        )?;

        let app_name = match overrides.app_name.as_deref().map(str::trim) {
            Some("") => return Err(ConfigError::BlankAppName),
            Some(name) => name.to_string(),
            None => DEFAULT_APP_NAME.to_string(),
        };
        let go_version = first_present(&[&overrides.go_version, &file.go_version])
            .unwrap_or_else(|| DEFAULT_GO_VERSION.to_string());

        Ok(Self {
            app_name,
            github_username,
            github_access_token,
            vercel_access_token,
            go_version,
        })
    }
}

impl std::fmt::Debug for InvocationParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationParameters")
            .field("app_name", &self.app_name)
            .field("github_username", &self.github_username)
            .field("github_access_token", &"[REDACTED]")
            .field("vercel_access_token", &"[REDACTED]")
            .field("go_version", &self.go_version)
            .finish()
    }
}

/// First candidate that is set and not blank, trimmed.
fn first_present(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|value| value.as_deref())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn required(
    key: &RequiredKey,
    flag: &Option<String>,
    file: &Option<String>,
) -> Result<String, ConfigError> {
    first_present(&[flag, file]).ok_or(ConfigError::Missing {
        key: key.key,
        flag: key.flag,
        env: key.env,
    })
}

fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "[REDACTED]")
}
