use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::api::{DEFAULT_GITHUB_API_URL, DEFAULT_VERCEL_API_URL};
use crate::config::DEFAULT_APP_NAME;

/// Gover - bootstrap Go serverless functions hosted by Vercel
#[derive(Parser)]
#[command(name = "gover")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default is $HOME/.gover.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub credentials: CredentialArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every subcommand.
#[derive(Args, Clone, Default)]
pub struct CredentialArgs {
    /// Go version declared in go.mod (default 1.18)
    #[arg(long, global = true)]
    pub go_version: Option<String>,

    /// GitHub username owning the new repository
    #[arg(long, global = true, env = "GITHUB_USERNAME")]
    pub github_username: Option<String>,

    /// GitHub access token
    #[arg(long, global = true, env = "GITHUB_ACCESS_TOKEN", hide_env_values = true)]
    pub github_access_token: Option<String>,

    /// Vercel access token
    #[arg(long, global = true, env = "VERCEL_ACCESS_TOKEN", hide_env_values = true)]
    pub vercel_access_token: Option<String>,

    /// GitHub API base URL (for debugging/dev deployments only)
    #[arg(long, global = true, hide = true, default_value = DEFAULT_GITHUB_API_URL)]
    pub github_api_url: String,

    /// Vercel API base URL (for debugging/dev deployments only)
    #[arg(long, global = true, hide = true, default_value = DEFAULT_VERCEL_API_URL)]
    pub vercel_api_url: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the version number of Gover
    Version,
    /// Create a new Go Serverless application on Vercel
    Create {
        /// Application name, used for the repository and the Vercel project
        #[arg(short, long, default_value = DEFAULT_APP_NAME)]
        name: String,
    },
}
