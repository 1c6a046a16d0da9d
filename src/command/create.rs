use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::api::{ApiClient, Endpoints};
use crate::cli::CredentialArgs;
use crate::config::{ConfigFile, Overrides};
use crate::workflow;

pub async fn run_create(
    name: String,
    credentials: CredentialArgs,
    config_path: Option<&Path>,
) -> Result<()> {
    let file = ConfigFile::load(config_path)?;
    let endpoints = Endpoints::new(&credentials.github_api_url, &credentials.vercel_api_url)?;
    let overrides = Overrides {
        app_name: Some(name),
        go_version: credentials.go_version,
        github_username: credentials.github_username,
        github_access_token: credentials.github_access_token,
        vercel_access_token: credentials.vercel_access_token,
    };

    let client = ApiClient::new(None)?;
    let outcome = workflow::create(&client, &endpoints, &overrides, &file).await?;

    debug!(
        "Bootstrap commit {} in {} deploys to {}",
        outcome.commit,
        outcome.repository_url.as_deref().unwrap_or("-"),
        outcome.link
    );
    Ok(())
}
