//! The fixed bootstrap sequence.
//!
//! Order: create repository, register Vercel project, initial commit,
//! bootstrap commit. The project registration only needs the repository to
//! exist, so it runs as soon as the repository does. Every step is fatal on
//! failure and nothing already created is rolled back.

use tracing::{debug, info};

use crate::api::{Endpoints, Gateway};
use crate::config::{ConfigFile, InvocationParameters, Overrides};
use crate::error::Result;
use crate::github::GitHubRepository;
use crate::scaffold;
use crate::vercel::VercelProject;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrapped {
    pub link: String,
    pub repository_url: Option<String>,
    pub tree: String,
    pub commit: String,
}

pub struct Workflow<'a, G> {
    gateway: &'a G,
    endpoints: &'a Endpoints,
}

impl<'a, G: Gateway> Workflow<'a, G> {
    pub fn new(gateway: &'a G, endpoints: &'a Endpoints) -> Self {
        Self { gateway, endpoints }
    }

    pub async fn run(&self, params: &InvocationParameters) -> Result<Bootstrapped> {
        let link = scaffold::deployment_link(&params.app_name, &params.github_username);

        let mut repository = GitHubRepository::new(self.gateway, self.endpoints, params);
        repository.create().await?;

        VercelProject::new(self.gateway, self.endpoints, params)
            .create()
            .await?;

        repository.commit_initial(&link).await?;
        let commit = repository.bootstrap().await?;

        let handle = repository.handle();
        debug!(
            "Repository {} reached {:?} at {:?}",
            handle.name(),
            handle.stage(),
            handle.commit()
        );
        debug!("Seeded blobs: {:?}", handle.blobs());
        info!("🚀  Go to {}", link);
        Ok(Bootstrapped {
            link,
            repository_url: handle.html_url().map(str::to_string),
            tree: handle.tree().unwrap_or_default().to_string(),
            commit,
        })
    }
}

/// Resolve configuration, then run the workflow. A configuration error
/// returns before the gateway is touched.
pub async fn create<G: Gateway>(
    gateway: &G,
    endpoints: &Endpoints,
    overrides: &Overrides,
    file: &ConfigFile,
) -> Result<Bootstrapped> {
    let params = InvocationParameters::resolve(overrides, file)?;
    Workflow::new(gateway, endpoints).run(&params).await
}
