//! GitHub side of the bootstrap.
//!
//! [`GitHubRepository`] creates the repository, commits the README through
//! the contents API, then adds the remaining files with the low-level Git
//! data API: one blob per file, a tree over those blobs, a commit on top of
//! the initial one, and finally a ref update moving the default branch.

mod handle;
mod types;

pub use handle::{RepositoryHandle, SeedBlobs, Stage};
pub use types::{CommitRequest, ShaPayload, TreeEntry, TreeRequest};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::api::{Endpoints, Gateway};
use crate::config::InvocationParameters;
use crate::error::Result;
use crate::scaffold::{self, SeedFile};
use types::{
    CreateFileRequest, CreateFileResponse, CreateRepositoryRequest, CreateRepositoryResponse,
    RefResponse, FILE_MODE, OBJECT_TYPE_BLOB,
};

const INITIAL_COMMIT_MESSAGE: &str = "initial commit";
const BOOTSTRAP_COMMIT_MESSAGE: &str = "second commit";

/// Tree over the seeded blobs, layered on the initial commit.
pub fn build_tree_request(initial_commit: &str, blobs: &SeedBlobs) -> TreeRequest {
    TreeRequest {
        tree: SeedFile::ALL
            .iter()
            .map(|file| TreeEntry {
                path: file.path(),
                mode: FILE_MODE,
                kind: OBJECT_TYPE_BLOB,
                sha: blobs.sha(*file).to_string(),
            })
            .collect(),
        base_tree: initial_commit.to_string(),
    }
}

pub fn build_commit_request(initial_commit: &str, tree: &str) -> CommitRequest {
    CommitRequest {
        tree: tree.to_string(),
        message: BOOTSTRAP_COMMIT_MESSAGE,
        parents: vec![initial_commit.to_string()],
    }
}

/// Drives one repository from nothing to its bootstrap commit.
pub struct GitHubRepository<'a, G> {
    gateway: &'a G,
    endpoints: &'a Endpoints,
    params: &'a InvocationParameters,
    handle: RepositoryHandle,
}

impl<'a, G: Gateway> GitHubRepository<'a, G> {
    pub fn new(gateway: &'a G, endpoints: &'a Endpoints, params: &'a InvocationParameters) -> Self {
        Self {
            gateway,
            endpoints,
            params,
            handle: RepositoryHandle::new(&params.github_username, &params.app_name),
        }
    }

    pub fn handle(&self) -> &RepositoryHandle {
        &self.handle
    }

    /// Create the repository under the authenticated user. Only 201 counts
    /// as success.
    pub async fn create(&mut self) -> Result<()> {
        self.handle.ensure_stage("create", Stage::Uninitialized)?;

        let request = CreateRepositoryRequest {
            name: self.handle.name(),
        };
        let repository: CreateRepositoryResponse = self
            .gateway
            .post(&self.endpoints.user_repos(), &request, self.token())
            .await?
            .expect_status("Repository creation", StatusCode::CREATED)?;

        info!(
            "✅  Repository {} created successfully",
            repository
                .html_url
                .as_deref()
                .unwrap_or_else(|| self.handle.name())
        );
        self.handle
            .record_created(repository.html_url, repository.default_branch)
    }

    /// Commit `README.md` pointing at `link`; its commit becomes the parent of
    /// the bootstrap commit.
    pub async fn commit_initial(&mut self, link: &str) -> Result<String> {
        self.handle
            .ensure_stage("commit_initial", Stage::RepositoryCreated)?;

        let readme = scaffold::readme(self.handle.name(), link);
        let request = CreateFileRequest {
            message: INITIAL_COMMIT_MESSAGE,
            content: STANDARD.encode(readme),
        };
        let url = self.endpoints.contents(
            self.handle.owner(),
            self.handle.name(),
            scaffold::README_PATH,
        );
        let created: CreateFileResponse = self
            .gateway
            .put(&url, &request, self.token())
            .await?
            .expect_status("Initial commit", StatusCode::CREATED)?;

        let sha = created.commit.sha;
        info!("✅  Successful Initial commit: {}", sha);
        self.handle.record_initial_commit(sha.clone())?;
        Ok(sha)
    }

    /// Upload the seeded files, build their tree, commit it and move the
    /// default branch. Returns the bootstrap commit SHA.
    pub async fn bootstrap(&mut self) -> Result<String> {
        self.handle
            .ensure_stage("bootstrap", Stage::InitialCommitted)?;
        let initial = self.handle.initial_commit().unwrap_or_default().to_string();

        let blobs = self.create_blobs().await?;
        let tree = self.create_tree(&initial, &blobs).await?;
        let sha = self.commit(&initial, &tree).await?;

        info!("✅  Vercel bootstrap done successfully");
        Ok(sha)
    }

    async fn create_blobs(&mut self) -> Result<SeedBlobs> {
        let blobs = SeedBlobs {
            gitignore: self.upload_blob(SeedFile::GitIgnore).await?,
            go_mod: self.upload_blob(SeedFile::GoMod).await?,
            vercel_config: self.upload_blob(SeedFile::VercelConfig).await?,
            handler: self.upload_blob(SeedFile::Handler).await?,
        };
        self.handle.record_blobs(blobs.clone())?;
        Ok(blobs)
    }

    async fn upload_blob(&self, file: SeedFile) -> Result<String> {
        let url = self.endpoints.blobs(self.handle.owner(), self.handle.name());
        let created = self
            .gateway
            .post::<_, ShaPayload>(&url, &file.blob(self.params), self.token())
            .await?
            .body;
        debug!("Blob for {}: {}", file.path(), created.sha);
        Ok(created.sha)
    }

    async fn create_tree(&mut self, initial: &str, blobs: &SeedBlobs) -> Result<String> {
        let request = build_tree_request(initial, blobs);
        let url = self.endpoints.trees(self.handle.owner(), self.handle.name());
        let created = self
            .gateway
            .post::<_, ShaPayload>(&url, &request, self.token())
            .await?
            .body;
        debug!("Tree: {}", created.sha);
        self.handle.record_tree(created.sha.clone())?;
        Ok(created.sha)
    }

    async fn commit(&mut self, initial: &str, tree: &str) -> Result<String> {
        let request = build_commit_request(initial, tree);
        let url = self
            .endpoints
            .commits(self.handle.owner(), self.handle.name());
        let created = self
            .gateway
            .post::<_, ShaPayload>(&url, &request, self.token())
            .await?
            .body;
        debug!("Commit: {}", created.sha);

        let url = self.endpoints.branch_ref(
            self.handle.owner(),
            self.handle.name(),
            self.handle.default_branch(),
        );
        let moved = self
            .gateway
            .patch::<_, RefResponse>(&url, &created, self.token())
            .await?
            .body;
        debug!("{} now at {}", moved.name, moved.object.sha);

        self.handle.record_commit(created.sha.clone())?;
        Ok(created.sha)
    }

    fn token(&self) -> &str {
        &self.params.github_access_token
    }
}
