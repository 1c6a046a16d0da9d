use tracing::debug;

use crate::error::{Error, RemoteCallError, Result};
use crate::scaffold::SeedFile;

/// Branch updated by the bootstrap commit when GitHub does not report one.
pub const FALLBACK_BRANCH: &str = "main";

/// Progress of a repository through the bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Uninitialized,
    RepositoryCreated,
    InitialCommitted,
    BlobsUploaded,
    TreeBuilt,
    Committed,
}

/// Blob SHAs of the seeded files, one named slot per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedBlobs {
    pub gitignore: String,
    pub go_mod: String,
    pub vercel_config: String,
    pub handler: String,
}

impl SeedBlobs {
    fn first_blank(&self) -> Option<SeedFile> {
        SeedFile::ALL
            .into_iter()
            .find(|file| self.sha(*file).trim().is_empty())
    }

    pub fn sha(&self, file: SeedFile) -> &str {
        match file {
            SeedFile::GitIgnore => &self.gitignore,
            SeedFile::GoMod => &self.go_mod,
            SeedFile::VercelConfig => &self.vercel_config,
            SeedFile::Handler => &self.handler,
        }
    }
}

/// The repository being bootstrapped and every reference produced so far.
///
/// Fields fill in strictly in causal order; each `record_*` call fails with
/// [`Error::OutOfOrder`] unless the handle is in the stage just before it.
/// A blank SHA from the host is refused and leaves the stage unchanged.
#[derive(Debug, Clone)]
pub struct RepositoryHandle {
    owner: String,
    name: String,
    stage: Stage,
    html_url: Option<String>,
    default_branch: Option<String>,
    initial_commit: Option<String>,
    blobs: Option<SeedBlobs>,
    tree: Option<String>,
    commit: Option<String>,
}

impl RepositoryHandle {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            stage: Stage::Uninitialized,
            html_url: None,
            default_branch: None,
            initial_commit: None,
            blobs: None,
            tree: None,
            commit: None,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn html_url(&self) -> Option<&str> {
        self.html_url.as_deref()
    }

    pub fn default_branch(&self) -> &str {
        self.default_branch.as_deref().unwrap_or(FALLBACK_BRANCH)
    }

    pub fn initial_commit(&self) -> Option<&str> {
        self.initial_commit.as_deref()
    }

    pub fn blobs(&self) -> Option<&SeedBlobs> {
        self.blobs.as_ref()
    }

    pub fn tree(&self) -> Option<&str> {
        self.tree.as_deref()
    }

    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }

    /// Fail unless the handle is exactly at `expected`.
    pub fn ensure_stage(&self, operation: &'static str, expected: Stage) -> Result<()> {
        if self.stage != expected {
            return Err(Error::OutOfOrder {
                operation,
                expected,
                actual: self.stage,
            });
        }
        Ok(())
    }

    pub fn record_created(
        &mut self,
        html_url: Option<String>,
        default_branch: Option<String>,
    ) -> Result<()> {
        self.ensure_stage("record_created", Stage::Uninitialized)?;
        self.html_url = html_url;
        self.default_branch = default_branch.filter(|branch| !branch.is_empty());
        self.stage = Stage::RepositoryCreated;
        Ok(())
    }

    pub fn record_initial_commit(&mut self, sha: String) -> Result<()> {
        self.ensure_stage("record_initial_commit", Stage::RepositoryCreated)?;
        self.initial_commit = Some(non_blank("Initial commit", sha)?);
        self.stage = Stage::InitialCommitted;
        Ok(())
    }

    pub fn record_blobs(&mut self, blobs: SeedBlobs) -> Result<()> {
        self.ensure_stage("record_blobs", Stage::InitialCommitted)?;
        if let Some(file) = blobs.first_blank() {
            debug!("Blob for {} came back without a SHA", file.path());
            return Err(RemoteCallError::EmptySha {
                step: "Blob creation",
            }
            .into());
        }
        self.blobs = Some(blobs);
        self.stage = Stage::BlobsUploaded;
        Ok(())
    }

    pub fn record_tree(&mut self, sha: String) -> Result<()> {
        self.ensure_stage("record_tree", Stage::BlobsUploaded)?;
        self.tree = Some(non_blank("Tree creation", sha)?);
        self.stage = Stage::TreeBuilt;
        Ok(())
    }

    pub fn record_commit(&mut self, sha: String) -> Result<()> {
        self.ensure_stage("record_commit", Stage::TreeBuilt)?;
        self.commit = Some(non_blank("Commit creation", sha)?);
        self.stage = Stage::Committed;
        Ok(())
    }
}

fn non_blank(step: &'static str, sha: String) -> Result<String> {
    if sha.trim().is_empty() {
        return Err(RemoteCallError::EmptySha { step }.into());
    }
    Ok(sha)
}
