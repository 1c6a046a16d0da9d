use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_VERCEL_API_URL: &str = "https://api.vercel.com";

/// Base URLs of the two remote APIs, and the routes built on top of them.
#[derive(Debug, Clone)]
pub struct Endpoints {
    github: Url,
    vercel: Url,
}

impl Endpoints {
    pub fn new(github_api_url: &str, vercel_api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            github: parse_base(github_api_url)?,
            vercel: parse_base(vercel_api_url)?,
        })
    }

    /// `POST` target creating a repository for the authenticated user.
    pub fn user_repos(&self) -> String {
        format!("{}user/repos", self.github)
    }

    pub fn contents(&self, owner: &str, repo: &str, path: &str) -> String {
        format!("{}repos/{}/{}/contents/{}", self.github, owner, repo, path)
    }

    pub fn blobs(&self, owner: &str, repo: &str) -> String {
        self.git(owner, repo, "blobs")
    }

    pub fn trees(&self, owner: &str, repo: &str) -> String {
        self.git(owner, repo, "trees")
    }

    pub fn commits(&self, owner: &str, repo: &str) -> String {
        self.git(owner, repo, "commits")
    }

    pub fn branch_ref(&self, owner: &str, repo: &str, branch: &str) -> String {
        self.git(owner, repo, &format!("refs/heads/{}", branch))
    }

    pub fn projects(&self) -> String {
        format!("{}v9/projects", self.vercel)
    }

    fn git(&self, owner: &str, repo: &str, object: &str) -> String {
        format!("{}repos/{}/{}/git/{}", self.github, owner, repo, object)
    }
}

/// Parse a base URL, forcing a trailing slash so routes append rather than
/// replace the last path segment.
fn parse_base(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
