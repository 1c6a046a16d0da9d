//! Request and response bodies for the GitHub REST API.

use serde::{Deserialize, Serialize};

/// File mode of a regular, non-executable file.
pub const FILE_MODE: &str = "100644";
pub const OBJECT_TYPE_BLOB: &str = "blob";

/// `POST /user/repos`
#[derive(Debug, Serialize)]
pub struct CreateRepositoryRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CreateRepositoryResponse {
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// `PUT /repos/{owner}/{repo}/contents/{path}`; `content` is base64.
#[derive(Debug, Serialize)]
pub struct CreateFileRequest<'a> {
    pub message: &'a str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateFileResponse {
    pub commit: ShaPayload,
}

/// A bare object reference. Returned by blob, tree and commit creation, and
/// sent as the body of a ref update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaPayload {
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub path: &'static str,
    pub mode: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRequest {
    pub tree: Vec<TreeEntry>,
    pub base_tree: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRequest {
    pub tree: String,
    pub message: &'static str,
    pub parents: Vec<String>,
}

/// `PATCH /repos/{owner}/{repo}/git/refs/heads/{branch}`
#[derive(Debug, Deserialize)]
pub struct RefResponse {
    #[serde(rename = "ref")]
    pub name: String,
    pub object: ShaPayload,
}
