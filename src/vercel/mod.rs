//! Vercel project registration.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::{Endpoints, Gateway};
use crate::config::InvocationParameters;
use crate::error::Result;

const GIT_PROVIDER: &str = "github";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub name: String,
    pub git_repository: GitRepository,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitRepository {
    pub repo: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ProjectResponse {
    #[serde(default)]
    pub id: Option<String>,
}

/// Project linked to the GitHub repository of the same name.
pub fn build_project_request(name: &str) -> ProjectRequest {
    ProjectRequest {
        name: name.to_string(),
        git_repository: GitRepository {
            repo: name.to_string(),
            kind: GIT_PROVIDER,
        },
    }
}

/// Registers the new repository as a Vercel project.
pub struct VercelProject<'a, G> {
    gateway: &'a G,
    endpoints: &'a Endpoints,
    params: &'a InvocationParameters,
}

impl<'a, G: Gateway> VercelProject<'a, G> {
    pub fn new(gateway: &'a G, endpoints: &'a Endpoints, params: &'a InvocationParameters) -> Self {
        Self {
            gateway,
            endpoints,
            params,
        }
    }

    /// Create the project. Only 200 counts as success; re-running against an
    /// existing name is left to Vercel.
    pub async fn create(&self) -> Result<ProjectResponse> {
        let request = build_project_request(&self.params.app_name);
        let project: ProjectResponse = self
            .gateway
            .post(
                &self.endpoints.projects(),
                &request,
                &self.params.vercel_access_token,
            )
            .await?
            .expect_status("Vercel Project creation", StatusCode::OK)?;

        debug!("Vercel project id: {:?}", project.id);
        info!("✅  Vercel Project created successfully");
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockGateway;
    use crate::api::DEFAULT_GITHUB_API_URL;
    use crate::error::{Error, RemoteCallError};
    use serde_json::json;

    fn params() -> InvocationParameters {
        InvocationParameters {
            app_name: "demo".to_string(),
            github_username: "alice".to_string(),
            github_access_token: "gh-token".to_string(),
            vercel_access_token: "vc-token".to_string(),
            go_version: "1.20".to_string(),
        }
    }

    #[test]
    fn test_project_request_shape() {
        assert_eq!(
            serde_json::to_value(build_project_request("demo")).unwrap(),
            json!({"name": "demo", "gitRepository": {"repo": "demo", "type": "github"}})
        );
    }

    #[tokio::test]
    async fn test_create_posts_with_vercel_token() {
        let gateway = MockGateway::new().respond(200, json!({"id": "prj_1", "name": "demo"}));
        let endpoints = Endpoints::new(DEFAULT_GITHUB_API_URL, "https://vc.test").unwrap();
        let params = params();

        let project = VercelProject::new(&gateway, &endpoints, &params)
            .create()
            .await
            .unwrap();

        assert_eq!(project.id.as_deref(), Some("prj_1"));
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "https://vc.test/v9/projects");
        assert_eq!(calls[0].access_token, "vc-token");
        assert_eq!(calls[0].body["gitRepository"]["repo"], "demo");
    }

    #[tokio::test]
    async fn test_create_requires_200() {
        let gateway = MockGateway::new().respond(201, json!({}));
        let endpoints = Endpoints::new(DEFAULT_GITHUB_API_URL, "https://vc.test").unwrap();
        let params = params();

        let err = VercelProject::new(&gateway, &endpoints, &params)
            .create()
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Remote(RemoteCallError::UnexpectedStatus {
                status: StatusCode::CREATED,
                ..
            })
        ));
    }
}
