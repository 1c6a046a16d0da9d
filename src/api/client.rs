use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::gateway::{ApiResponse, Gateway};
use crate::error::RemoteCallError;

/// Default CLI version (from Cargo.toml)
const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the User-Agent string. GitHub rejects requests without one.
fn build_user_agent() -> String {
    std::env::var("GOVER_USER_AGENT").unwrap_or_else(|_| format!("gover/{}", DEFAULT_VERSION))
}

/// HTTP client for the GitHub and Vercel REST APIs.
///
/// One instance is built per run and lent to every collaborator, so all
/// requests share the same connection pool.
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(user_agent: Option<String>) -> Result<Self, RemoteCallError> {
        let user_agent = user_agent.unwrap_or_else(build_user_agent);

        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(RemoteCallError::Client)?;

        Ok(Self { client })
    }
}

impl Gateway for ApiClient {
    async fn send<T, R>(
        &self,
        method: Method,
        url: &str,
        body: &T,
        access_token: &str,
    ) -> Result<ApiResponse<R>, RemoteCallError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(|source| RemoteCallError::Encode {
            url: url.to_string(),
            source,
        })?;

        debug!("=== API Request ===");
        debug!("{} {}", method, url);

        let response = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|source| RemoteCallError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!("=== API Response ===");
        debug!("Status: {}", status);

        let response_text = response
            .text()
            .await
            .map_err(|source| RemoteCallError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            debug!("Request to {} failed with status {}: {}", url, status, response_text);
            return Err(RemoteCallError::Status {
                url: url.to_string(),
                status,
                body: response_text,
            });
        }

        let body = serde_json::from_str(&response_text).map_err(|source| {
            RemoteCallError::Decode {
                url: url.to_string(),
                source,
            }
        })?;

        Ok(ApiResponse { status, body })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Sha {
        sha: String,
    }

    #[test]
    fn test_build_user_agent() {
        let ua = build_user_agent();
        assert!(!ua.is_empty());
    }

    #[tokio::test]
    async fn test_post_sends_bearer_json_and_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/bar/foo/git/blobs"))
            .and(header("authorization", "Bearer secret"))
            .and(header("content-type", "application/json"))
            .and(header("user-agent", "gover-test"))
            .and(body_json(json!({"content": ".vercel\n.env", "encoding": "utf-8"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "abc123"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(Some("gover-test".to_string())).unwrap();
        let url = format!("{}/repos/bar/foo/git/blobs", server.uri());
        let response: ApiResponse<Sha> = client
            .post(
                &url,
                &json!({"content": ".vercel\n.env", "encoding": "utf-8"}),
                "secret",
            )
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body.sha, "abc123");
    }

    #[tokio::test]
    async fn test_patch_uses_patch_method() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/repos/bar/foo/git/refs/heads/main"))
            .and(body_json(json!({"sha": "c0ffee"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ref": "refs/heads/main"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(None).unwrap();
        let url = format!("{}/repos/bar/foo/git/refs/heads/main", server.uri());
        let response: ApiResponse<serde_json::Value> = client
            .patch(&url, &json!({"sha": "c0ffee"}), "secret")
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"message": "name already exists"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(None).unwrap();
        let url = format!("{}/user/repos", server.uri());
        let err = client
            .post::<_, serde_json::Value>(&url, &json!({"name": "foo"}), "secret")
            .await
            .unwrap_err();

        match &err {
            RemoteCallError::Status { url: failed, status, body } => {
                assert_eq!(failed, &url);
                assert_eq!(*status, StatusCode::UNPROCESSABLE_ENTITY);
                assert!(body.contains("name already exists"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("422"));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new(None).unwrap();
        let url = format!("{}/repos/bar/foo/git/trees", server.uri());
        let err = client
            .post::<_, Sha>(&url, &json!({}), "secret")
            .await
            .unwrap_err();

        assert!(matches!(err, RemoteCallError::Decode { .. }));
    }
}
