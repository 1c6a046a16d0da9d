use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RemoteCallError;

/// A decoded response together with the status it arrived with.
///
/// Callers that require an exact status (201 for repository creation, 200
/// for project registration) inspect `status`; the gateway itself only
/// rejects non-2xx answers.
#[derive(Debug, Clone)]
pub struct ApiResponse<R> {
    pub status: StatusCode,
    pub body: R,
}

impl<R> ApiResponse<R> {
    /// Accept the response only if it carries exactly `expected`.
    pub fn expect_status(
        self,
        step: &'static str,
        expected: StatusCode,
    ) -> Result<R, RemoteCallError> {
        if self.status != expected {
            return Err(RemoteCallError::UnexpectedStatus {
                step,
                expected,
                status: self.status,
            });
        }
        Ok(self.body)
    }
}

/// Authenticated JSON request capability shared by every remote call.
///
/// Each call serializes `body` to JSON, sends it with a bearer token, and
/// decodes the answer into the caller's response type. Any non-2xx status is
/// an error; nothing is retried.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    async fn send<T, R>(
        &self,
        method: Method,
        url: &str,
        body: &T,
        access_token: &str,
    ) -> Result<ApiResponse<R>, RemoteCallError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned;

    async fn post<T, R>(
        &self,
        url: &str,
        body: &T,
        access_token: &str,
    ) -> Result<ApiResponse<R>, RemoteCallError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(Method::POST, url, body, access_token).await
    }

    async fn patch<T, R>(
        &self,
        url: &str,
        body: &T,
        access_token: &str,
    ) -> Result<ApiResponse<R>, RemoteCallError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(Method::PATCH, url, body, access_token).await
    }

    async fn put<T, R>(
        &self,
        url: &str,
        body: &T,
        access_token: &str,
    ) -> Result<ApiResponse<R>, RemoteCallError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(Method::PUT, url, body, access_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_status_accepts_exact_match() {
        let response = ApiResponse {
            status: StatusCode::CREATED,
            body: 7,
        };
        assert_eq!(
            response
                .expect_status("Repository creation", StatusCode::CREATED)
                .unwrap(),
            7
        );
    }

    #[test]
    fn test_expect_status_rejects_other_success_codes() {
        let response = ApiResponse {
            status: StatusCode::OK,
            body: (),
        };
        let err = response
            .expect_status("Repository creation", StatusCode::CREATED)
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::OK));
    }
}
