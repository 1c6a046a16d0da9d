//! Scripted, recording [`Gateway`] for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::gateway::{ApiResponse, Gateway};
use crate::error::RemoteCallError;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub body: Value,
    pub access_token: String,
}

/// Answers calls in order from a queue of `(status, body)` pairs.
///
/// Non-2xx answers become `RemoteCallError::Status`, matching `ApiClient`.
/// A call with nothing left in the queue panics.
#[derive(Default)]
pub struct MockGateway {
    responses: Mutex<VecDeque<(StatusCode, Value)>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.responses.lock().unwrap().push_back((status, body));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.url).collect()
    }
}

impl Gateway for MockGateway {
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
        let body = serde_json::to_value(body).map_err(|source| RemoteCallError::Encode {
            url: url.to_string(),
            source,
        })?;
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_string(),
            body,
            access_token: access_token.to_string(),
        });

        let (status, payload) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted call to {url}"));

        if !status.is_success() {
            return Err(RemoteCallError::Status {
                url: url.to_string(),
                status,
                body: payload.to_string(),
            });
        }

        let body = serde_json::from_value(payload).map_err(|source| RemoteCallError::Decode {
            url: url.to_string(),
            source,
        })?;
        Ok(ApiResponse { status, body })
    }
}
