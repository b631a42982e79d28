//! Shared HTTP plumbing for the remote document-store and identity clients.
//!
//! The remote backend is opaque: a JSON-over-HTTP service addressed by
//! collection/id paths. Clients expose a synchronous surface; internally each
//! request runs on an owned current-thread runtime with an explicit deadline,
//! so a dead backend can never hang an engine turn indefinitely.

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tokio::runtime::Runtime;

use crate::error::StoreError;

pub(crate) struct RestTransport {
    http: Client,
    runtime: Runtime,
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl RestTransport {
    pub(crate) fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self {
            http: Client::new(),
            runtime,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            timeout_secs,
        })
    }

    /// Issue a request and parse the response body as JSON.
    ///
    /// Status mapping: 404 -> `NotFound` is left to callers (they know the
    /// collection/id), 401/403 -> `PermissionDenied`, transport failures ->
    /// `NetworkUnavailable`, deadline -> `Timeout`.
    pub(crate) fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(StatusCode, Value), StoreError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let timeout = std::time::Duration::from_secs(self.timeout_secs);

        let response = self.runtime.block_on(async {
            let mut req = self.http.request(method, &url);
            if let Some(key) = &self.api_key {
                req = req.bearer_auth(key);
            }
            if let Some(body) = body {
                req = req.json(body);
            }
            match tokio::time::timeout(timeout, req.send()).await {
                Err(_) => Err(StoreError::Timeout {
                    timeout_secs: self.timeout_secs,
                }),
                Ok(Err(e)) => Err(StoreError::NetworkUnavailable(e.to_string())),
                Ok(Ok(resp)) => {
                    let status = resp.status();
                    let value = match tokio::time::timeout(timeout, resp.json::<Value>()).await {
                        Err(_) => {
                            return Err(StoreError::Timeout {
                                timeout_secs: self.timeout_secs,
                            })
                        }
                        Ok(Err(_)) => Value::Null, // non-JSON body, status still meaningful
                        Ok(Ok(v)) => v,
                    };
                    Ok((status, value))
                }
            }
        })?;

        let (status, value) = response;
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StoreError::PermissionDenied(format!("{status} for {url}")))
            }
            _ => Ok((status, value)),
        }
    }
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
