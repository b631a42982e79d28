//! Remote document storage.
//!
//! Documents are JSON field maps addressed by `collection/id`. The auth gate
//! keeps user profiles (onboarding flag, wellness goals) in the `users`
//! collection.

use std::collections::HashMap;

use reqwest::{Method, StatusCode};
use serde_json::Value;

use super::rest::RestTransport;
use crate::error::StoreError;

/// Document store abstraction over the remote backend.
pub trait DocumentStore: Send {
    /// Fetch the document at `collection/id`.
    ///
    /// # Errors
    /// `StoreError::NotFound` when no document exists under the key.
    fn get_document(&self, collection: &str, id: &str) -> Result<Value, StoreError>;

    /// Write the document at `collection/id`.
    ///
    /// With `merge`, top-level fields of `fields` are merged into the
    /// existing document; without it the document is replaced.
    fn set_document(
        &mut self,
        collection: &str,
        id: &str,
        fields: &Value,
        merge: bool,
    ) -> Result<(), StoreError>;
}

fn merge_fields(existing: &mut Value, incoming: &Value) {
    match (existing.as_object_mut(), incoming.as_object()) {
        (Some(base), Some(update)) => {
            for (k, v) in update {
                base.insert(k.clone(), v.clone());
            }
        }
        _ => *existing = incoming.clone(),
    }
}

/// In-memory document store for tests.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: HashMap<(String, String), Value>,
    /// When set, every call fails with a synthetic error (for exercising
    /// offline and permission paths).
    fail_with: Option<fn() -> StoreError>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with errors built by `f`.
    pub fn fail_with(&mut self, f: fn() -> StoreError) {
        self.fail_with = Some(f);
    }

    /// Restore normal operation after `fail_with`.
    pub fn recover(&mut self) {
        self.fail_with = None;
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get_document(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        if let Some(f) = self.fail_with {
            return Err(f());
        }
        self.documents
            .get(&(collection.to_string(), id.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    fn set_document(
        &mut self,
        collection: &str,
        id: &str,
        fields: &Value,
        merge: bool,
    ) -> Result<(), StoreError> {
        if let Some(f) = self.fail_with {
            return Err(f());
        }
        let key = (collection.to_string(), id.to_string());
        if merge {
            if let Some(existing) = self.documents.get_mut(&key) {
                merge_fields(existing, fields);
                return Ok(());
            }
        }
        self.documents.insert(key, fields.clone());
        Ok(())
    }
}

/// Document store backed by the remote JSON-over-HTTP backend.
///
/// `GET /{collection}/{id}` reads a document, `PUT` replaces it and `PATCH`
/// merges fields, matching the backend's merge-write semantics.
#[derive(Debug)]
pub struct RestDocumentStore {
    transport: RestTransport,
}

impl RestDocumentStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            transport: RestTransport::new(base_url, api_key, timeout_secs)?,
        })
    }
}

impl DocumentStore for RestDocumentStore {
    fn get_document(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        let path = format!("{collection}/{id}");
        let (status, value) = self.transport.request_json(Method::GET, &path, None)?;
        match status {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
            s if s.is_success() => Ok(value),
            s => Err(StoreError::Backend(format!("{s} reading {path}"))),
        }
    }

    fn set_document(
        &mut self,
        collection: &str,
        id: &str,
        fields: &Value,
        merge: bool,
    ) -> Result<(), StoreError> {
        let path = format!("{collection}/{id}");
        let method = if merge { Method::PATCH } else { Method::PUT };
        let (status, _) = self.transport.request_json(method, &path, Some(fields))?;
        if status.is_success() {
            Ok(())
        } else {
            Err(StoreError::Backend(format!("{status} writing {path}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_get_missing_is_not_found() {
        let store = MemoryDocumentStore::new();
        let err = store.get_document("users", "u1").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn memory_store_replace_and_merge() {
        let mut store = MemoryDocumentStore::new();
        store
            .set_document("users", "u1", &json!({"a": 1, "b": 2}), false)
            .unwrap();
        store
            .set_document("users", "u1", &json!({"b": 3, "c": 4}), true)
            .unwrap();

        let doc = store.get_document("users", "u1").unwrap();
        assert_eq!(doc, json!({"a": 1, "b": 3, "c": 4}));

        store
            .set_document("users", "u1", &json!({"only": true}), false)
            .unwrap();
        assert_eq!(store.get_document("users", "u1").unwrap(), json!({"only": true}));
    }

    #[test]
    fn rest_store_reads_documents() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/users/u1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"onboarding_completed": true}"#)
            .create();

        let store = RestDocumentStore::new(server.url(), None, 5).unwrap();
        let doc = store.get_document("users", "u1").unwrap();
        assert_eq!(doc["onboarding_completed"], json!(true));
        mock.assert();
    }

    #[test]
    fn rest_store_maps_404_to_not_found() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/users/absent")
            .with_status(404)
            .create();

        let store = RestDocumentStore::new(server.url(), None, 5).unwrap();
        let err = store.get_document("users", "absent").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn rest_store_maps_403_to_permission_denied() {
        let mut server = mockito::Server::new();
        server
            .mock("PATCH", "/users/u1")
            .with_status(403)
            .create();

        let mut store = RestDocumentStore::new(server.url(), None, 5).unwrap();
        let err = store
            .set_document("users", "u1", &json!({"x": 1}), true)
            .unwrap_err();
        assert!(matches!(err, StoreError::PermissionDenied(_)));
    }

    #[test]
    fn rest_store_connection_failure_is_network_unavailable() {
        // Port 9 (discard) is not listening.
        let store = RestDocumentStore::new("http://127.0.0.1:9", None, 2).unwrap();
        let err = store.get_document("users", "u1").unwrap_err();
        assert!(err.is_connectivity(), "got {err:?}");
    }
}
