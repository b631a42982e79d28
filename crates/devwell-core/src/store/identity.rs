//! Identity provider boundary.
//!
//! Credential verification lives in an external service; the core only sees
//! opaque identities and the operations the auth gate needs.

use std::collections::HashMap;

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::rest::RestTransport;
use crate::error::{AuthError, StoreError};

/// A verified identity as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Every identity backend implements this trait.
pub trait IdentityProvider: Send {
    /// Verify an email/password pair.
    fn sign_in_with_password(&mut self, email: &str, password: &str)
        -> Result<Identity, AuthError>;

    /// Create a new identity with the given display name.
    fn create_identity(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Identity, AuthError>;

    /// End the current session.
    fn sign_out(&mut self) -> Result<(), AuthError>;

    /// Request a password-reset message for `email`.
    fn send_password_reset(&mut self, email: &str) -> Result<(), AuthError>;
}

/// In-memory identity provider for tests.
#[derive(Debug, Default)]
pub struct MemoryIdentityProvider {
    accounts: HashMap<String, (String, Identity)>,
    next_uid: u32,
    fail_with: Option<fn() -> StoreError>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with errors built by `f`.
    pub fn fail_with(&mut self, f: fn() -> StoreError) {
        self.fail_with = Some(f);
    }

    fn check_failure(&self) -> Result<(), AuthError> {
        match self.fail_with {
            Some(f) => Err(AuthError::Store(f())),
            None => Ok(()),
        }
    }
}

impl IdentityProvider for MemoryIdentityProvider {
    fn sign_in_with_password(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        self.check_failure()?;
        match self.accounts.get(email) {
            Some((stored, identity)) if stored == password => Ok(identity.clone()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    fn create_identity(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Identity, AuthError> {
        self.check_failure()?;
        if self.accounts.contains_key(email) {
            return Err(AuthError::EmailInUse(email.to_string()));
        }
        self.next_uid += 1;
        let identity = Identity {
            uid: format!("uid-{}", self.next_uid),
            email: email.to_string(),
            display_name: Some(display_name.to_string()),
        };
        self.accounts
            .insert(email.to_string(), (password.to_string(), identity.clone()));
        Ok(identity)
    }

    fn sign_out(&mut self) -> Result<(), AuthError> {
        self.check_failure()?;
        Ok(())
    }

    fn send_password_reset(&mut self, email: &str) -> Result<(), AuthError> {
        self.check_failure()?;
        if !self.accounts.contains_key(email) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(())
    }
}

/// Identity client for the remote JSON-over-HTTP backend.
#[derive(Debug)]
pub struct RestIdentityClient {
    transport: RestTransport,
}

impl RestIdentityClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            transport: RestTransport::new(base_url, api_key, timeout_secs)?,
        })
    }

    fn parse_identity(value: &serde_json::Value) -> Result<Identity, AuthError> {
        serde_json::from_value(value.clone())
            .map_err(|e| AuthError::Store(StoreError::Backend(format!("bad identity body: {e}"))))
    }
}

impl IdentityProvider for RestIdentityClient {
    fn sign_in_with_password(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let body = json!({ "email": email, "password": password });
        let (status, value) =
            self.transport
                .request_json(Method::POST, "identity/sign-in", Some(&body))?;
        match status {
            s if s.is_success() => Self::parse_identity(&value),
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => Err(AuthError::InvalidCredentials),
            s => Err(AuthError::Store(StoreError::Backend(format!(
                "{s} from sign-in"
            )))),
        }
    }

    fn create_identity(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Identity, AuthError> {
        let body = json!({
            "email": email,
            "password": password,
            "display_name": display_name,
        });
        let (status, value) =
            self.transport
                .request_json(Method::POST, "identity/accounts", Some(&body))?;
        match status {
            s if s.is_success() => Self::parse_identity(&value),
            StatusCode::CONFLICT => Err(AuthError::EmailInUse(email.to_string())),
            s => Err(AuthError::Store(StoreError::Backend(format!(
                "{s} from sign-up"
            )))),
        }
    }

    fn sign_out(&mut self) -> Result<(), AuthError> {
        let (status, _) = self
            .transport
            .request_json(Method::POST, "identity/sign-out", None)?;
        if status.is_success() {
            Ok(())
        } else {
            Err(AuthError::Store(StoreError::Backend(format!(
                "{status} from sign-out"
            ))))
        }
    }

    fn send_password_reset(&mut self, email: &str) -> Result<(), AuthError> {
        let body = json!({ "email": email });
        let (status, _) =
            self.transport
                .request_json(Method::POST, "identity/password-reset", Some(&body))?;
        if status.is_success() {
            Ok(())
        } else {
            Err(AuthError::Store(StoreError::Backend(format!(
                "{status} from password-reset"
            ))))
        }
    }
}
