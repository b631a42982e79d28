//! Auth/onboarding gate.
//!
//! A small state machine over identity and onboarding status; the navigation
//! shell reads [`AuthPhase`] to decide which stack to show. The gate never
//! talks to the network on its own - the identity provider and document
//! store are passed into each operation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::goals::WellnessGoals;
use super::notices::{Notice, SessionNotices};
use crate::error::{AuthError, CoreError, StoreError};
use crate::store::{DocumentStore, Identity, IdentityProvider};

/// Remote collection holding user profiles.
pub const USERS_COLLECTION: &str = "users";

/// Which navigation stack the shell should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    /// Identity not yet reported by the provider.
    Loading,
    SignedOut,
    /// Identity present, onboarding not (verifiably) completed.
    SignedInIncomplete,
    SignedInComplete,
}

/// Result of `complete_onboarding`: whether the remote profile was updated
/// or the completion is local-only pending sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingOutcome {
    Synced,
    LocalOnly,
}

/// The gate itself. One instance per session.
#[derive(Debug, Default)]
pub struct AuthGate {
    identity: Option<Identity>,
    onboarding_completed: bool,
    offline: bool,
    pending_remote_sync: bool,
    /// False until the provider's first identity notification.
    initialized: bool,
    notices: SessionNotices,
}

impl AuthGate {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> AuthPhase {
        if !self.initialized {
            AuthPhase::Loading
        } else if self.identity.is_none() {
            AuthPhase::SignedOut
        } else if self.onboarding_completed {
            AuthPhase::SignedInComplete
        } else {
            AuthPhase::SignedInIncomplete
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn onboarding_completed(&self) -> bool {
        self.onboarding_completed
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// True when onboarding completed locally but the remote profile write
    /// is still outstanding.
    pub fn pending_remote_sync(&self) -> bool {
        self.pending_remote_sync
    }

    /// Hand pending one-time notices to the shell.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    // ── Identity notifications ───────────────────────────────────────

    /// Apply one identity-change notification from the provider.
    ///
    /// The first call exits `Loading`. With an identity present the remote
    /// profile is consulted for the onboarding flag; a failed read fails
    /// closed to `SignedInIncomplete`, and connectivity failures flip the
    /// offline flag.
    pub fn observe_identity(
        &mut self,
        identity: Option<Identity>,
        documents: &dyn DocumentStore,
    ) -> AuthPhase {
        self.initialized = true;
        match identity {
            None => {
                self.identity = None;
                self.onboarding_completed = false;
            }
            Some(identity) => {
                self.onboarding_completed = self.read_onboarding_flag(documents, &identity.uid);
                self.identity = Some(identity);
            }
        }
        self.phase()
    }

    fn read_onboarding_flag(&mut self, documents: &dyn DocumentStore, uid: &str) -> bool {
        match documents.get_document(USERS_COLLECTION, uid) {
            Ok(fields) => fields
                .get("onboarding_completed")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false),
            // No profile document yet: onboarding has not happened.
            Err(StoreError::NotFound { .. }) => false,
            Err(e) => {
                if e.is_connectivity() {
                    self.offline = true;
                    self.notices.raise(Notice::OfflineMode);
                } else {
                    self.notices.raise(Notice::BackendUnavailable);
                }
                log::warn!("could not verify onboarding status for {uid}: {e}");
                false
            }
        }
    }

    // ── User commands ────────────────────────────────────────────────

    /// Create an account, seed the user's remote profile, and sign in.
    pub fn signup(
        &mut self,
        provider: &mut dyn IdentityProvider,
        documents: &mut dyn DocumentStore,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Identity, CoreError> {
        let identity = provider.create_identity(email, password, display_name)?;

        let profile = json!({
            "display_name": display_name,
            "email": email,
            "created_at": Utc::now(),
            "onboarding_completed": false,
            "wellness": {
                "step_count": 0,
                "sedentary_hours": 0.0,
                "focus_hours": 0.0,
                "stress_level": 0,
                "wellness_score": 75,
            },
        });
        documents.set_document(USERS_COLLECTION, &identity.uid, &profile, false)?;

        self.identity = Some(identity.clone());
        self.onboarding_completed = false;
        self.initialized = true;
        Ok(identity)
    }

    /// Verify credentials and refresh onboarding status.
    pub fn login(
        &mut self,
        provider: &mut dyn IdentityProvider,
        documents: &dyn DocumentStore,
        email: &str,
        password: &str,
    ) -> Result<Identity, CoreError> {
        let identity = provider.sign_in_with_password(email, password)?;
        self.onboarding_completed = self.read_onboarding_flag(documents, &identity.uid);
        self.identity = Some(identity.clone());
        self.initialized = true;
        Ok(identity)
    }

    /// End the session.
    pub fn logout(&mut self, provider: &mut dyn IdentityProvider) -> Result<(), CoreError> {
        provider.sign_out()?;
        self.identity = None;
        self.onboarding_completed = false;
        self.pending_remote_sync = false;
        Ok(())
    }

    /// Request a password-reset message.
    pub fn reset_password(
        &mut self,
        provider: &mut dyn IdentityProvider,
        email: &str,
    ) -> Result<(), CoreError> {
        provider.send_password_reset(email)?;
        Ok(())
    }

    /// Mark onboarding complete and store the wellness goals on the remote
    /// profile.
    ///
    /// Optimistic local completion: a `PermissionDenied` or connectivity
    /// failure on the remote write still completes onboarding locally. The
    /// `LocalOnly` outcome and the `pending_remote_sync` flag record that the
    /// write is outstanding; the user is never stranded mid-flow. Other
    /// failures reject the operation.
    pub fn complete_onboarding(
        &mut self,
        documents: &mut dyn DocumentStore,
        goals: &WellnessGoals,
    ) -> Result<OnboardingOutcome, CoreError> {
        let uid = self
            .identity
            .as_ref()
            .ok_or(AuthError::NotSignedIn)?
            .uid
            .clone();

        let fields = json!({
            "onboarding_completed": true,
            "wellness_goals": goals,
        });
        match documents.set_document(USERS_COLLECTION, &uid, &fields, true) {
            Ok(()) => {
                self.onboarding_completed = true;
                self.pending_remote_sync = false;
                Ok(OnboardingOutcome::Synced)
            }
            Err(e) if e.is_connectivity() || matches!(e, StoreError::PermissionDenied(_)) => {
                if e.is_connectivity() {
                    self.offline = true;
                    self.notices.raise(Notice::OfflineMode);
                }
                log::warn!("onboarding saved locally, remote write failed: {e}");
                self.onboarding_completed = true;
                self.pending_remote_sync = true;
                self.notices.raise(Notice::OnboardingPendingSync);
                Ok(OnboardingOutcome::LocalOnly)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryIdentityProvider};

    fn signed_up_gate() -> (AuthGate, MemoryIdentityProvider, MemoryDocumentStore) {
        let mut gate = AuthGate::new();
        let mut provider = MemoryIdentityProvider::new();
        let mut documents = MemoryDocumentStore::new();
        gate.signup(
            &mut provider,
            &mut documents,
            "dev@example.com",
            "hunter2",
            "Dev",
        )
        .unwrap();
        (gate, provider, documents)
    }

    #[test]
    fn starts_loading_until_first_notification() {
        let mut gate = AuthGate::new();
        assert_eq!(gate.phase(), AuthPhase::Loading);

        let documents = MemoryDocumentStore::new();
        assert_eq!(gate.observe_identity(None, &documents), AuthPhase::SignedOut);
    }

    #[test]
    fn signup_seeds_profile_and_enters_incomplete() {
        let (gate, _, documents) = signed_up_gate();
        assert_eq!(gate.phase(), AuthPhase::SignedInIncomplete);

        let uid = &gate.identity().unwrap().uid;
        let profile = documents.get_document(USERS_COLLECTION, uid).unwrap();
        assert_eq!(profile["onboarding_completed"], serde_json::json!(false));
        assert_eq!(profile["wellness"]["wellness_score"], serde_json::json!(75));
    }

    #[test]
    fn observe_with_completed_profile_is_complete() {
        let (mut gate, _, mut documents) = signed_up_gate();
        let identity = gate.identity().unwrap().clone();
        documents
            .set_document(
                USERS_COLLECTION,
                &identity.uid,
                &serde_json::json!({"onboarding_completed": true}),
                true,
            )
            .unwrap();

        let phase = gate.observe_identity(Some(identity), &documents);
        assert_eq!(phase, AuthPhase::SignedInComplete);
    }

    #[test]
    fn profile_read_failure_fails_closed() {
        let (mut gate, _, mut documents) = signed_up_gate();
        let identity = gate.identity().unwrap().clone();
        documents.fail_with(|| StoreError::Backend("boom".into()));

        let phase = gate.observe_identity(Some(identity), &documents);
        assert_eq!(phase, AuthPhase::SignedInIncomplete);
        assert!(!gate.is_offline());
        assert_eq!(gate.drain_notices(), vec![Notice::BackendUnavailable]);
    }

    #[test]
    fn connectivity_failure_sets_offline_once() {
        let (mut gate, _, mut documents) = signed_up_gate();
        let identity = gate.identity().unwrap().clone();
        documents.fail_with(|| StoreError::NetworkUnavailable("down".into()));

        gate.observe_identity(Some(identity.clone()), &documents);
        gate.observe_identity(Some(identity), &documents);

        assert!(gate.is_offline());
        // Deduped: one notice for two failures.
        assert_eq!(gate.drain_notices(), vec![Notice::OfflineMode]);
    }

    #[test]
    fn login_refreshes_onboarding_flag() {
        let (mut gate, mut provider, mut documents) = signed_up_gate();
        let uid = gate.identity().unwrap().uid.clone();
        gate.logout(&mut provider).unwrap();
        assert_eq!(gate.phase(), AuthPhase::SignedOut);

        documents
            .set_document(
                USERS_COLLECTION,
                &uid,
                &serde_json::json!({"onboarding_completed": true}),
                true,
            )
            .unwrap();

        gate.login(&mut provider, &documents, "dev@example.com", "hunter2")
            .unwrap();
        assert_eq!(gate.phase(), AuthPhase::SignedInComplete);
    }

    #[test]
    fn login_rejects_bad_credentials() {
        let (mut gate, mut provider, documents) = signed_up_gate();
        let err = gate
            .login(&mut provider, &documents, "dev@example.com", "wrong")
            .unwrap_err();
        assert!(matches!(err, CoreError::Auth(AuthError::InvalidCredentials)));
    }

    #[test]
    fn complete_onboarding_writes_goals() {
        let (mut gate, _, mut documents) = signed_up_gate();
        let uid = gate.identity().unwrap().uid.clone();

        let outcome = gate
            .complete_onboarding(&mut documents, &WellnessGoals::default())
            .unwrap();
        assert_eq!(outcome, OnboardingOutcome::Synced);
        assert_eq!(gate.phase(), AuthPhase::SignedInComplete);
        assert!(!gate.pending_remote_sync());

        let profile = documents.get_document(USERS_COLLECTION, &uid).unwrap();
        assert_eq!(profile["onboarding_completed"], serde_json::json!(true));
        assert_eq!(
            profile["wellness_goals"]["daily_step_goal"],
            serde_json::json!(8000)
        );
        // Merge write: the seeded profile survives.
        assert_eq!(profile["email"], serde_json::json!("dev@example.com"));
    }

    #[test]
    fn onboarding_completes_locally_when_offline() {
        let (mut gate, _, mut documents) = signed_up_gate();
        documents.fail_with(|| StoreError::NetworkUnavailable("down".into()));

        let outcome = gate
            .complete_onboarding(&mut documents, &WellnessGoals::default())
            .unwrap();
        assert_eq!(outcome, OnboardingOutcome::LocalOnly);
        assert_eq!(gate.phase(), AuthPhase::SignedInComplete);
        assert!(gate.pending_remote_sync());
        assert!(gate.is_offline());

        let notices = gate.drain_notices();
        assert!(notices.contains(&Notice::OfflineMode));
        assert!(notices.contains(&Notice::OnboardingPendingSync));
    }

    #[test]
    fn onboarding_completes_locally_on_permission_denied() {
        let (mut gate, _, mut documents) = signed_up_gate();
        documents.fail_with(|| StoreError::PermissionDenied("rules".into()));

        let outcome = gate
            .complete_onboarding(&mut documents, &WellnessGoals::default())
            .unwrap();
        assert_eq!(outcome, OnboardingOutcome::LocalOnly);
        assert!(gate.pending_remote_sync());
        // Permission problems are not connectivity problems.
        assert!(!gate.is_offline());
    }

    #[test]
    fn onboarding_hard_failure_rejects() {
        let (mut gate, _, mut documents) = signed_up_gate();
        documents.fail_with(|| StoreError::Backend("500".into()));

        let err = gate
            .complete_onboarding(&mut documents, &WellnessGoals::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::Backend(_))));
        assert_eq!(gate.phase(), AuthPhase::SignedInIncomplete);
    }

    #[test]
    fn onboarding_requires_identity() {
        let mut gate = AuthGate::new();
        let mut documents = MemoryDocumentStore::new();
        let err = gate
            .complete_onboarding(&mut documents, &WellnessGoals::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::Auth(AuthError::NotSignedIn)));
    }

    #[test]
    fn logout_clears_session_state() {
        let (mut gate, mut provider, mut documents) = signed_up_gate();
        documents.fail_with(|| StoreError::NetworkUnavailable("down".into()));
        gate.complete_onboarding(&mut documents, &WellnessGoals::default())
            .unwrap();
        assert!(gate.pending_remote_sync());

        gate.logout(&mut provider).unwrap();
        assert_eq!(gate.phase(), AuthPhase::SignedOut);
        assert!(!gate.pending_remote_sync());
        assert!(!gate.onboarding_completed());
    }
}
