//! Auth gate against the REST-backed stores (mocked backend).

use devwell_core::{
    AuthGate, AuthPhase, Identity, RestDocumentStore, RestIdentityClient, WellnessGoals,
};

fn identity_body() -> &'static str {
    r#"{"uid":"u42","email":"dev@example.com","display_name":"Dev"}"#
}

#[test]
fn login_against_backend_reaches_complete() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/identity/sign-in")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(identity_body())
        .create();
    server
        .mock("GET", "/users/u42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"onboarding_completed": true}"#)
        .create();

    let mut provider = RestIdentityClient::new(server.url(), None, 5).unwrap();
    let documents = RestDocumentStore::new(server.url(), None, 5).unwrap();

    let mut gate = AuthGate::new();
    gate.login(&mut provider, &documents, "dev@example.com", "hunter2")
        .unwrap();
    assert_eq!(gate.phase(), AuthPhase::SignedInComplete);
}

#[test]
fn unreachable_backend_fails_closed_and_flags_offline() {
    // Nothing listens on the discard port.
    let documents = RestDocumentStore::new("http://127.0.0.1:9", None, 2).unwrap();

    let mut gate = AuthGate::new();
    let identity = Identity {
        uid: "u42".to_string(),
        email: "dev@example.com".to_string(),
        display_name: None,
    };
    let phase = gate.observe_identity(Some(identity), &documents);

    assert_eq!(phase, AuthPhase::SignedInIncomplete);
    assert!(gate.is_offline());
}

#[test]
fn onboarding_syncs_goals_through_merge_write() {
    let mut server = mockito::Server::new();
    let patch = server
        .mock("PATCH", "/users/u42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create();
    server
        .mock("GET", "/users/u42")
        .with_status(404)
        .create();

    let mut documents = RestDocumentStore::new(server.url(), None, 5).unwrap();
    let mut gate = AuthGate::new();
    let identity = Identity {
        uid: "u42".to_string(),
        email: "dev@example.com".to_string(),
        display_name: None,
    };
    // No profile document yet: incomplete.
    assert_eq!(
        gate.observe_identity(Some(identity), &documents),
        AuthPhase::SignedInIncomplete
    );

    gate.complete_onboarding(&mut documents, &WellnessGoals::default())
        .unwrap();
    assert_eq!(gate.phase(), AuthPhase::SignedInComplete);
    patch.assert();
}
