//! # DevWell Core Library
//!
//! Core business logic for DevWell, a wellness tracker for software
//! developers: activity aggregation (steps, sedentary time, focus time),
//! break lifecycle, wellness scoring, and the auth/onboarding gate that
//! drives navigation. The CLI binary and any GUI shell are thin layers over
//! this library.
//!
//! ## Architecture
//!
//! - **Activity Engine**: a wall-clock-based aggregation loop; the caller
//!   feeds sensor events and invokes `tick()` once per period
//! - **Break Lifecycle**: single in-flight break with append-only history
//! - **Auth Gate**: identity + onboarding state machine with optimistic
//!   local completion for offline users
//! - **Store**: blob/document/identity adapters over local files and the
//!   remote JSON-over-HTTP backend, with sequenced snapshot writes
//!
//! ## Key Components
//!
//! - [`ActivityEngine`]: tick-driven wellness state owner
//! - [`AuthGate`]: navigation gating state machine
//! - [`Config`]: TOML application configuration
//! - [`BlobStore`] / [`DocumentStore`] / [`IdentityProvider`]: persistence
//!   and identity seams

pub mod activity;
pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod sensors;
pub mod store;

pub use activity::{
    compute_wellness_score, ActivityEngine, ActivitySnapshot, ActivityState, BreakKind,
    BreakRecord, SNAPSHOT_KEY,
};
pub use auth::{AuthGate, AuthPhase, Notice, OnboardingOutcome, WellnessGoals};
pub use config::{Config, EngineConfig, RemoteConfig};
pub use error::{AuthError, ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use sensors::{MotionSample, ReplaySource, SensorEvent, SensorSource};
pub use store::{
    BlobStore, DocumentStore, FileBlobStore, Identity, IdentityProvider, MemoryBlobStore,
    MemoryDocumentStore, MemoryIdentityProvider, RestDocumentStore, RestIdentityClient, WriteQueue,
};
