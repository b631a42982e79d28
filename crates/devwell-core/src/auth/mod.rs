//! Authentication and onboarding gating.

pub mod gate;
pub mod goals;
pub mod notices;

pub use gate::{AuthGate, AuthPhase, OnboardingOutcome, USERS_COLLECTION};
pub use goals::WellnessGoals;
pub use notices::{Notice, SessionNotices};
