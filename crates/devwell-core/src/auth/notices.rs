//! Session-scoped one-time notices.
//!
//! The shell shows each of these at most once per session. Dedup state lives
//! here, owned by the auth gate, instead of in ambient globals.

use serde::{Deserialize, Serialize};

/// A user-facing notice produced by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Connectivity to the backend was lost; features may be limited.
    OfflineMode,
    /// The backend rejected or failed a call for the first time this session.
    BackendUnavailable,
    /// Onboarding finished locally but the remote write is pending sync.
    OnboardingPendingSync,
}

/// Dedup ledger plus pending queue for session notices.
#[derive(Debug, Default)]
pub struct SessionNotices {
    shown_offline: bool,
    shown_backend: bool,
    shown_pending_sync: bool,
    pending: Vec<Notice>,
}

impl SessionNotices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `notice` unless it was already raised this session.
    pub fn raise(&mut self, notice: Notice) {
        let shown = match notice {
            Notice::OfflineMode => &mut self.shown_offline,
            Notice::BackendUnavailable => &mut self.shown_backend,
            Notice::OnboardingPendingSync => &mut self.shown_pending_sync,
        };
        if !*shown {
            *shown = true;
            self.pending.push(notice);
        }
    }

    /// Hand pending notices to the shell for display.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_notice_fires_once_per_session() {
        let mut notices = SessionNotices::new();
        notices.raise(Notice::OfflineMode);
        notices.raise(Notice::OfflineMode);
        notices.raise(Notice::BackendUnavailable);

        assert_eq!(
            notices.drain(),
            vec![Notice::OfflineMode, Notice::BackendUnavailable]
        );
        assert!(notices.drain().is_empty());

        // Still deduped after draining.
        notices.raise(Notice::OfflineMode);
        assert!(notices.drain().is_empty());
    }
}
