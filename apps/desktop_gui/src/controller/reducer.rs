//! Transfer lifecycle state machine.
//!
//! The worker reports transfer outcomes as discrete events; this reducer is
//! the only place those events become visible state. Each edge fires at most
//! once: re-delivering the same event, or delivering an outcome after the
//! notice timer already reverted the phase to Idle, is a no-op. Effects
//! (clearing the form, re-fetching chain state) are returned to the caller
//! rather than executed here, so the UI layer stays the sole owner of its
//! widgets and channels.

use std::time::{Duration, Instant};

/// How long a settled-outcome notice stays on screen before the lifecycle
/// reverts to Idle.
pub const NOTICE_DISMISS_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Discrete lifecycle inputs. `NoticeExpired` is synthesized by the UI loop
/// when the active notice passes its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEvent {
    Submitted,
    Confirmed { tx_hash: String },
    Rejected { reason: String },
    NoticeExpired,
}

/// Side effects the caller must perform after an accepted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEffect {
    ClearForm,
    RefreshTransactions,
    RefreshBalance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Success,
    Error,
}

/// Component-local notification text. No global handle: the notice lives in
/// the lifecycle and is rendered wherever the view wants it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub severity: NoticeSeverity,
    /// `None` while the outcome is still unresolved (pending notices do not
    /// time out).
    pub expires_at: Option<Instant>,
}

#[derive(Debug)]
pub struct TransferLifecycle {
    phase: TransferPhase,
    notice: Option<Notice>,
}

impl Default for TransferLifecycle {
    fn default() -> Self {
        Self {
            phase: TransferPhase::Idle,
            notice: None,
        }
    }
}

impl TransferLifecycle {
    pub fn phase(&self) -> TransferPhase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.phase == TransferPhase::Pending
    }

    /// True when the notice has a deadline that `now` has passed. The UI
    /// loop turns this into a `NoticeExpired` event.
    pub fn notice_expired(&self, now: Instant) -> bool {
        self.notice
            .as_ref()
            .and_then(|notice| notice.expires_at)
            .is_some_and(|deadline| now >= deadline)
    }

    /// Applies one event. Only the legal edges change anything; every other
    /// (phase, event) pair returns no effects and leaves the state untouched,
    /// which is what makes duplicate deliveries harmless.
    pub fn apply(&mut self, event: TransferEvent, now: Instant) -> Vec<LifecycleEffect> {
        match (self.phase, event) {
            (TransferPhase::Idle, TransferEvent::Submitted) => {
                self.phase = TransferPhase::Pending;
                self.notice = Some(Notice {
                    text: "Transfer submitted - awaiting confirmation".to_string(),
                    severity: NoticeSeverity::Info,
                    expires_at: None,
                });
                Vec::new()
            }
            (TransferPhase::Pending, TransferEvent::Confirmed { tx_hash }) => {
                self.phase = TransferPhase::Succeeded;
                self.notice = Some(Notice {
                    text: format!("Transaction complete: {tx_hash}"),
                    severity: NoticeSeverity::Success,
                    expires_at: Some(now + NOTICE_DISMISS_DELAY),
                });
                vec![
                    LifecycleEffect::ClearForm,
                    LifecycleEffect::RefreshTransactions,
                    LifecycleEffect::RefreshBalance,
                ]
            }
            (TransferPhase::Pending, TransferEvent::Rejected { reason }) => {
                tracing::warn!(%reason, "transfer rejected");
                self.phase = TransferPhase::Failed;
                // Form fields are intentionally not cleared: the user retries
                // by resubmitting what they already typed.
                self.notice = Some(Notice {
                    text: "Transaction failed".to_string(),
                    severity: NoticeSeverity::Error,
                    expires_at: Some(now + NOTICE_DISMISS_DELAY),
                });
                Vec::new()
            }
            // Idle is included for validation flashes, which carry a deadline
            // without ever entering Pending.
            (
                TransferPhase::Idle | TransferPhase::Succeeded | TransferPhase::Failed,
                TransferEvent::NoticeExpired,
            ) => {
                self.phase = TransferPhase::Idle;
                self.notice = None;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Shows a local validation notice without entering the state machine;
    /// validation failures never leave the UI thread.
    pub fn flash_error(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            text: text.into(),
            severity: NoticeSeverity::Error,
            expires_at: Some(now + NOTICE_DISMISS_DELAY),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirmed() -> TransferEvent {
        TransferEvent::Confirmed {
            tx_hash: "0xabc".to_string(),
        }
    }

    fn rejected() -> TransferEvent {
        TransferEvent::Rejected {
            reason: "user denied signature".to_string(),
        }
    }

    #[test]
    fn full_success_cycle_returns_to_idle() {
        let now = Instant::now();
        let mut lifecycle = TransferLifecycle::default();

        assert!(lifecycle.apply(TransferEvent::Submitted, now).is_empty());
        assert_eq!(lifecycle.phase(), TransferPhase::Pending);
        assert!(lifecycle.notice().expect("pending notice").expires_at.is_none());

        let effects = lifecycle.apply(confirmed(), now);
        assert_eq!(
            effects,
            vec![
                LifecycleEffect::ClearForm,
                LifecycleEffect::RefreshTransactions,
                LifecycleEffect::RefreshBalance,
            ]
        );
        assert_eq!(lifecycle.phase(), TransferPhase::Succeeded);

        assert!(lifecycle.apply(TransferEvent::NoticeExpired, now).is_empty());
        assert_eq!(lifecycle.phase(), TransferPhase::Idle);
        assert!(lifecycle.notice().is_none());
    }

    #[test]
    fn duplicate_confirmations_fire_effects_exactly_once() {
        let now = Instant::now();
        let mut lifecycle = TransferLifecycle::default();
        lifecycle.apply(TransferEvent::Submitted, now);

        let first = lifecycle.apply(confirmed(), now);
        assert_eq!(first.len(), 3);

        // Re-delivery while Succeeded, and again after the timer reverted to
        // Idle, must both be inert.
        assert!(lifecycle.apply(confirmed(), now).is_empty());
        lifecycle.apply(TransferEvent::NoticeExpired, now);
        assert!(lifecycle.apply(confirmed(), now).is_empty());
        assert_eq!(lifecycle.phase(), TransferPhase::Idle);
        assert!(lifecycle.notice().is_none());
    }

    #[test]
    fn rejection_sets_failed_without_clearing_the_form() {
        let now = Instant::now();
        let mut lifecycle = TransferLifecycle::default();
        lifecycle.apply(TransferEvent::Submitted, now);

        let effects = lifecycle.apply(rejected(), now);
        assert!(effects.is_empty());
        assert_eq!(lifecycle.phase(), TransferPhase::Failed);

        let notice = lifecycle.notice().expect("failure notice");
        assert_eq!(notice.severity, NoticeSeverity::Error);
        assert!(notice.expires_at.is_some());
    }

    #[test]
    fn resubmission_is_ignored_while_pending() {
        let now = Instant::now();
        let mut lifecycle = TransferLifecycle::default();
        lifecycle.apply(TransferEvent::Submitted, now);

        assert!(lifecycle.apply(TransferEvent::Submitted, now).is_empty());
        assert_eq!(lifecycle.phase(), TransferPhase::Pending);
    }

    #[test]
    fn outcomes_outside_pending_are_ignored() {
        let now = Instant::now();
        let mut lifecycle = TransferLifecycle::default();

        assert!(lifecycle.apply(confirmed(), now).is_empty());
        assert!(lifecycle.apply(rejected(), now).is_empty());
        assert!(lifecycle.apply(TransferEvent::NoticeExpired, now).is_empty());
        assert_eq!(lifecycle.phase(), TransferPhase::Idle);
    }

    #[test]
    fn notice_expiry_respects_the_dismiss_delay() {
        let now = Instant::now();
        let mut lifecycle = TransferLifecycle::default();
        lifecycle.apply(TransferEvent::Submitted, now);
        lifecycle.apply(confirmed(), now);

        assert!(!lifecycle.notice_expired(now));
        assert!(!lifecycle.notice_expired(now + NOTICE_DISMISS_DELAY - Duration::from_millis(1)));
        assert!(lifecycle.notice_expired(now + NOTICE_DISMISS_DELAY));
    }

    #[test]
    fn pending_notice_never_expires() {
        let now = Instant::now();
        let mut lifecycle = TransferLifecycle::default();
        lifecycle.apply(TransferEvent::Submitted, now);

        assert!(!lifecycle.notice_expired(now + Duration::from_secs(600)));
    }

    #[test]
    fn validation_flash_does_not_change_the_phase() {
        let now = Instant::now();
        let mut lifecycle = TransferLifecycle::default();

        lifecycle.flash_error("receiver address is required", now);
        assert_eq!(lifecycle.phase(), TransferPhase::Idle);
        let notice = lifecycle.notice().expect("validation notice");
        assert_eq!(notice.severity, NoticeSeverity::Error);
        assert!(notice.expires_at.is_some());
    }

    #[test]
    fn validation_notice_clears_after_its_expiry() {
        let now = Instant::now();
        let mut lifecycle = TransferLifecycle::default();
        lifecycle.flash_error("receiver address is required", now);

        let later = now + NOTICE_DISMISS_DELAY;
        assert!(lifecycle.notice_expired(later));
        assert!(lifecycle.apply(TransferEvent::NoticeExpired, later).is_empty());
        assert_eq!(lifecycle.phase(), TransferPhase::Idle);
        assert!(lifecycle.notice().is_none());
    }
}
