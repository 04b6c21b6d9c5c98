//! Fire-and-forget notification dispatch.
//!
//! Delivery (email, push, ...) is an external concern; the core only emits
//! events. Dispatch failures must never fail the operation that produced the
//! event.

use rust_decimal::Decimal;

/// Events the core emits towards campaign owners and donors.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    CampaignApproved { campaign_id: i64 },
    CampaignObserved { campaign_id: i64, rationale: String },
    CampaignRejected { campaign_id: i64, rationale: String },
    DonationReceived { campaign_id: i64, amount: Decimal },
    GoalReached { campaign_id: i64, total: Decimal },
    DonationRefunded { campaign_id: i64, donation_id: i64, amount: Decimal },
}

/// Trait for dispatching notifications to a recipient.
pub trait NotifierTrait: Send + Sync {
    /// Fire-and-forget: implementations must not return errors to the caller.
    fn notify(&self, event: NotificationEvent, recipient_user_id: i64);
}

/// Notifier that records events in the application log only.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotifierTrait for LogNotifier {
    fn notify(&self, event: NotificationEvent, recipient_user_id: i64) {
        log::info!("notify user {}: {:?}", recipient_user_id, event);
    }
}

/// Test support: an in-memory notifier usable from downstream crates' tests.
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Notifier that captures events for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub events: Mutex<Vec<(NotificationEvent, i64)>>,
    }

    impl NotifierTrait for RecordingNotifier {
        fn notify(&self, event: NotificationEvent, recipient_user_id: i64) {
            self.events.lock().unwrap().push((event, recipient_user_id));
        }
    }
}
