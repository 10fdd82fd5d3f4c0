//! Local notification plumbing: the once-per-month budget alert and the
//! recurring daily reminder.
//!
//! Nothing here is reachable from the reducer. Callers evaluate alerts after
//! a dispatch has been applied.

pub mod alerts;
pub mod ledger;
pub mod reminder;

pub use alerts::{AlertOutcome, BudgetAlertMonitor};
pub use ledger::AlertLedger;
pub use reminder::{apply_daily_reminder, ReminderSettings, REMINDER_KEY};

/// Platform notification scheduler.
pub trait NotificationDispatcher {
    /// Asks the user for permission; `false` means nothing may be scheduled.
    fn request_permission(&mut self) -> bool;
    fn schedule_recurring(&mut self, hour: u8, minute: u8);
    fn cancel_recurring(&mut self);
    fn fire_once(&mut self, title: &str, body: &str);
}

/// Dispatcher that records every call, for embedding without a platform
/// scheduler and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingDispatcher {
    pub permission_granted: bool,
    pub recurring: Option<(u8, u8)>,
    pub fired: Vec<(String, String)>,
}

impl RecordingDispatcher {
    pub fn granted() -> Self {
        Self {
            permission_granted: true,
            ..Self::default()
        }
    }

    pub fn denied() -> Self {
        Self::default()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn request_permission(&mut self) -> bool {
        self.permission_granted
    }

    fn schedule_recurring(&mut self, hour: u8, minute: u8) {
        self.recurring = Some((hour, minute));
    }

    fn cancel_recurring(&mut self) {
        self.recurring = None;
    }

    fn fire_once(&mut self, title: &str, body: &str) {
        self.fired.push((title.to_string(), body.to_string()));
    }
}
