use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    domain::NotificationPreferences,
    persistence::{KeyValueStore, Result},
};

use super::NotificationDispatcher;

/// Storage key of the persisted reminder schedule.
pub const REMINDER_KEY: &str = "dailyReminder";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    pub enabled: bool,
    pub hour: u8,
    pub minute: u8,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        NotificationPreferences::default().into()
    }
}

impl From<NotificationPreferences> for ReminderSettings {
    fn from(prefs: NotificationPreferences) -> Self {
        let prefs = prefs.clamped();
        Self {
            enabled: prefs.daily_reminder_enabled,
            hour: prefs.daily_reminder_hour,
            minute: prefs.daily_reminder_minute,
        }
    }
}

impl ReminderSettings {
    pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
        let bytes = match store.read(REMINDER_KEY) {
            Ok(bytes) => bytes?,
            Err(err) => {
                warn!(error = %err, "failed to read reminder settings");
                return None;
            }
        };
        match serde_json::from_slice::<ReminderSettings>(&bytes) {
            Ok(settings) => Some(settings),
            Err(err) => {
                warn!(error = %err, "ignoring malformed reminder settings");
                None
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        store.write(REMINDER_KEY, &serde_json::to_vec(self)?)
    }
}

/// Schedules or cancels the daily reminder.
///
/// Returns `false` when permission is denied; nothing is scheduled then and
/// any existing reminder is left as is.
pub fn apply_daily_reminder<D>(dispatcher: &mut D, settings: ReminderSettings) -> bool
where
    D: NotificationDispatcher + ?Sized,
{
    if !settings.enabled {
        dispatcher.cancel_recurring();
        info!("daily reminder cancelled");
        return true;
    }
    if !dispatcher.request_permission() {
        warn!("notification permission denied; daily reminder not scheduled");
        return false;
    }
    dispatcher.cancel_recurring();
    dispatcher.schedule_recurring(settings.hour.min(23), settings.minute.min(59));
    info!(hour = settings.hour, minute = settings.minute, "daily reminder scheduled");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{notifications::RecordingDispatcher, persistence::MemoryStore};

    fn enabled_at(hour: u8, minute: u8) -> ReminderSettings {
        ReminderSettings {
            enabled: true,
            hour,
            minute,
        }
    }

    #[test]
    fn schedules_when_permitted() {
        let mut dispatcher = RecordingDispatcher::granted();
        assert!(apply_daily_reminder(&mut dispatcher, enabled_at(8, 30)));
        assert_eq!(dispatcher.recurring, Some((8, 30)));
    }

    #[test]
    fn permission_denied_schedules_nothing() {
        let mut dispatcher = RecordingDispatcher::denied();
        assert!(!apply_daily_reminder(&mut dispatcher, enabled_at(8, 30)));
        assert_eq!(dispatcher.recurring, None);
    }

    #[test]
    fn disabling_cancels() {
        let mut dispatcher = RecordingDispatcher::granted();
        apply_daily_reminder(&mut dispatcher, enabled_at(21, 0));
        assert!(apply_daily_reminder(&mut dispatcher, ReminderSettings::default()));
        assert_eq!(dispatcher.recurring, None);
    }

    #[test]
    fn settings_persist_under_reminder_key() {
        let store = MemoryStore::new();
        enabled_at(7, 15).save(&store).unwrap();
        assert_eq!(store.keys(), [REMINDER_KEY]);
        assert_eq!(ReminderSettings::load(&store), Some(enabled_at(7, 15)));
    }
}
