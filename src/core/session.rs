use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    config::{Config, ConfigManager},
    domain::{common::month_key_of, AppState},
    errors::LedgerError,
    notifications::{
        apply_daily_reminder, AlertOutcome, BudgetAlertMonitor, NotificationDispatcher,
        ReminderSettings,
    },
    persistence::{JsonFileStore, KeyValueStore, PersistReport, PersistenceCoordinator, Slice},
    reducer::Action,
    reports::{monthly_trend, MonthlyTotal},
};

use super::store::{AppStore, StateContainer};

/// A state container wired to a key-value store.
///
/// Every dispatch is followed by a write-back pass, so the store mirrors the
/// state of each hydrated slice.
pub struct LedgerSession {
    store: AppStore,
    coordinator: PersistenceCoordinator,
    alerts: BudgetAlertMonitor<Arc<dyn KeyValueStore>>,
    trend_months: usize,
    last_report: PersistReport,
}

impl LedgerSession {
    /// Creates a session with nothing hydrated yet.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(kv, &Config::default())
    }

    pub fn with_config(kv: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        let initial = AppState {
            currency: config.currency(),
            ..AppState::default()
        };
        Self {
            store: AppStore::with_state(initial),
            coordinator: PersistenceCoordinator::new(kv.clone()),
            alerts: BudgetAlertMonitor::with_threshold(kv, config.alert_threshold()),
            trend_months: config.trend_months,
            last_report: PersistReport::default(),
        }
    }

    /// Creates a session and hydrates every slice.
    pub fn open(kv: Arc<dyn KeyValueStore>) -> Self {
        let mut session = Self::new(kv);
        session.hydrate_all();
        session
    }

    /// Opens the file-backed ledger described by `config`. Tracing is set up
    /// with the config's log filter unless it was already initialized.
    pub fn open_with_config(manager: &ConfigManager, config: &Config) -> Result<Self, LedgerError> {
        crate::init_with_config(config);
        let root = manager.store_dir(config);
        let kv: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(root.clone())?);
        info!(root = %root.display(), "opening ledger");
        let mut session = Self::with_config(kv, config);
        session.hydrate_all();
        Ok(session)
    }

    /// Hydrates one slice and writes back whatever became persistable.
    pub fn hydrate_slice(&mut self, slice: Slice) -> &PersistReport {
        let coordinator = &mut self.coordinator;
        self.store
            .replace_with(|state| coordinator.hydrate_slice(slice, state));
        self.persist()
    }

    pub fn hydrate_all(&mut self) -> &PersistReport {
        let coordinator = &mut self.coordinator;
        self.store.replace_with(|state| coordinator.hydrate_all(state));
        self.persist()
    }

    pub fn is_hydrated(&self, slice: Slice) -> bool {
        self.coordinator.is_hydrated(slice)
    }

    pub fn is_ready(&self) -> bool {
        self.coordinator.is_ready()
    }

    /// Applies `action` and persists the affected slices.
    pub fn apply(&mut self, action: Action) -> &PersistReport {
        self.store.dispatch(action);
        self.persist()
    }

    pub fn persist(&mut self) -> &PersistReport {
        self.last_report = self.coordinator.persist(self.store.state());
        &self.last_report
    }

    pub fn last_report(&self) -> &PersistReport {
        &self.last_report
    }

    pub fn evaluate_budget_alert<D>(
        &self,
        category_id: &str,
        month: &str,
        dispatcher: &mut D,
    ) -> AlertOutcome
    where
        D: NotificationDispatcher + ?Sized,
    {
        self.alerts
            .evaluate(self.store.state(), category_id, month, dispatcher)
    }

    /// Evaluates the budget a transaction books against, if it has a usable
    /// date.
    pub fn evaluate_alert_for<D>(
        &self,
        transaction_id: &str,
        dispatcher: &mut D,
    ) -> Option<AlertOutcome>
    where
        D: NotificationDispatcher + ?Sized,
    {
        let txn = self.store.state().transaction(transaction_id)?;
        let month = month_key_of(&txn.date)?;
        Some(self.evaluate_budget_alert(&txn.category_id, &month, dispatcher))
    }

    /// Stores the reminder schedule from the notification preferences and
    /// applies it through `dispatcher`.
    pub fn apply_daily_reminder<D>(&self, dispatcher: &mut D) -> bool
    where
        D: NotificationDispatcher + ?Sized,
    {
        let settings = ReminderSettings::from(self.store.state().notification_preferences);
        if let Err(err) = settings.save(self.coordinator.store().as_ref()) {
            warn!(error = %err, "failed to store reminder settings");
        }
        apply_daily_reminder(dispatcher, settings)
    }

    /// Expense trend over the configured number of months ending at `today`.
    pub fn trend(&self, today: NaiveDate) -> Vec<MonthlyTotal> {
        monthly_trend(&self.store.state().transactions, self.trend_months, today)
    }
}

impl StateContainer for LedgerSession {
    fn state(&self) -> &AppState {
        self.store.state()
    }

    fn dispatch(&mut self, action: Action) {
        self.apply(action);
    }
}
