use tracing::{info, warn};

use crate::{
    domain::AppState,
    persistence::KeyValueStore,
    reports::{budget_progress, BudgetProgress, ALERT_THRESHOLD},
};

use super::{AlertLedger, NotificationDispatcher};

#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    /// No budget exists for the category and month.
    NoBudget,
    BelowThreshold(BudgetProgress),
    AlreadyFired(BudgetProgress),
    Fired(BudgetProgress),
}

impl AlertOutcome {
    pub fn fired(&self) -> bool {
        matches!(self, AlertOutcome::Fired(_))
    }
}

/// Fires at most one alert per category and month once spending crosses the
/// threshold.
pub struct BudgetAlertMonitor<S: KeyValueStore> {
    ledger: AlertLedger<S>,
    threshold: f64,
}

impl<S: KeyValueStore> BudgetAlertMonitor<S> {
    pub fn new(store: S) -> Self {
        Self::with_threshold(store, ALERT_THRESHOLD)
    }

    pub fn with_threshold(store: S, threshold: f64) -> Self {
        Self {
            ledger: AlertLedger::new(store),
            threshold,
        }
    }

    pub fn ledger(&self) -> &AlertLedger<S> {
        &self.ledger
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Checks the budget for `category_id` in `month` against the current
    /// state and notifies through `dispatcher` on the first crossing.
    ///
    /// The flag is only read and written here, so callers must evaluate
    /// from the same place they dispatch.
    pub fn evaluate<D>(
        &self,
        state: &AppState,
        category_id: &str,
        month: &str,
        dispatcher: &mut D,
    ) -> AlertOutcome
    where
        D: NotificationDispatcher + ?Sized,
    {
        let Some(budget) = state.budget_for(category_id, month) else {
            return AlertOutcome::NoBudget;
        };
        let progress = budget_progress(budget, &state.transactions);
        if progress.progress < self.threshold {
            return AlertOutcome::BelowThreshold(progress);
        }
        if self.ledger.has_fired(category_id, month) {
            return AlertOutcome::AlreadyFired(progress);
        }

        let name = state
            .category(category_id)
            .map(|category| category.name.as_str())
            .unwrap_or(category_id);
        let title = format!("{} budget alert", name);
        let body = format!(
            "You've spent {}{:.2} of your {}{:.2} {} budget for {}.",
            state.currency.symbol, progress.spent, state.currency.symbol, progress.budgeted, name, month
        );
        dispatcher.fire_once(&title, &body);
        info!(category = category_id, month, spent = progress.spent, "budget alert fired");
        if let Err(err) = self.ledger.mark_fired(category_id, month) {
            warn!(category = category_id, month, error = %err, "failed to record budget alert");
        }
        AlertOutcome::Fired(progress)
    }
}
