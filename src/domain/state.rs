use serde::{Deserialize, Serialize};

use super::{
    account::{Account, DEFAULT_ACCOUNT_ID},
    budget::Budget,
    category::{default_categories, Category},
    filter::DateFilter,
    preferences::{CurrencyOption, NotificationPreferences, ThemePreference},
    transaction::Transaction,
};

/// Aggregate root holding every entity of the ledger.
///
/// Entities point at each other through id strings only; the reducer is the
/// only code path that produces a new `AppState`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub accounts: Vec<Account>,
    pub date_filter: DateFilter,
    pub currency: CurrencyOption,
    pub theme_preference: ThemePreference,
    pub notification_preferences: NotificationPreferences,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            categories: default_categories(),
            budgets: Vec::new(),
            accounts: vec![Account::default_cash()],
            date_filter: DateFilter::default(),
            currency: CurrencyOption::default(),
            theme_preference: ThemePreference::default(),
            notification_preferences: NotificationPreferences::default(),
        }
    }
}

impl AppState {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn budget(&self, id: &str) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub fn budget_for(&self, category_id: &str, month: &str) -> Option<&Budget> {
        self.budgets
            .iter()
            .find(|budget| budget.covers(category_id, month))
    }

    /// Id used when a transaction's account reference is missing or dangling.
    pub fn fallback_account_id(&self) -> &str {
        self.accounts
            .first()
            .map(|account| account.id.as_str())
            .unwrap_or(DEFAULT_ACCOUNT_ID)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::UNCATEGORIZED_ID;

    #[test]
    fn default_state_satisfies_non_empty_invariants() {
        let state = AppState::default();
        assert_eq!(state.accounts.len(), 1);
        assert_eq!(state.fallback_account_id(), DEFAULT_ACCOUNT_ID);
        assert!(state.category(UNCATEGORIZED_ID).is_some());
        assert!(state.transactions.is_empty());
    }
}
