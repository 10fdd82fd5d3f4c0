use std::fmt;

use serde_json::Value;
use tracing::warn;

use crate::{
    domain::{
        normalize::{
            normalize_account, normalize_budget, normalize_category, normalize_currency,
            normalize_date_filter, normalize_notification_preferences, normalize_theme,
            normalize_transaction_value,
        },
        AppState,
    },
    errors::LedgerError,
    reducer::Action,
};

use super::Result;

/// Independently hydrated and persisted portion of [`AppState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slice {
    Transactions,
    Categories,
    DateFilter,
    Budgets,
    Accounts,
    Currency,
    ThemePreference,
    NotificationPreferences,
}

impl Slice {
    pub const ALL: [Slice; 8] = [
        Slice::Transactions,
        Slice::Categories,
        Slice::DateFilter,
        Slice::Budgets,
        Slice::Accounts,
        Slice::Currency,
        Slice::ThemePreference,
        Slice::NotificationPreferences,
    ];

    /// Storage key of the slice.
    pub fn key(self) -> &'static str {
        match self {
            Slice::Transactions => "transactions",
            Slice::Categories => "categories",
            Slice::DateFilter => "dateFilter",
            Slice::Budgets => "budgets",
            Slice::Accounts => "accounts",
            Slice::Currency => "currency",
            Slice::ThemePreference => "themePreference",
            Slice::NotificationPreferences => "notificationPreferences",
        }
    }

    /// Serializes this slice's portion of the state.
    pub fn encode(self, state: &AppState) -> Result<Vec<u8>> {
        let bytes = match self {
            Slice::Transactions => serde_json::to_vec(&state.transactions)?,
            Slice::Categories => serde_json::to_vec(&state.categories)?,
            Slice::DateFilter => serde_json::to_vec(&state.date_filter)?,
            Slice::Budgets => serde_json::to_vec(&state.budgets)?,
            Slice::Accounts => serde_json::to_vec(&state.accounts)?,
            Slice::Currency => serde_json::to_vec(&state.currency)?,
            Slice::ThemePreference => serde_json::to_vec(&state.theme_preference)?,
            Slice::NotificationPreferences => {
                serde_json::to_vec(&state.notification_preferences)?
            }
        };
        Ok(bytes)
    }

    /// Parses and normalizes stored bytes into the slice's set action.
    ///
    /// Fails only when the payload is not JSON or a list slice is not a list;
    /// individual bad records inside a list are skipped.
    pub fn decode(self, bytes: &[u8]) -> Result<Action> {
        let value: Value = serde_json::from_slice(bytes)?;
        let action = match self {
            Slice::Transactions => Action::SetTransactions(
                records(self, &value)?
                    .iter()
                    .filter_map(|record| skip_invalid(self, normalize_transaction_value(record)))
                    .collect(),
            ),
            Slice::Categories => Action::SetCategories(
                records(self, &value)?
                    .iter()
                    .filter_map(|record| skip_invalid(self, normalize_category(record)))
                    .collect(),
            ),
            Slice::Budgets => Action::SetBudgets(
                records(self, &value)?
                    .iter()
                    .filter_map(|record| skip_invalid(self, normalize_budget(record)))
                    .collect(),
            ),
            Slice::Accounts => Action::SetAccounts(
                records(self, &value)?
                    .iter()
                    .filter_map(|record| skip_invalid(self, normalize_account(record)))
                    .collect(),
            ),
            Slice::DateFilter => Action::SetDateFilter(normalize_date_filter(&value)),
            Slice::Currency => Action::SetCurrency(normalize_currency(&value)),
            Slice::ThemePreference => Action::SetThemePreference(normalize_theme(&value)),
            Slice::NotificationPreferences => {
                Action::SetNotificationPreferences(normalize_notification_preferences(&value))
            }
        };
        Ok(action)
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn records(slice: Slice, value: &Value) -> Result<&Vec<Value>> {
    value.as_array().ok_or_else(|| {
        LedgerError::Storage(format!("slice `{}` is not a list", slice.key()))
    })
}

fn skip_invalid<T>(slice: Slice, record: Option<T>) -> Option<T> {
    if record.is_none() {
        warn!(slice = slice.key(), "skipping unusable stored record");
    }
    record
}
