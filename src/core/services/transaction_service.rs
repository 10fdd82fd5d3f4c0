//! Business logic helpers for managing transactions.

use crate::core::services::{require_non_empty, ServiceError, ServiceResult};
use crate::core::store::StateContainer;
use crate::domain::{
    common::{format_instant, new_id, parse_instant},
    Transaction, TransactionType, UNCATEGORIZED_ID,
};
use crate::errors::LedgerError;
use crate::reducer::Action;

/// Raw form input for a transaction. `amount` is the text the user typed;
/// its sign comes from `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub title: String,
    pub amount: String,
    pub kind: TransactionType,
    pub date: String,
    pub category_id: Option<String>,
    pub account_id: Option<String>,
    pub receipt_uri: Option<String>,
}

impl TransactionInput {
    pub fn expense(title: impl Into<String>, amount: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            amount: amount.into(),
            kind: TransactionType::Expense,
            date: date.into(),
            category_id: None,
            account_id: None,
            receipt_uri: None,
        }
    }

    pub fn income(title: impl Into<String>, amount: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            kind: TransactionType::Income,
            ..Self::expense(title, amount, date)
        }
    }

    pub fn category(mut self, id: impl Into<String>) -> Self {
        self.category_id = Some(id.into());
        self
    }

    pub fn account(mut self, id: impl Into<String>) -> Self {
        self.account_id = Some(id.into());
        self
    }

    pub fn receipt(mut self, uri: impl Into<String>) -> Self {
        self.receipt_uri = Some(uri.into());
        self
    }
}

/// Provides validated CRUD helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Adds a new transaction and returns its identifier.
    pub fn add<S: StateContainer + ?Sized>(store: &mut S, input: TransactionInput) -> ServiceResult<String> {
        let txn = Self::build(store, new_id(), input)?;
        let id = txn.id.clone();
        store.dispatch(Action::AddTransaction(txn));
        Ok(id)
    }

    /// Replaces the transaction identified by `id` with the validated input.
    pub fn update<S: StateContainer + ?Sized>(
        store: &mut S,
        id: &str,
        input: TransactionInput,
    ) -> ServiceResult<()> {
        if store.state().transaction(id).is_none() {
            return Err(ServiceError::Invalid("Transaction not found".into()));
        }
        let txn = Self::build(store, id.to_string(), input)?;
        store.dispatch(Action::UpdateTransaction(txn));
        Ok(())
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove<S: StateContainer + ?Sized>(store: &mut S, id: &str) -> ServiceResult<Transaction> {
        let removed = store
            .state()
            .transaction(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        store.dispatch(Action::DeleteTransaction(id.to_string()));
        Ok(removed)
    }

    /// Sets or clears the receipt reference. The image itself is owned by
    /// the host's file store.
    pub fn set_receipt<S: StateContainer + ?Sized>(
        store: &mut S,
        id: &str,
        receipt_uri: Option<String>,
    ) -> ServiceResult<()> {
        let mut txn = store
            .state()
            .transaction(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        txn.receipt_uri = receipt_uri.filter(|uri| !uri.trim().is_empty());
        store.dispatch(Action::UpdateTransaction(txn));
        Ok(())
    }

    /// Returns a snapshot of the ledger's transactions.
    pub fn list<S: StateContainer + ?Sized>(store: &S) -> Vec<&Transaction> {
        store.state().transactions.iter().collect()
    }

    /// Parses user-entered amount text. Grouping commas and a leading
    /// currency symbol are accepted.
    pub fn parse_amount(raw: &str) -> ServiceResult<f64> {
        let cleaned: String = raw
            .trim()
            .trim_start_matches(|ch: char| !ch.is_ascii_digit() && ch != '-' && ch != '.')
            .chars()
            .filter(|ch| *ch != ',')
            .collect();
        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() && value != 0.0 => Ok(value.abs()),
            _ => Err(ServiceError::Invalid(format!(
                "`{}` is not a valid amount",
                raw.trim()
            ))),
        }
    }

    fn build<S: StateContainer + ?Sized>(
        store: &S,
        id: String,
        input: TransactionInput,
    ) -> ServiceResult<Transaction> {
        let title = require_non_empty(&input.title, "Title")?;
        let magnitude = Self::parse_amount(&input.amount)?;
        let date = parse_instant(&input.date)
            .map(format_instant)
            .ok_or_else(|| ServiceError::Invalid(format!("`{}` is not a valid date", input.date)))?;

        let state = store.state();
        let category_id = match input.category_id {
            Some(category_id) if state.category(&category_id).is_some() => category_id,
            Some(category_id) => {
                return Err(LedgerError::InvalidRef(format!("category `{}`", category_id)).into())
            }
            None => UNCATEGORIZED_ID.to_string(),
        };
        let account_id = match input.account_id {
            Some(account_id) if state.account(&account_id).is_some() => account_id,
            Some(account_id) => {
                return Err(LedgerError::InvalidRef(format!("account `{}`", account_id)).into())
            }
            None => state.fallback_account_id().to_string(),
        };

        let amount = match input.kind {
            TransactionType::Income => magnitude,
            TransactionType::Expense => -magnitude,
        };
        let mut txn = Transaction::new(title, amount, date, category_id, account_id).with_id(id);
        txn.receipt_uri = input.receipt_uri.filter(|uri| !uri.trim().is_empty());
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::AppStore;

    #[test]
    fn add_signs_amount_from_kind() {
        let mut store = AppStore::new();
        let id = TransactionService::add(
            &mut store,
            TransactionInput::expense("Coffee", "4.50", "2024-03-02").category("food"),
        )
        .unwrap();
        let txn = store.state().transaction(&id).unwrap();
        assert_eq!(txn.amount, -4.5);
        assert_eq!(txn.kind, TransactionType::Expense);
        assert_eq!(txn.account_id, "default-cash");
        assert_eq!(txn.date, "2024-03-02T00:00:00.000Z");
    }

    #[test]
    fn parse_amount_accepts_formatted_text() {
        assert_eq!(TransactionService::parse_amount("$1,234.50").unwrap(), 1234.5);
        assert_eq!(TransactionService::parse_amount(" -12 ").unwrap(), 12.0);
        assert!(TransactionService::parse_amount("abc").is_err());
        assert!(TransactionService::parse_amount("0").is_err());
        assert!(TransactionService::parse_amount("").is_err());
    }

    #[test]
    fn rejects_missing_title_and_unknown_refs() {
        let mut store = AppStore::new();
        assert!(TransactionService::add(&mut store, TransactionInput::expense(" ", "3", "2024-03-02")).is_err());
        let err = TransactionService::add(
            &mut store,
            TransactionInput::expense("Tea", "3", "2024-03-02").category("ghost"),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Ledger(LedgerError::InvalidRef(_))));
        assert!(TransactionService::add(
            &mut store,
            TransactionInput::expense("Tea", "3", "2024-03-02").account("ghost")
        )
        .is_err());
        assert!(TransactionService::add(&mut store, TransactionInput::expense("Tea", "3", "soon")).is_err());
        assert!(store.state().transactions.is_empty());
    }

    #[test]
    fn receipt_can_be_cleared() {
        let mut store = AppStore::new();
        let id = TransactionService::add(
            &mut store,
            TransactionInput::income("Salary", "2000", "2024-03-01").receipt("file:///r.jpg"),
        )
        .unwrap();
        assert!(store.state().transaction(&id).unwrap().receipt_uri.is_some());
        TransactionService::set_receipt(&mut store, &id, None).unwrap();
        assert!(store.state().transaction(&id).unwrap().receipt_uri.is_none());
    }
}
