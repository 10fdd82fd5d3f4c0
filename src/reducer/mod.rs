//! Pure state transitions for the ledger.
//!
//! [`reduce`] never fails: invalid or stale payloads are corrected or absorbed
//! as no-ops. Validation of user input happens before an action is built, in
//! [`crate::core::services`].

pub mod actions;

use std::collections::HashSet;

use crate::domain::{
    normalize::{normalize_accounts, normalize_categories, renormalize},
    Account, AppState, Identifiable, Transaction, UNCATEGORIZED_ID,
};

pub use actions::{Action, OrphanPolicy};

/// Computes the next state. Cascades are applied in the same pass.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SetTransactions(transactions) => {
            state.transactions = dedupe_by_id(transactions.into_iter().map(renormalize));
        }
        Action::AddTransaction(txn) => {
            let txn = resolve_references(derive_kind(txn), &state);
            upsert_front(&mut state.transactions, txn);
        }
        Action::UpdateTransaction(txn) => {
            if state.transaction(&txn.id).is_some() {
                let txn = resolve_references(derive_kind(txn), &state);
                upsert_front(&mut state.transactions, txn);
            }
        }
        Action::DeleteTransaction(id) => {
            state.transactions.retain(|txn| txn.id != id);
        }

        Action::SetCategories(categories) => {
            state.categories = normalize_categories(categories);
            repair_category_refs(&mut state);
        }
        Action::AddCategory(category) => upsert(&mut state.categories, category),
        Action::UpdateCategory(patch) => {
            if let Some(existing) = state.categories.iter_mut().find(|c| c.id == patch.id) {
                patch.apply(existing);
            }
        }
        Action::DeleteCategory(id) => {
            if id != UNCATEGORIZED_ID {
                state = delete_category(state, &id);
            }
        }

        Action::SetBudgets(budgets) => {
            state.budgets = budgets;
        }
        Action::AddBudget(budget) | Action::UpdateBudget(budget) => {
            upsert(&mut state.budgets, budget)
        }
        Action::DeleteBudget(id) => {
            state.budgets.retain(|budget| budget.id != id);
        }

        Action::SetAccounts(accounts) => {
            state.accounts = normalize_accounts(accounts);
            repair_account_refs(&mut state);
        }
        Action::AddAccount(draft) | Action::UpdateAccount(draft) => {
            let position = state.accounts.iter().position(|a| a.id == draft.id);
            let merged = draft.merge_onto(position.map(|idx| &state.accounts[idx]));
            match position {
                Some(idx) => state.accounts[idx] = merged,
                None => state.accounts.push(merged),
            }
        }
        Action::DeleteAccount { id, orphans } => {
            state = delete_account(state, &id, orphans);
        }

        Action::SetDateFilter(filter) => state.date_filter = filter,
        Action::SetCurrency(currency) => state.currency = currency,
        Action::SetThemePreference(theme) => state.theme_preference = theme,
        Action::SetNotificationPreferences(prefs) => state.notification_preferences = prefs,

        Action::ReconcileReferences => {
            state.categories = normalize_categories(std::mem::take(&mut state.categories));
            state.accounts = normalize_accounts(std::mem::take(&mut state.accounts));
            let transactions = std::mem::take(&mut state.transactions);
            state.transactions = transactions
                .into_iter()
                .map(|txn| resolve_references(txn, &state))
                .collect();
        }
    }
    state
}

/// The amount's sign is authoritative on every write; a caller-supplied
/// `kind` is discarded.
fn derive_kind(mut txn: Transaction) -> Transaction {
    if !txn.amount.is_finite() {
        txn.amount = 0.0;
    }
    txn.rederive_kind();
    txn
}

/// Points dangling category references at `uncategorized` and dangling
/// account references at the first account.
fn resolve_references(mut txn: Transaction, state: &AppState) -> Transaction {
    if state.category(&txn.category_id).is_none() {
        txn.category_id = UNCATEGORIZED_ID.to_string();
    }
    if state.account(&txn.account_id).is_none() {
        txn.account_id = state.fallback_account_id().to_string();
    }
    txn
}

/// Only category ids are touched, so a replaced category list cannot
/// clobber account ids whose slice has not loaded yet.
fn repair_category_refs(state: &mut AppState) {
    let known: HashSet<String> = state.categories.iter().map(|c| c.id.clone()).collect();
    for txn in state.transactions.iter_mut() {
        if !known.contains(&txn.category_id) {
            txn.category_id = UNCATEGORIZED_ID.to_string();
        }
    }
}

fn repair_account_refs(state: &mut AppState) {
    let known: HashSet<String> = state.accounts.iter().map(|a| a.id.clone()).collect();
    let fallback = state.fallback_account_id().to_string();
    for txn in state.transactions.iter_mut() {
        if !known.contains(&txn.account_id) {
            txn.account_id = fallback.clone();
        }
    }
}

/// Replaces the entity with the same id in place, or appends it.
fn upsert<T: Identifiable>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

fn upsert_front<T: Identifiable>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(existing) => *existing = item,
        None => items.insert(0, item),
    }
}

/// Keeps the first occurrence of every id.
fn dedupe_by_id<T: Identifiable>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(item.id().to_string()))
        .collect()
}

fn delete_category(mut state: AppState, id: &str) -> AppState {
    state.categories.retain(|category| category.id != id);
    if state.categories.is_empty() {
        state.categories = normalize_categories(Vec::new());
    }
    for txn in state.transactions.iter_mut() {
        if txn.category_id == id {
            txn.category_id = UNCATEGORIZED_ID.to_string();
        }
    }
    state.budgets.retain(|budget| budget.category_id != id);
    state
}

fn delete_account(mut state: AppState, id: &str, orphans: OrphanPolicy) -> AppState {
    if state.account(id).is_none() {
        return state;
    }
    state.accounts.retain(|account| account.id != id);
    if state.accounts.is_empty() {
        state.accounts.push(Account::default_cash());
    }
    match orphans {
        OrphanPolicy::Reassign(target) => {
            let target = if target != id && state.account(&target).is_some() {
                target
            } else {
                state.fallback_account_id().to_string()
            };
            for txn in state.transactions.iter_mut() {
                if txn.account_id == id {
                    txn.account_id = target.clone();
                }
            }
        }
        OrphanPolicy::Purge => {
            state.transactions.retain(|txn| txn.account_id != id);
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountKind, Budget, Category, CategoryPatch, TransactionType};

    fn expense(id: &str, category: &str, account: &str) -> Transaction {
        Transaction::new(id, -10.0, "2024-03-01", category, account).with_id(id)
    }

    #[test]
    fn add_transaction_inserts_first_and_rederives_type() {
        let state = AppState::default();
        let first = reduce(state, Action::AddTransaction(expense("a", "food", "default-cash")));
        let mut claimed_income = expense("b", "food", "default-cash");
        claimed_income.kind = TransactionType::Income;
        let next = reduce(first, Action::AddTransaction(claimed_income));
        assert_eq!(next.transactions[0].id, "b");
        assert_eq!(next.transactions[0].kind, TransactionType::Expense);
        assert_eq!(next.transactions[1].id, "a");
    }

    #[test]
    fn update_transaction_replaces_in_place() {
        let mut state = AppState::default();
        state = reduce(state, Action::AddTransaction(expense("a", "food", "default-cash")));
        state = reduce(state, Action::AddTransaction(expense("b", "food", "default-cash")));
        let mut edited = expense("a", "bills", "default-cash");
        edited.set_amount(25.0);
        state = reduce(state, Action::UpdateTransaction(edited));
        assert_eq!(state.transactions.len(), 2);
        assert_eq!(state.transactions[1].id, "a");
        assert_eq!(state.transactions[1].category_id, "bills");
        assert_eq!(state.transactions[1].kind, TransactionType::Income);
    }

    #[test]
    fn update_of_unknown_transaction_is_ignored() {
        let state = reduce(
            AppState::default(),
            Action::UpdateTransaction(expense("ghost", "food", "default-cash")),
        );
        assert!(state.transactions.is_empty());
    }

    #[test]
    fn dangling_references_fall_back_on_add() {
        let state = reduce(
            AppState::default(),
            Action::AddTransaction(expense("a", "ghost", "nowhere")),
        );
        assert_eq!(state.transactions[0].category_id, UNCATEGORIZED_ID);
        assert_eq!(state.transactions[0].account_id, "default-cash");
    }

    #[test]
    fn reserved_category_survives_delete() {
        let state = reduce(AppState::default(), Action::DeleteCategory(UNCATEGORIZED_ID.into()));
        assert!(state.category(UNCATEGORIZED_ID).is_some());
        assert_eq!(state.categories.len(), 6);
    }

    #[test]
    fn deleting_only_custom_category_keeps_reserved_one() {
        let mut state = reduce(
            AppState::default(),
            Action::SetCategories(vec![Category::with_id("pets", "Pets", "paw")]),
        );
        assert_eq!(state.categories.len(), 2);
        state = reduce(state, Action::DeleteCategory("pets".into()));
        assert_eq!(state.categories.len(), 1);
        assert!(state.categories[0].is_reserved());
    }

    #[test]
    fn update_category_merges_supplied_fields() {
        let state = reduce(
            AppState::default(),
            Action::UpdateCategory(CategoryPatch::new("food").icon("pizza")),
        );
        let food = state.category("food").unwrap();
        assert_eq!(food.name, "Food");
        assert_eq!(food.icon, "pizza");
    }

    #[test]
    fn budgets_are_stored_without_uniqueness_checks() {
        let mut state = AppState::default();
        state = reduce(state, Action::AddBudget(Budget::new("food", 100.0, "2024-03")));
        state = reduce(state, Action::AddBudget(Budget::new("food", 50.0, "2024-03")));
        assert_eq!(state.budgets.len(), 2);
    }

    #[test]
    fn set_transactions_drops_duplicate_ids() {
        let txn = expense("a", "food", "default-cash");
        let state = reduce(
            AppState::default(),
            Action::SetTransactions(vec![txn.clone(), txn]),
        );
        assert_eq!(state.transactions.len(), 1);
    }

    #[test]
    fn deleting_unknown_account_is_a_no_op() {
        let mut state = reduce(
            AppState::default(),
            Action::AddTransaction(expense("a", "food", "default-cash")),
        );
        state = reduce(state, Action::delete_account("missing", None));
        assert_eq!(state.transactions.len(), 1);
        assert_eq!(state.accounts.len(), 1);
    }

    #[test]
    fn reconcile_repairs_hydrated_references() {
        let mut state = AppState::default();
        state = reduce(
            state,
            Action::SetTransactions(vec![expense("a", "ghost", "ghost-account")]),
        );
        assert_eq!(state.transactions[0].account_id, "ghost-account");
        state = reduce(state, Action::ReconcileReferences);
        assert_eq!(state.transactions[0].category_id, UNCATEGORIZED_ID);
        assert_eq!(state.transactions[0].account_id, "default-cash");
    }

    #[test]
    fn replacing_categories_repairs_category_refs_only() {
        let mut state = reduce(
            AppState::default(),
            Action::SetTransactions(vec![expense("a", "food", "not-loaded-yet")]),
        );
        state = reduce(
            state,
            Action::SetCategories(vec![Category::with_id("pets", "Pets", "paw")]),
        );
        assert_eq!(state.transactions[0].category_id, UNCATEGORIZED_ID);
        assert_eq!(state.transactions[0].account_id, "not-loaded-yet");
    }

    #[test]
    fn replacing_accounts_moves_orphans_to_first_account() {
        let mut state = reduce(
            AppState::default(),
            Action::AddTransaction(expense("a", "food", "default-cash")),
        );
        let bank = Account::new("Bank", AccountKind::Bank).with_id("bank");
        state = reduce(state, Action::SetAccounts(vec![bank]));
        assert_eq!(state.transactions[0].account_id, "bank");
        assert_eq!(state.transactions[0].category_id, "food");
    }
}
