use std::collections::HashSet;

use crate::domain::{AppState, Displayable};

/// Detects dangling references and duplicate budgets within a state snapshot.
pub fn state_warnings(state: &AppState) -> Vec<String> {
    let account_ids: HashSet<_> = state.accounts.iter().map(|a| a.id.as_str()).collect();
    let category_ids: HashSet<_> = state.categories.iter().map(|c| c.id.as_str()).collect();
    let mut warnings = Vec::new();

    for txn in &state.transactions {
        if !account_ids.contains(txn.account_id.as_str()) {
            warnings.push(format!(
                "transaction {} references unknown account {}",
                txn.display_label(),
                txn.account_id
            ));
        }
        if !category_ids.contains(txn.category_id.as_str()) {
            warnings.push(format!(
                "transaction {} references missing category {}",
                txn.display_label(),
                txn.category_id
            ));
        }
    }

    let mut budget_keys = HashSet::new();
    for budget in &state.budgets {
        if !category_ids.contains(budget.category_id.as_str()) {
            warnings.push(format!(
                "budget {} references missing category {}",
                budget.id, budget.category_id
            ));
        }
        if !budget_keys.insert((budget.category_id.as_str(), budget.month.as_str())) {
            warnings.push(format!(
                "budget {} duplicates category {} for {}",
                budget.id, budget.category_id, budget.month
            ));
        }
    }
    warnings
}
