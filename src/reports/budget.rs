use serde::Serialize;

use crate::domain::{common::month_key_of, Budget, Transaction};

/// Progress at or above this ratio triggers a budget alert.
pub const ALERT_THRESHOLD: f64 = 0.9;

/// Spending against one monthly budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub budget_id: String,
    pub category_id: String,
    pub month: String,
    pub budgeted: f64,
    pub spent: f64,
    pub remaining: f64,
    /// `spent / budgeted` capped at 1; zero when nothing is budgeted.
    pub progress: f64,
}

impl BudgetProgress {
    pub fn is_over_budget(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn reaches_alert_threshold(&self) -> bool {
        self.progress >= ALERT_THRESHOLD
    }
}

/// Sum of expense magnitudes booked to `category_id` during `month` (`YYYY-MM`).
pub fn spent_in_month(transactions: &[Transaction], category_id: &str, month: &str) -> f64 {
    transactions
        .iter()
        .filter(|txn| txn.is_expense() && txn.category_id == category_id)
        .filter(|txn| month_key_of(&txn.date).as_deref() == Some(month))
        .map(Transaction::expense_amount)
        .sum()
}

pub fn budget_progress(budget: &Budget, transactions: &[Transaction]) -> BudgetProgress {
    let spent = spent_in_month(transactions, &budget.category_id, &budget.month);
    let progress = if budget.amount == 0.0 {
        0.0
    } else {
        (spent / budget.amount).min(1.0)
    };
    BudgetProgress {
        budget_id: budget.id.clone(),
        category_id: budget.category_id.clone(),
        month: budget.month.clone(),
        budgeted: budget.amount,
        spent,
        remaining: (budget.amount - spent).max(0.0),
        progress,
    }
}

/// Progress of every budget for `month`, in budget order.
pub fn budgets_for_month(
    budgets: &[Budget],
    transactions: &[Transaction],
    month: &str,
) -> Vec<BudgetProgress> {
    budgets
        .iter()
        .filter(|budget| budget.month == month)
        .map(|budget| budget_progress(budget, transactions))
        .collect()
}
