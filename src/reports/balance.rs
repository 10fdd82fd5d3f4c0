use serde::Serialize;

use crate::domain::{Account, Transaction};

/// Income and expense sums over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    /// Positive magnitude of all negative amounts.
    pub expense: f64,
    pub net: f64,
}

/// `initial_balance` plus every amount booked against the account.
pub fn account_balance(account: &Account, transactions: &[Transaction]) -> f64 {
    account.initial_balance
        + transactions
            .iter()
            .filter(|txn| txn.account_id == account.id)
            .map(|txn| txn.amount)
            .sum::<f64>()
}

/// "All accounts" balance; accounts excluded from the balance are skipped.
pub fn total_balance(accounts: &[Account], transactions: &[Transaction]) -> f64 {
    accounts
        .iter()
        .filter(|account| account.include_in_balance)
        .map(|account| account_balance(account, transactions))
        .sum()
}

pub fn income_expense_totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = Totals::default();
    for txn in transactions {
        if txn.amount >= 0.0 {
            totals.income += txn.amount;
        } else {
            totals.expense += txn.amount.abs();
        }
    }
    totals.net = totals.income - totals.expense;
    totals
}
