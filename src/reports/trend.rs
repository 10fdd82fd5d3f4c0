use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{common::month_key_of, Transaction};

/// Longest window a trend covers; larger requests are clamped.
pub const MAX_TREND_MONTHS: usize = 1200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month: String,
    pub expense: f64,
}

/// Expense totals for the trailing `months` calendar months ending with the
/// month of `today`, oldest first. Months without expenses report zero.
/// `months` is capped at [`MAX_TREND_MONTHS`].
pub fn monthly_trend(transactions: &[Transaction], months: usize, today: NaiveDate) -> Vec<MonthlyTotal> {
    let mut sums: HashMap<String, f64> = HashMap::new();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        if let Some(key) = month_key_of(&txn.date) {
            *sums.entry(key).or_insert(0.0) += txn.expense_amount();
        }
    }

    let span = i32::try_from(months.min(MAX_TREND_MONTHS)).unwrap_or(0);
    let current = today.year() * 12 + today.month0() as i32;
    (0..span)
        .rev()
        .map(|offset| {
            let index = current - offset;
            let month = format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1);
            let expense = sums.get(&month).copied().unwrap_or(0.0);
            MonthlyTotal { month, expense }
        })
        .collect()
}
