use serde::Serialize;

use crate::domain::{Category, Transaction, UNCATEGORIZED_ID};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category_id: String,
    pub name: String,
    pub icon: String,
    pub total: f64,
    pub count: usize,
}

/// Expense total and count per category over the given (already filtered)
/// transactions.
///
/// Every category is reported, including those with no activity, in category
/// order. Expenses pointing at an unknown category count as uncategorized.
pub fn category_breakdown<'a, I>(transactions: I, categories: &[Category]) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut rows: Vec<CategoryTotal> = categories
        .iter()
        .map(|category| CategoryTotal {
            category_id: category.id.clone(),
            name: category.name.clone(),
            icon: category.icon.clone(),
            total: 0.0,
            count: 0,
        })
        .collect();

    for txn in transactions.into_iter().filter(|txn| txn.is_expense()) {
        let slot = rows
            .iter()
            .position(|row| row.category_id == txn.category_id)
            .or_else(|| rows.iter().position(|row| row.category_id == UNCATEGORIZED_ID));
        if let Some(idx) = slot {
            rows[idx].total += txn.expense_amount();
            rows[idx].count += 1;
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::default_categories;

    #[test]
    fn keeps_idle_categories_and_counts_expenses() {
        let ledger = vec![
            Transaction::new("Coffee", -4.5, "2024-03-01", "food", "cash"),
            Transaction::new("Bagel", -3.0, "2024-03-02", "food", "cash"),
            Transaction::new("Mystery", -1.0, "2024-03-02", "deleted", "cash"),
            Transaction::new("Paycheck", 100.0, "2024-03-02", "food", "cash"),
        ];
        let rows = category_breakdown(&ledger, &default_categories());
        assert_eq!(rows.len(), 6);
        let food = rows.iter().find(|row| row.category_id == "food").unwrap();
        assert_eq!(food.total, 7.5);
        assert_eq!(food.count, 2);
        assert_eq!(rows[0].category_id, UNCATEGORIZED_ID);
        assert_eq!(rows[0].count, 1);
        let bills = rows.iter().find(|row| row.category_id == "bills").unwrap();
        assert_eq!(bills.count, 0);
    }
}
