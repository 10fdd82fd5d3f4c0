use chrono::{DateTime, Utc};

use crate::domain::{
    common::parse_instant, Account, Category, DateFilter, Identifiable, NamedEntity, Transaction,
};

/// Selection applied before totals and breakdowns are computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    pub account_id: Option<String>,
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub search: Option<String>,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Restricts to the filter's inclusive bounds. A filter whose bounds do
    /// not parse leaves the range unrestricted.
    pub fn within(mut self, filter: &DateFilter) -> Self {
        self.range = filter.bounds();
        self
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.range = Some((start, end));
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }
}

/// Applies account, then date range, then free-text search.
///
/// Search matches case-insensitively against the title and the resolved
/// category and account names.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    query: &TransactionQuery,
    categories: &[Category],
    accounts: &[Account],
) -> Vec<&'a Transaction> {
    let needle = query.search.as_ref().map(|text| text.trim().to_lowercase());
    transactions
        .iter()
        .filter(|txn| {
            query
                .account_id
                .as_ref()
                .map_or(true, |account_id| &txn.account_id == account_id)
        })
        .filter(|txn| match query.range {
            Some((start, end)) => parse_instant(&txn.date)
                .map_or(false, |instant| instant >= start && instant <= end),
            None => true,
        })
        .filter(|txn| match &needle {
            Some(needle) => matches_search(txn, needle, categories, accounts),
            None => true,
        })
        .collect()
}

fn matches_search(
    txn: &Transaction,
    needle: &str,
    categories: &[Category],
    accounts: &[Account],
) -> bool {
    txn.title.to_lowercase().contains(needle)
        || name_matches(categories, &txn.category_id, needle)
        || name_matches(accounts, &txn.account_id, needle)
}

fn name_matches<T: Identifiable + NamedEntity>(entities: &[T], id: &str, needle: &str) -> bool {
    entities
        .iter()
        .find(|entity| entity.id() == id)
        .map_or(false, |entity| entity.name().to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{category::default_categories, AccountKind, DatePreset};
    use chrono::NaiveDate;

    fn ledger() -> (Vec<Transaction>, Vec<Category>, Vec<Account>) {
        let accounts = vec![
            Account::new("Checking", AccountKind::Bank).with_id("chk"),
            Account::new("Wallet", AccountKind::Cash).with_id("wal"),
        ];
        let transactions = vec![
            Transaction::new("Coffee", -4.5, "2024-03-01", "food", "wal").with_id("1"),
            Transaction::new("Metro card", -30.0, "2024-03-15T08:00:00Z", "transport", "chk")
                .with_id("2"),
            Transaction::new("Salary", 2000.0, "2024-02-28", "other", "chk").with_id("3"),
        ];
        (transactions, default_categories(), accounts)
    }

    #[test]
    fn account_filter_applies_first() {
        let (txns, categories, accounts) = ledger();
        let query = TransactionQuery::new().account("chk");
        let ids: Vec<_> = filter_transactions(&txns, &query, &categories, &accounts)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["2", "3"]);
    }

    #[test]
    fn date_range_is_inclusive() {
        let (txns, categories, accounts) = ledger();
        let march = DateFilter::for_preset(
            DatePreset::ThisMonth,
            NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        );
        let query = TransactionQuery::new().within(&march);
        let hits = filter_transactions(&txns, &query, &categories, &accounts);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn search_matches_category_and_account_names() {
        let (txns, categories, accounts) = ledger();
        let by_category = TransactionQuery::new().search("TRANSPORT");
        assert_eq!(
            filter_transactions(&txns, &by_category, &categories, &accounts)[0].id,
            "2"
        );
        let by_account = TransactionQuery::new().search("wallet");
        assert_eq!(
            filter_transactions(&txns, &by_account, &categories, &accounts)[0].id,
            "1"
        );
        let blank = TransactionQuery::new().search("   ");
        assert_eq!(
            filter_transactions(&txns, &blank, &categories, &accounts).len(),
            3
        );
    }
}
