use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::{new_id, Displayable, Identifiable};

/// Direction of a ledger entry, always derived from the sign of its amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn from_amount(amount: f64) -> Self {
        if amount >= 0.0 {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        })
    }
}

/// A single ledger entry. The sign of `amount` is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub date: String,
    pub category_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub account_id: String,
    #[serde(default)]
    pub receipt_uri: Option<String>,
}

impl Transaction {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        date: impl Into<String>,
        category_id: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            amount,
            date: date.into(),
            category_id: category_id.into(),
            kind: TransactionType::from_amount(amount),
            account_id: account_id.into(),
            receipt_uri: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_receipt(mut self, uri: impl Into<String>) -> Self {
        self.receipt_uri = Some(uri.into());
        self
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount;
        self.kind = TransactionType::from_amount(amount);
    }

    /// Re-derives `kind` from the current amount.
    pub fn rederive_kind(&mut self) {
        self.kind = TransactionType::from_amount(self.amount);
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Positive magnitude of an expense, zero for income.
    pub fn expense_amount(&self) -> f64 {
        if self.is_expense() {
            self.amount.abs()
        } else {
            0.0
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} [{} {:.2}]", self.title, self.kind, self.amount)
    }
}
