use serde::{Deserialize, Serialize};

use crate::domain::common::{new_id, Identifiable};

/// A monthly spending allotment for one category.
///
/// At most one budget should exist per `(category_id, month)`; that rule is
/// checked by [`crate::core::services::BudgetService`] before an action is
/// dispatched, the reducer stores whatever it is given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub amount: f64,
    pub month: String,
}

impl Budget {
    pub fn new(category_id: impl Into<String>, amount: f64, month: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            category_id: category_id.into(),
            amount,
            month: month.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn covers(&self, category_id: &str, month: &str) -> bool {
        self.category_id == category_id && self.month == month
    }
}

impl Identifiable for Budget {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Checks the `YYYY-MM` shape of a budget month key.
pub fn is_month_key(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return false;
    }
    if !bytes[..4].iter().chain(&bytes[5..]).all(u8::is_ascii_digit) {
        return false;
    }
    matches!(value[5..].parse::<u32>(), Ok(1..=12))
}
