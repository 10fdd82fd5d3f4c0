//! Repairs records read back from storage into current-schema entities.
//!
//! Everything here is total: malformed input is coerced to defaults rather
//! than rejected, so hydration never fails on a single bad record.

use serde_json::{Map, Value};

use super::{
    account::{Account, AccountKind, DEFAULT_ACCOUNT_ID},
    budget::Budget,
    category::{default_categories, default_category_id_by_name, Category, UNCATEGORIZED_ID},
    common::new_id,
    filter::{DateFilter, DatePreset},
    preferences::{CurrencyOption, NotificationPreferences, ThemePreference},
    transaction::{Transaction, TransactionType},
};

/// A stored transaction in one of the shapes the ledger has written over time.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionRecord {
    /// Fully-formed current-schema record. Its `type` may still disagree with
    /// the sign of its amount.
    Current(Transaction),
    /// Older or partially-formed record.
    Legacy(LegacyTransaction),
}

/// Loose shape of records written before category ids and accounts existed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyTransaction {
    pub id: Option<String>,
    pub title: String,
    pub amount: f64,
    pub date: String,
    pub category_id: Option<String>,
    /// Human-readable category name used by the oldest records.
    pub category: Option<String>,
    pub declared_type: Option<TransactionType>,
    pub account_id: Option<String>,
    pub receipt_uri: Option<String>,
}

impl TransactionRecord {
    /// Classifies a raw JSON value. Non-object values carry no transaction.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if let Ok(current) = serde_json::from_value::<Transaction>(value.clone()) {
            return Some(TransactionRecord::Current(current));
        }
        Some(TransactionRecord::Legacy(LegacyTransaction::from_object(object)))
    }
}

impl LegacyTransaction {
    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            id: non_empty_string(object.get("id")),
            title: string_field(object.get("title")).unwrap_or_default(),
            amount: number_field(object.get("amount")).unwrap_or(0.0),
            date: string_field(object.get("date")).unwrap_or_default(),
            category_id: non_empty_string(object.get("categoryId")),
            category: non_empty_string(object.get("category")),
            declared_type: string_field(object.get("type"))
                .and_then(|label| TransactionType::from_label(&label)),
            account_id: non_empty_string(object.get("accountId")),
            receipt_uri: non_empty_string(object.get("receiptUri")),
        }
    }
}

/// Converts any stored transaction shape into the canonical entity.
///
/// The sign of the amount is forced to agree with the resolved type and the
/// type is then re-derived from the final amount, so applying this twice is
/// the same as applying it once.
pub fn normalize_transaction(record: TransactionRecord) -> Transaction {
    let legacy = match record {
        TransactionRecord::Current(txn) => LegacyTransaction {
            id: Some(txn.id).filter(|id| !id.is_empty()),
            title: txn.title,
            amount: txn.amount,
            date: txn.date,
            category_id: Some(txn.category_id).filter(|id| !id.is_empty()),
            category: None,
            declared_type: Some(txn.kind),
            account_id: Some(txn.account_id).filter(|id| !id.is_empty()),
            receipt_uri: txn.receipt_uri,
        },
        TransactionRecord::Legacy(legacy) => legacy,
    };

    let raw_amount = if legacy.amount.is_finite() {
        legacy.amount
    } else {
        0.0
    };
    let resolved = if legacy.declared_type == Some(TransactionType::Income) || raw_amount >= 0.0 {
        TransactionType::Income
    } else {
        TransactionType::Expense
    };
    let amount = match resolved {
        TransactionType::Income => raw_amount.abs(),
        TransactionType::Expense => -raw_amount.abs(),
    };

    let category_id = legacy
        .category_id
        .or_else(|| {
            legacy.category.as_deref().map(|name| {
                default_category_id_by_name(name)
                    .unwrap_or(UNCATEGORIZED_ID)
                    .to_string()
            })
        })
        .unwrap_or_else(|| UNCATEGORIZED_ID.to_string());

    Transaction {
        id: legacy.id.unwrap_or_else(new_id),
        title: legacy.title,
        amount,
        date: legacy.date,
        category_id,
        kind: TransactionType::from_amount(amount),
        account_id: legacy
            .account_id
            .unwrap_or_else(|| DEFAULT_ACCOUNT_ID.to_string()),
        receipt_uri: legacy.receipt_uri,
    }
}

/// Normalizes a raw JSON value, returning `None` for values that are not records.
pub fn normalize_transaction_value(value: &Value) -> Option<Transaction> {
    TransactionRecord::from_value(value).map(normalize_transaction)
}

/// Re-runs normalization over an already-typed transaction.
pub fn renormalize(txn: Transaction) -> Transaction {
    normalize_transaction(TransactionRecord::Current(txn))
}

pub fn normalize_account(value: &Value) -> Option<Account> {
    let object = value.as_object()?;
    Some(Account {
        id: non_empty_string(object.get("id")).unwrap_or_else(new_id),
        name: string_field(object.get("name")).unwrap_or_default(),
        kind: string_field(object.get("type"))
            .map(|label| AccountKind::from_label(&label))
            .unwrap_or_default(),
        account_number: string_field(object.get("accountNumber")).unwrap_or_default(),
        initial_balance: number_field(object.get("initialBalance"))
            .filter(|value| value.is_finite())
            .unwrap_or(0.0),
        include_in_balance: object
            .get("includeInBalance")
            .and_then(Value::as_bool)
            .unwrap_or(true),
    })
}

/// Guarantees at least one account; an empty list yields the default Cash account.
pub fn normalize_accounts(accounts: Vec<Account>) -> Vec<Account> {
    if accounts.is_empty() {
        vec![Account::default_cash()]
    } else {
        accounts
    }
}

pub fn normalize_category(value: &Value) -> Option<Category> {
    let object = value.as_object()?;
    Some(Category {
        id: non_empty_string(object.get("id")).unwrap_or_else(new_id),
        name: string_field(object.get("name")).unwrap_or_default(),
        icon: string_field(object.get("icon")).unwrap_or_default(),
    })
}

/// Substitutes the default set for an empty list and makes sure the reserved
/// category is present. User categories are never removed.
pub fn normalize_categories(categories: Vec<Category>) -> Vec<Category> {
    if categories.is_empty() {
        return default_categories();
    }
    if categories.iter().any(Category::is_reserved) {
        return categories;
    }
    let mut repaired = Vec::with_capacity(categories.len() + 1);
    repaired.push(Category::uncategorized());
    repaired.extend(categories);
    repaired
}

/// Budgets without a category or month cannot be attributed and are skipped.
pub fn normalize_budget(value: &Value) -> Option<Budget> {
    let object = value.as_object()?;
    Some(Budget {
        id: non_empty_string(object.get("id")).unwrap_or_else(new_id),
        category_id: non_empty_string(object.get("categoryId"))?,
        amount: number_field(object.get("amount"))
            .filter(|value| value.is_finite())
            .unwrap_or(0.0),
        month: non_empty_string(object.get("month"))?,
    })
}

pub fn normalize_date_filter(value: &Value) -> DateFilter {
    match serde_json::from_value::<DateFilter>(value.clone()) {
        Ok(filter) if filter.bounds().is_some() => filter,
        _ => {
            let preset = value
                .get("preset")
                .and_then(Value::as_str)
                .and_then(DatePreset::from_label)
                .filter(|preset| *preset != DatePreset::Custom)
                .unwrap_or_default();
            DateFilter::for_preset(preset, chrono::Utc::now().date_naive())
        }
    }
}

pub fn normalize_currency(value: &Value) -> CurrencyOption {
    if let Ok(option) = serde_json::from_value::<CurrencyOption>(value.clone()) {
        if !option.code.trim().is_empty() {
            return option;
        }
    }
    let code = value
        .as_str()
        .or_else(|| value.get("code").and_then(Value::as_str));
    code.and_then(CurrencyOption::by_code).unwrap_or_default()
}

pub fn normalize_theme(value: &Value) -> ThemePreference {
    value
        .as_str()
        .and_then(ThemePreference::from_label)
        .unwrap_or_default()
}

pub fn normalize_notification_preferences(value: &Value) -> NotificationPreferences {
    let defaults = NotificationPreferences::default();
    let Some(object) = value.as_object() else {
        return defaults;
    };
    NotificationPreferences {
        daily_reminder_enabled: object
            .get("dailyReminderEnabled")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.daily_reminder_enabled),
        daily_reminder_hour: clock_field(object.get("dailyReminderHour"), 23)
            .unwrap_or(defaults.daily_reminder_hour),
        daily_reminder_minute: clock_field(object.get("dailyReminderMinute"), 59)
            .unwrap_or(defaults.daily_reminder_minute),
    }
}

fn clock_field(value: Option<&Value>, max: u8) -> Option<u8> {
    let number = number_field(value)?;
    if !number.is_finite() {
        return None;
    }
    Some(number.clamp(0.0, max as f64) as u8)
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    string_field(value).filter(|s| !s.trim().is_empty())
}

/// Reads a number stored either as JSON number or numeric string.
fn number_field(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}
