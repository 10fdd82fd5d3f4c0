use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Identifier of the account reseeded whenever the account list empties.
pub const DEFAULT_ACCOUNT_ID: &str = "default-cash";

/// Represents a financial account tracked within the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub initial_balance: f64,
    #[serde(default = "Account::default_include_in_balance")]
    pub include_in_balance: bool,
}

impl Account {
    /// Creates a new account counted in aggregate balances, with no number.
    pub fn new(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            kind,
            account_number: String::new(),
            initial_balance: 0.0,
            include_in_balance: true,
        }
    }

    /// The account every empty ledger starts with.
    pub fn default_cash() -> Self {
        Self {
            id: DEFAULT_ACCOUNT_ID.into(),
            name: "Cash".into(),
            kind: AccountKind::Cash,
            account_number: String::new(),
            initial_balance: 0.0,
            include_in_balance: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.account_number = number.into();
        self
    }

    pub fn with_initial_balance(mut self, balance: f64) -> Self {
        self.initial_balance = balance;
        self
    }

    pub fn excluded_from_balance(mut self) -> Self {
        self.include_in_balance = false;
        self
    }

    pub fn default_include_in_balance() -> bool {
        true
    }
}

impl Identifiable for Account {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        if self.account_number.is_empty() {
            format!("{} ({})", self.name, self.kind)
        } else {
            format!("{} ({}, #{})", self.name, self.kind, self.account_number)
        }
    }
}

/// Enumerates the supported account classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Cash,
    Bank,
    Credit,
    Debit,
    Investment,
    #[default]
    Other,
}

impl AccountKind {
    /// Lenient parse used when reading stored records; unknown labels map to `Other`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => AccountKind::Cash,
            "bank" => AccountKind::Bank,
            "credit" => AccountKind::Credit,
            "debit" => AccountKind::Debit,
            "investment" => AccountKind::Investment,
            _ => AccountKind::Other,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountKind::Cash => "cash",
            AccountKind::Bank => "bank",
            AccountKind::Credit => "credit",
            AccountKind::Debit => "debit",
            AccountKind::Investment => "investment",
            AccountKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// Payload of the add/update account actions.
///
/// Fields left as `None` keep the previous record's value on update and fall
/// back to the account defaults on insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountDraft {
    pub id: String,
    pub name: Option<String>,
    pub kind: Option<AccountKind>,
    pub account_number: Option<String>,
    pub initial_balance: Option<f64>,
    pub include_in_balance: Option<bool>,
}

impl AccountDraft {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn merge_onto(self, previous: Option<&Account>) -> Account {
        Account {
            name: self
                .name
                .or_else(|| previous.map(|p| p.name.clone()))
                .unwrap_or_default(),
            kind: self
                .kind
                .or_else(|| previous.map(|p| p.kind))
                .unwrap_or_default(),
            account_number: self
                .account_number
                .or_else(|| previous.map(|p| p.account_number.clone()))
                .unwrap_or_default(),
            initial_balance: self
                .initial_balance
                .or_else(|| previous.map(|p| p.initial_balance))
                .unwrap_or(0.0),
            include_in_balance: self
                .include_in_balance
                .or_else(|| previous.map(|p| p.include_in_balance))
                .unwrap_or(true),
            id: self.id,
        }
    }
}

impl From<Account> for AccountDraft {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: Some(account.name),
            kind: Some(account.kind),
            account_number: Some(account.account_number),
            initial_balance: Some(account.initial_balance),
            include_in_balance: Some(account.include_in_balance),
        }
    }
}
