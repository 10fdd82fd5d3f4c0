use crate::domain::{
    Account, AccountDraft, Budget, Category, CategoryPatch, CurrencyOption, DateFilter,
    NotificationPreferences, ThemePreference, Transaction,
};

/// What happens to the transactions of a deleted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Move them to another account. An unknown target falls back to the
    /// first remaining account.
    Reassign(String),
    /// Remove them from the ledger.
    Purge,
}

impl From<Option<String>> for OrphanPolicy {
    /// Maps the optional "reassign to" id used by older callers.
    fn from(reassign: Option<String>) -> Self {
        match reassign {
            Some(target) => OrphanPolicy::Reassign(target),
            None => OrphanPolicy::Purge,
        }
    }
}

/// Every mutation the ledger accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetTransactions(Vec<Transaction>),
    AddTransaction(Transaction),
    UpdateTransaction(Transaction),
    DeleteTransaction(String),

    SetCategories(Vec<Category>),
    AddCategory(Category),
    UpdateCategory(CategoryPatch),
    DeleteCategory(String),

    SetBudgets(Vec<Budget>),
    AddBudget(Budget),
    UpdateBudget(Budget),
    DeleteBudget(String),

    SetAccounts(Vec<Account>),
    AddAccount(AccountDraft),
    UpdateAccount(AccountDraft),
    DeleteAccount { id: String, orphans: OrphanPolicy },

    SetDateFilter(DateFilter),
    SetCurrency(CurrencyOption),
    SetThemePreference(ThemePreference),
    SetNotificationPreferences(NotificationPreferences),

    /// Repairs dangling category and account references across the ledger.
    ReconcileReferences,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetTransactions(_) => "set_transactions",
            Action::AddTransaction(_) => "add_transaction",
            Action::UpdateTransaction(_) => "update_transaction",
            Action::DeleteTransaction(_) => "delete_transaction",
            Action::SetCategories(_) => "set_categories",
            Action::AddCategory(_) => "add_category",
            Action::UpdateCategory(_) => "update_category",
            Action::DeleteCategory(_) => "delete_category",
            Action::SetBudgets(_) => "set_budgets",
            Action::AddBudget(_) => "add_budget",
            Action::UpdateBudget(_) => "update_budget",
            Action::DeleteBudget(_) => "delete_budget",
            Action::SetAccounts(_) => "set_accounts",
            Action::AddAccount(_) => "add_account",
            Action::UpdateAccount(_) => "update_account",
            Action::DeleteAccount { .. } => "delete_account",
            Action::SetDateFilter(_) => "set_date_filter",
            Action::SetCurrency(_) => "set_currency",
            Action::SetThemePreference(_) => "set_theme_preference",
            Action::SetNotificationPreferences(_) => "set_notification_preferences",
            Action::ReconcileReferences => "reconcile_references",
        }
    }

    pub fn delete_account(id: impl Into<String>, reassign: Option<String>) -> Self {
        Action::DeleteAccount {
            id: id.into(),
            orphans: reassign.into(),
        }
    }
}
