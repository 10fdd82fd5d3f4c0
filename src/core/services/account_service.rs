use crate::core::store::StateContainer;
use crate::domain::{account::Account, AccountDraft};
use crate::errors::LedgerError;
use crate::reducer::{Action, OrphanPolicy};

use super::{require_non_empty, same_key, ServiceError, ServiceResult};

pub struct AccountService;

impl AccountService {
    /// Adds an account and returns its id. Name and account number are both
    /// required and must be unique, ignoring case.
    pub fn add<S: StateContainer + ?Sized>(store: &mut S, account: Account) -> ServiceResult<String> {
        let name = require_non_empty(&account.name, "Account name")?;
        let number = require_non_empty(&account.account_number, "Account number")?;
        Self::validate_unique(store, None, &name, &number)?;
        if store.state().account(&account.id).is_some() {
            return Err(ServiceError::Invalid(format!(
                "Account `{}` already exists",
                account.id
            )));
        }
        let id = account.id.clone();
        let draft = AccountDraft {
            name: Some(name),
            account_number: Some(number),
            ..AccountDraft::from(account)
        };
        store.dispatch(Action::AddAccount(draft));
        Ok(id)
    }

    /// Applies the supplied fields of `changes` to an existing account.
    pub fn edit<S: StateContainer + ?Sized>(store: &mut S, changes: AccountDraft) -> ServiceResult<()> {
        let current = store
            .state()
            .account(&changes.id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Account not found".into()))?;
        let mut draft = changes;
        if let Some(name) = draft.name.as_deref() {
            draft.name = Some(require_non_empty(name, "Account name")?);
        }
        if let Some(number) = draft.account_number.as_deref() {
            draft.account_number = Some(require_non_empty(number, "Account number")?);
        }
        let name = draft.name.clone().unwrap_or(current.name);
        let number = draft.account_number.clone().unwrap_or(current.account_number);
        Self::validate_unique(store, Some(&current.id), &name, &number)?;
        store.dispatch(Action::UpdateAccount(draft));
        Ok(())
    }

    /// Removes an account, moving its transactions to `reassign_to` or
    /// deleting them when no target is given.
    pub fn remove<S: StateContainer + ?Sized>(
        store: &mut S,
        id: &str,
        reassign_to: Option<&str>,
    ) -> ServiceResult<()> {
        if store.state().account(id).is_none() {
            return Err(ServiceError::Invalid("Account not found".into()));
        }
        let orphans = match reassign_to {
            Some(target) if target == id => {
                return Err(ServiceError::Invalid(
                    "Cannot move transactions to the account being deleted".into(),
                ))
            }
            Some(target) if store.state().account(target).is_none() => {
                return Err(LedgerError::InvalidRef(format!("account `{}`", target)).into())
            }
            Some(target) => OrphanPolicy::Reassign(target.to_string()),
            None => OrphanPolicy::Purge,
        };
        store.dispatch(Action::DeleteAccount {
            id: id.to_string(),
            orphans,
        });
        Ok(())
    }

    pub fn list<S: StateContainer + ?Sized>(store: &S) -> Vec<&Account> {
        store.state().accounts.iter().collect()
    }

    fn validate_unique<S: StateContainer + ?Sized>(
        store: &S,
        exclude: Option<&str>,
        name: &str,
        number: &str,
    ) -> ServiceResult<()> {
        let others = store
            .state()
            .accounts
            .iter()
            .filter(|account| exclude.map_or(true, |id| account.id != id));
        for account in others {
            if same_key(&account.name, name) {
                return Err(ServiceError::Invalid(format!(
                    "Account `{}` already exists",
                    name
                )));
            }
            if !account.account_number.is_empty() && same_key(&account.account_number, number) {
                return Err(ServiceError::Invalid(format!(
                    "Account number `{}` is already in use",
                    number
                )));
            }
        }
        Ok(())
    }
}
