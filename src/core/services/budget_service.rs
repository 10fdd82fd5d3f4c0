use crate::core::store::StateContainer;
use crate::domain::{budget::is_month_key, Budget};
use crate::errors::LedgerError;
use crate::reducer::Action;

use super::{ServiceError, ServiceResult};

/// Keeps at most one budget per category and month.
pub struct BudgetService;

impl BudgetService {
    pub fn add<S: StateContainer + ?Sized>(store: &mut S, budget: Budget) -> ServiceResult<String> {
        Self::validate(store, &budget)?;
        let id = budget.id.clone();
        store.dispatch(Action::AddBudget(budget));
        Ok(id)
    }

    pub fn edit<S: StateContainer + ?Sized>(store: &mut S, budget: Budget) -> ServiceResult<()> {
        if store.state().budget(&budget.id).is_none() {
            return Err(ServiceError::Invalid("Budget not found".into()));
        }
        Self::validate(store, &budget)?;
        store.dispatch(Action::UpdateBudget(budget));
        Ok(())
    }

    pub fn remove<S: StateContainer + ?Sized>(store: &mut S, id: &str) -> ServiceResult<()> {
        if store.state().budget(id).is_none() {
            return Err(ServiceError::Invalid("Budget not found".into()));
        }
        store.dispatch(Action::DeleteBudget(id.to_string()));
        Ok(())
    }

    pub fn for_month<'a, S: StateContainer + ?Sized>(store: &'a S, month: &str) -> Vec<&'a Budget> {
        store
            .state()
            .budgets
            .iter()
            .filter(|budget| budget.month == month)
            .collect()
    }

    fn validate<S: StateContainer + ?Sized>(store: &S, budget: &Budget) -> ServiceResult<()> {
        if !budget.amount.is_finite() || budget.amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Budget amount must be a positive number".into(),
            ));
        }
        if !is_month_key(&budget.month) {
            return Err(ServiceError::Invalid(format!(
                "`{}` is not a YYYY-MM month",
                budget.month
            )));
        }
        let state = store.state();
        if state.category(&budget.category_id).is_none() {
            return Err(LedgerError::InvalidRef(format!("category `{}`", budget.category_id)).into());
        }
        let duplicate = state
            .budgets
            .iter()
            .any(|other| other.id != budget.id && other.covers(&budget.category_id, &budget.month));
        if duplicate {
            return Err(ServiceError::Invalid(format!(
                "A budget for this category already exists for {}",
                budget.month
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::AppStore;

    #[test]
    fn one_budget_per_category_and_month() {
        let mut store = AppStore::new();
        BudgetService::add(&mut store, Budget::new("food", 100.0, "2024-03")).unwrap();
        assert!(BudgetService::add(&mut store, Budget::new("food", 50.0, "2024-03")).is_err());
        BudgetService::add(&mut store, Budget::new("food", 50.0, "2024-04")).unwrap();
        assert_eq!(BudgetService::for_month(&store, "2024-03").len(), 1);
    }

    #[test]
    fn edit_keeps_its_own_slot() {
        let mut store = AppStore::new();
        let id = BudgetService::add(&mut store, Budget::new("food", 100.0, "2024-03")).unwrap();
        BudgetService::edit(&mut store, Budget::new("food", 120.0, "2024-03").with_id(&id)).unwrap();
        assert_eq!(store.state().budget(&id).unwrap().amount, 120.0);
    }

    #[test]
    fn rejects_bad_amount_and_month() {
        let mut store = AppStore::new();
        assert!(BudgetService::add(&mut store, Budget::new("food", 0.0, "2024-03")).is_err());
        assert!(BudgetService::add(&mut store, Budget::new("food", 10.0, "March")).is_err());
        assert!(BudgetService::add(&mut store, Budget::new("ghost", 10.0, "2024-03")).is_err());
    }
}
