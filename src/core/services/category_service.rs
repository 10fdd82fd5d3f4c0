use crate::core::store::StateContainer;
use crate::domain::{Category, CategoryPatch};
use crate::reducer::Action;

use super::{require_non_empty, same_key, ServiceError, ServiceResult};

pub struct CategoryService;

impl CategoryService {
    pub fn add<S: StateContainer + ?Sized>(store: &mut S, category: Category) -> ServiceResult<String> {
        let name = require_non_empty(&category.name, "Category name")?;
        Self::validate_name(store, None, &name)?;
        let id = category.id.clone();
        store.dispatch(Action::AddCategory(Category { name, ..category }));
        Ok(id)
    }

    pub fn edit<S: StateContainer + ?Sized>(store: &mut S, patch: CategoryPatch) -> ServiceResult<()> {
        if store.state().category(&patch.id).is_none() {
            return Err(ServiceError::Invalid("Category not found".into()));
        }
        let mut patch = patch;
        if let Some(name) = patch.name.as_deref() {
            let name = require_non_empty(name, "Category name")?;
            Self::validate_name(store, Some(&patch.id), &name)?;
            patch.name = Some(name);
        }
        store.dispatch(Action::UpdateCategory(patch));
        Ok(())
    }

    /// Deletes a category. Its transactions move to the reserved
    /// category and its budgets are dropped.
    pub fn remove<S: StateContainer + ?Sized>(store: &mut S, id: &str) -> ServiceResult<()> {
        let category = store
            .state()
            .category(id)
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        if category.is_reserved() {
            return Err(ServiceError::Invalid(format!(
                "Category `{}` cannot be deleted",
                category.name
            )));
        }
        store.dispatch(Action::DeleteCategory(id.to_string()));
        Ok(())
    }

    pub fn list<S: StateContainer + ?Sized>(store: &S) -> Vec<&Category> {
        store.state().categories.iter().collect()
    }

    fn validate_name<S: StateContainer + ?Sized>(
        store: &S,
        exclude: Option<&str>,
        candidate: &str,
    ) -> ServiceResult<()> {
        let duplicate = store.state().categories.iter().any(|category| {
            same_key(&category.name, candidate) && exclude.map_or(true, |id| category.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
