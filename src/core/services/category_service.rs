use crate::core::errors::{Result, TrackerError};
use crate::domain::{Category, CategoryId, Ledger, TransactionKind};

/// Validated mutations over the ledger's category collection.
pub struct CategoryService;

impl CategoryService {
    /// Appends a category with the next free id. The name is stored trimmed.
    pub fn add(
        ledger: &mut Ledger,
        name: &str,
        kind: TransactionKind,
        color: &str,
    ) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::Validation(
                "category name must not be empty".into(),
            ));
        }
        let color = color.trim();
        if color.is_empty() {
            return Err(TrackerError::Validation(
                "category color must not be empty".into(),
            ));
        }
        let id = ledger
            .allocate_category_id()
            .ok_or_else(|| TrackerError::Persistence("category id counter exhausted".into()))?;
        let category = Category::new(id, name, kind, color);
        ledger.categories.push(category.clone());
        tracing::debug!(id, name, "category added");
        Ok(category)
    }

    /// Removes the category and detaches every transaction that referenced it.
    ///
    /// Unknown ids are a no-op and return `None`.
    pub fn remove(ledger: &mut Ledger, id: CategoryId) -> Option<Category> {
        let index = ledger.categories.iter().position(|c| c.id == id)?;
        let removed = ledger.categories.remove(index);
        let mut detached = 0usize;
        for txn in ledger
            .transactions
            .iter_mut()
            .filter(|txn| txn.category_id == Some(id))
        {
            txn.category_id = None;
            detached += 1;
        }
        tracing::debug!(id, detached, "category removed");
        Some(removed)
    }

    pub fn list(ledger: &Ledger) -> &[Category] {
        &ledger.categories
    }
}
