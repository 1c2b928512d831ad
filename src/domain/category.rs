//! Domain types representing transaction categories.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

pub type CategoryId = u64;

/// Name shown for transactions without a resolvable category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Neutral color used for the uncategorized bucket.
pub const UNCATEGORIZED_COLOR: &str = "#6c757d";

/// Labels transactions for grouping and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub color: String,
}

impl Category {
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        kind: TransactionKind,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            color: color.into(),
        }
    }

    /// Built-in categories used when no category record has been persisted yet.
    pub fn defaults() -> Vec<Category> {
        use TransactionKind::{Expense, Income};
        vec![
            Category::new(1, "Salary", Income, "#28a745"),
            Category::new(2, "Freelance", Income, "#17a2b8"),
            Category::new(3, "Investments", Income, "#6f42c1"),
            Category::new(4, "Food", Expense, "#fd7e14"),
            Category::new(5, "Transportation", Expense, "#20c997"),
            Category::new(6, "Entertainment", Expense, "#e83e8c"),
            Category::new(7, "Utilities", Expense, "#6c757d"),
            Category::new(8, "Healthcare", Expense, "#dc3545"),
        ]
    }
}

impl Identifiable for Category {
    fn id(&self) -> u64 {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}
