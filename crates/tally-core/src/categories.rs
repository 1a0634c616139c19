//! Category resolution
//!
//! Merges the built-in taxonomy with user categories per transaction type.
//! A transaction may reference a category that was deleted after the fact;
//! that is an expected data state, so lookups return `Option` and callers
//! pick a display fallback.

use std::collections::HashMap;

use crate::models::{Category, TransactionType, UserCategories};

/// Display name for transactions whose category cannot be resolved
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Icon shown for transactions whose category cannot be resolved
pub const UNKNOWN_ICON: &str = "❓";

/// Built-in income categories: (id, name, icon)
const BASE_INCOME: &[(&str, &str, &str)] = &[
    ("salary", "Salary", "💰"),
    ("freelance", "Freelance", "💻"),
    ("business", "Business", "💼"),
    ("investment", "Investment", "📈"),
    ("other-income", "Other", "📋"),
];

/// Built-in expense categories: (id, name, icon)
const BASE_EXPENSE: &[(&str, &str, &str)] = &[
    ("food", "Food", "🍔"),
    ("transport", "Transport", "🚗"),
    ("shopping", "Shopping", "🛍️"),
    ("bills", "Bills", "📄"),
    ("entertainment", "Entertainment", "🎬"),
    ("health", "Health", "🏥"),
    ("education", "Education", "📚"),
    ("other-expense", "Other", "📋"),
];

/// The fixed built-in categories for a transaction type
pub fn base_categories(tx_type: TransactionType) -> Vec<Category> {
    let table = match tx_type {
        TransactionType::Income => BASE_INCOME,
        TransactionType::Expense => BASE_EXPENSE,
    };
    table
        .iter()
        .map(|(id, name, icon)| Category {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            is_base: true,
        })
        .collect()
}

/// Lookup of built-in and user categories by id, built once per snapshot
#[derive(Debug, Clone, Default)]
pub struct CategoryResolver {
    income: TypeIndex,
    expense: TypeIndex,
}

#[derive(Debug, Clone, Default)]
struct TypeIndex {
    /// Built-ins first, then user categories, in definition order
    ordered: Vec<Category>,
    by_id: HashMap<String, usize>,
}

impl TypeIndex {
    fn build(base: Vec<Category>, user: impl Iterator<Item = Category>) -> Self {
        let mut index = Self::default();
        for category in base.into_iter().chain(user) {
            let position = index.ordered.len();
            // First definition of an id wins, so a user category can never
            // shadow a built-in one.
            index.by_id.entry(category.id.clone()).or_insert(position);
            index.ordered.push(category);
        }
        index
    }
}

impl CategoryResolver {
    pub fn new(user: &UserCategories) -> Self {
        let build = |tx_type| {
            TypeIndex::build(
                base_categories(tx_type),
                user.for_type(tx_type).iter().map(|c| c.category.clone()),
            )
        };
        Self {
            income: build(TransactionType::Income),
            expense: build(TransactionType::Expense),
        }
    }

    /// Resolver over the built-in taxonomy only
    pub fn builtin() -> Self {
        Self::new(&UserCategories::default())
    }

    fn index(&self, tx_type: TransactionType) -> &TypeIndex {
        match tx_type {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expense,
        }
    }

    pub fn resolve(&self, tx_type: TransactionType, id: &str) -> Option<&Category> {
        let index = self.index(tx_type);
        index.by_id.get(id).map(|&i| &index.ordered[i])
    }

    /// Resolved name, or `fallback` when the id is dangling
    pub fn name_or<'a>(&'a self, tx_type: TransactionType, id: &str, fallback: &'a str) -> &'a str {
        self.resolve(tx_type, id)
            .map(|c| c.name.as_str())
            .unwrap_or(fallback)
    }

    pub fn display_name(&self, tx_type: TransactionType, id: &str) -> &str {
        self.name_or(tx_type, id, UNCATEGORIZED)
    }

    pub fn icon_or_placeholder(&self, tx_type: TransactionType, id: &str) -> &str {
        self.resolve(tx_type, id)
            .map(|c| c.icon.as_str())
            .unwrap_or(UNKNOWN_ICON)
    }

    /// All categories of a type: built-ins, then user categories
    pub fn categories(&self, tx_type: TransactionType) -> &[Category] {
        &self.index(tx_type).ordered
    }
}
