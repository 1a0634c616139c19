//! Transaction filter builder
//!
//! All constraints AND together; a filter with nothing set matches every
//! transaction.

use chrono::NaiveDate;

use crate::models::{Transaction, TransactionType};

/// Builder for in-memory transaction filters
///
/// The lifetime `'query` covers borrowed parameters (search term, category id).
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter<'query> {
    pub search: Option<&'query str>,
    pub tx_type: Option<TransactionType>,
    pub category: Option<&'query str>,
    /// Inclusive lower bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound
    pub to: Option<NaiveDate>,
}

impl<'query> TransactionFilter<'query> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search query (case-insensitive substring of the description)
    pub fn search(mut self, query: Option<&'query str>) -> Self {
        self.search = query;
        self
    }

    pub fn tx_type(mut self, tx_type: Option<TransactionType>) -> Self {
        self.tx_type = tx_type;
        self
    }

    /// Set category id filter
    pub fn category(mut self, id: Option<&'query str>) -> Self {
        self.category = id;
        self
    }

    pub fn from(mut self, date: Option<NaiveDate>) -> Self {
        self.from = date;
        self
    }

    pub fn to(mut self, date: Option<NaiveDate>) -> Self {
        self.to = date;
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(q) = self.search {
            let q = q.trim();
            if !q.is_empty() && !tx.description.to_lowercase().contains(&q.to_lowercase()) {
                return false;
            }
        }

        if self.tx_type.is_some_and(|t| t != tx.tx_type) {
            return false;
        }

        if self.category.is_some_and(|c| c != tx.category) {
            return false;
        }

        if self.from.is_some_and(|from| tx.date < from) {
            return false;
        }

        if self.to.is_some_and(|to| tx.date > to) {
            return false;
        }

        true
    }

    /// Matching transactions, in input order
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }
}
