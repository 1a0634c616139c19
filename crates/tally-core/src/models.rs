//! Domain models for Tally

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn all() -> &'static [TransactionType] {
        &[Self::Income, Self::Expense]
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger entry. Immutable once created by the entry flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Record id assigned by the store (the export's map key)
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// Positive amount in the ledger currency
    pub amount: f64,
    /// Category id; may reference a category that no longer exists
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    /// Creation instant in milliseconds since the epoch (display ordering only)
    #[serde(default)]
    pub timestamp: i64,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.tx_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.tx_type == TransactionType::Expense
    }
}

/// A category definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Built-in categories can be referenced but never edited or deleted
    #[serde(default)]
    pub is_base: bool,
}

/// A user-owned category, tied to one transaction type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCategory {
    #[serde(flatten)]
    pub category: Category,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
}

/// User categories partitioned by transaction type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCategories {
    #[serde(default)]
    pub income: Vec<UserCategory>,
    #[serde(default)]
    pub expense: Vec<UserCategory>,
}

impl UserCategories {
    pub fn for_type(&self, tx_type: TransactionType) -> &[UserCategory] {
        match tx_type {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expense,
        }
    }

    /// Add a category to the partition matching its type
    pub fn push(&mut self, category: UserCategory) {
        match category.tx_type {
            TransactionType::Income => self.income.push(category),
            TransactionType::Expense => self.expense.push(category),
        }
    }
}

/// Totals over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl LedgerTotals {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut totals = Self::default();
        for tx in transactions {
            match tx.tx_type {
                TransactionType::Income => totals.income += tx.amount,
                TransactionType::Expense => totals.expenses += tx.amount,
            }
        }
        totals.balance = totals.income - totals.expenses;
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!(
            TransactionType::from_str("Expense").unwrap(),
            TransactionType::Expense
        );
        assert_eq!(TransactionType::Income.as_str(), "income");
        assert!(TransactionType::from_str("transfer").is_err());
    }

    #[test]
    fn test_transaction_deserializes_store_shape() {
        let tx: Transaction = serde_json::from_str(
            r#"{"type":"expense","amount":12.5,"category":"food","date":"2024-03-09","timestamp":1709990000000}"#,
        )
        .unwrap();

        assert_eq!(tx.tx_type, TransactionType::Expense);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert!(tx.id.is_empty());
        assert!(tx.description.is_empty());
    }

    #[test]
    fn test_user_category_flattens_fields() {
        let cat: UserCategory =
            serde_json::from_str(r#"{"name":"Pets","icon":"🐶","type":"expense"}"#).unwrap();
        assert_eq!(cat.category.name, "Pets");
        assert!(!cat.category.is_base);
        assert_eq!(cat.tx_type, TransactionType::Expense);
    }

    #[test]
    fn test_ledger_totals() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let make = |tx_type, amount| Transaction {
            id: String::new(),
            tx_type,
            amount,
            category: "x".to_string(),
            description: String::new(),
            date,
            timestamp: 0,
        };
        let txs = vec![
            make(TransactionType::Income, 1000.0),
            make(TransactionType::Expense, 250.0),
            make(TransactionType::Expense, 50.0),
        ];

        let totals = LedgerTotals::from_transactions(&txs);
        assert_eq!(totals.income, 1000.0);
        assert_eq!(totals.expenses, 300.0);
        assert_eq!(totals.balance, 700.0);
    }
}
