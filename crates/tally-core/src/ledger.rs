//! Ledger snapshot loading
//!
//! A snapshot is everything the engine reads: transactions, user categories
//! and the display currency. It is loaded from a JSON export of the realtime
//! store, where each collection is an object keyed by record id:
//!
//! ```json
//! {
//!   "transactions": { "-Nx1": { "type": "expense", "amount": 12.5, "category": "food",
//!                               "description": "Lunch", "date": "2024-05-01",
//!                               "timestamp": 1714550400000 } },
//!   "userCategories": { "-Nc1": { "name": "Pets", "icon": "🐶", "type": "expense" } },
//!   "appSettings": { "currency": "EUR" },
//!   "notes": { }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::categories::CategoryResolver;
use crate::error::{Error, Result};
use crate::models::{
    Category, LedgerTotals, Transaction, TransactionType, UserCategories, UserCategory,
};

/// Currency used when the export carries no settings
pub const DEFAULT_CURRENCY: &str = "USD";

/// In-memory view of the ledger at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    pub transactions: Vec<Transaction>,
    pub categories: UserCategories,
    pub currency: String,
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            categories: UserCategories::default(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExport {
    #[serde(default)]
    transactions: BTreeMap<String, Transaction>,
    #[serde(default)]
    user_categories: BTreeMap<String, RawUserCategory>,
    #[serde(default)]
    app_settings: Option<RawSettings>,
}

#[derive(Debug, Deserialize)]
struct RawUserCategory {
    #[serde(flatten)]
    category: Category,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    currency: Option<String>,
}

impl LedgerSnapshot {
    /// Parse a realtime-store export.
    ///
    /// Record ids come from the map keys. Store push ids sort in creation
    /// order, so iterating the keys in sorted order reproduces insertion order.
    pub fn from_export_json(content: &str) -> Result<Self> {
        let raw: RawExport = serde_json::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: RawExport = serde_json::from_reader(reader)?;
        Ok(Self::from_raw(raw))
    }

    /// Read and parse an export file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(format!(
                "Ledger export not found: {}",
                path.display()
            )));
        }
        let file = File::open(path)?;
        let snapshot = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            transactions = snapshot.transactions.len(),
            currency = %snapshot.currency,
            "Loaded ledger snapshot"
        );
        Ok(snapshot)
    }

    fn from_raw(raw: RawExport) -> Self {
        let transactions = raw
            .transactions
            .into_iter()
            .map(|(id, mut tx)| {
                tx.id = id;
                tx
            })
            .collect();

        let mut categories = UserCategories::default();
        for (id, entry) in raw.user_categories {
            let tx_type = match entry.kind.parse::<TransactionType>() {
                Ok(t) => t,
                Err(_) => {
                    tracing::warn!(
                        id = %id,
                        kind = %entry.kind,
                        "Skipping user category with unknown type"
                    );
                    continue;
                }
            };
            let mut category = entry.category;
            category.id = id;
            category.is_base = false;
            categories.push(UserCategory { category, tx_type });
        }

        let currency = raw
            .app_settings
            .and_then(|s| s.currency)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        Self {
            transactions,
            categories,
            currency,
        }
    }

    /// Category lookup for this snapshot
    pub fn resolver(&self) -> CategoryResolver {
        CategoryResolver::new(&self.categories)
    }

    /// Income, expenses and balance over the whole ledger
    pub fn totals(&self) -> LedgerTotals {
        LedgerTotals::from_transactions(&self.transactions)
    }

    /// The `limit` most recently created transactions, newest first
    pub fn recent(&self, limit: usize) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted.truncate(limit);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXPORT: &str = r#"{
        "transactions": {
            "-Nb": { "type": "income", "amount": 2500, "category": "salary",
                     "date": "2024-05-01", "timestamp": 200 },
            "-Na": { "type": "expense", "amount": 12.5, "category": "pets-1",
                     "description": "Kibble", "date": "2024-05-03", "timestamp": 300 },
            "-Nc": { "type": "expense", "amount": 40, "category": "food",
                     "description": "Groceries", "date": "2024-05-02", "timestamp": 100 }
        },
        "userCategories": {
            "pets-1": { "name": "Pets", "icon": "🐶", "type": "expense" },
            "gig-1": { "name": "Gigs", "icon": "🎸", "type": "income" },
            "odd-1": { "name": "Odd", "icon": "?", "type": "transfer" }
        },
        "appSettings": { "currency": "EUR" },
        "notes": { "n1": { "text": "ignored" } }
    }"#;

    #[test]
    fn test_from_export_json() {
        let snapshot = LedgerSnapshot::from_export_json(EXPORT).unwrap();

        let ids: Vec<&str> = snapshot.transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["-Na", "-Nb", "-Nc"]);
        assert_eq!(snapshot.transactions[0].description, "Kibble");
        assert_eq!(snapshot.transactions[1].description, "");
        assert_eq!(snapshot.currency, "EUR");

        assert_eq!(snapshot.categories.expense.len(), 1);
        assert_eq!(snapshot.categories.income.len(), 1);
        assert_eq!(snapshot.categories.expense[0].category.id, "pets-1");

        let resolver = snapshot.resolver();
        assert_eq!(resolver.display_name(TransactionType::Expense, "pets-1"), "Pets");
    }

    #[test]
    fn test_missing_sections_default() {
        let snapshot = LedgerSnapshot::from_export_json("{}").unwrap();
        assert!(snapshot.transactions.is_empty());
        assert_eq!(snapshot.currency, DEFAULT_CURRENCY);
        assert_eq!(snapshot, LedgerSnapshot::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = LedgerSnapshot::from_export_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_totals_and_recent() {
        let snapshot = LedgerSnapshot::from_export_json(EXPORT).unwrap();

        let totals = snapshot.totals();
        assert_eq!(totals.income, 2500.0);
        assert_eq!(totals.expenses, 52.5);
        assert_eq!(totals.balance, 2447.5);

        let recent: Vec<&str> = snapshot.recent(2).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(recent, vec!["-Na", "-Nb"]);
        assert_eq!(snapshot.recent(10).len(), 3);
    }

    #[test]
    fn test_from_reader_matches_from_str() {
        let from_reader = LedgerSnapshot::from_reader(EXPORT.as_bytes()).unwrap();
        let from_str = LedgerSnapshot::from_export_json(EXPORT).unwrap();
        assert_eq!(from_reader, from_str);

        let err = LedgerSnapshot::from_reader(&b"[1, 2"[..]).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();

        let snapshot = LedgerSnapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.transactions.len(), 3);

        let missing = LedgerSnapshot::load(Path::new("/nonexistent/ledger.json")).unwrap_err();
        assert!(matches!(missing, Error::NotFound(_)));
    }
}
