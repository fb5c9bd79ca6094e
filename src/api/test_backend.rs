//! Implements the `Backend` trait in memory for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without a ledger server.

use crate::api::types::{CategoriesResponse, SearchResponse};
use crate::api::{Backend, CategoryEntry, SearchRecord, SingleEntryForm};
use crate::error::ApiError;
use crate::model::{Transaction, TransactionType};
use crate::search::SearchQuery;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

/// Everything the in-memory backend knows. Cloning a `TestBackend` shares this state, so a test can
/// hand one clone to the code under test and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct TestBackendState {
    /// Every batch received by `save_bulk`, in order.
    pub bulk_saves: Vec<Vec<Transaction>>,
    /// Every form received by `save_single`.
    pub single_saves: Vec<SingleEntryForm>,
    pub records: Vec<SearchRecord>,
    pub income_categories: Vec<CategoryEntry>,
    pub expense_categories: Vec<CategoryEntry>,
    pub taken_account_numbers: Vec<String>,
    /// When set, the next call fails with this error and the field is cleared.
    pub fail_next: Option<ApiError>,
    /// The number of calls made, including failed ones.
    pub calls: usize,
}

/// An in-memory `Backend`, seeded by default with a handful of transactions and categories.
#[derive(Debug, Clone)]
pub struct TestBackend {
    state: Arc<Mutex<TestBackendState>>,
}

impl Default for TestBackend {
    /// Loads seed data from this module.
    fn default() -> Self {
        Self::new(default_state())
    }
}

impl TestBackend {
    pub fn new(state: TestBackendState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// A backend with no records or categories.
    pub fn empty() -> Self {
        Self::new(TestBackendState::default())
    }

    /// A copy of the current state.
    pub fn state(&self) -> TestBackendState {
        self.lock().clone()
    }

    /// Makes the next call fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        self.lock().fail_next = Some(error);
    }

    fn lock(&self) -> MutexGuard<'_, TestBackendState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Counts the call and returns the injected failure, if any.
    fn begin(&self, name: &str) -> Result<MutexGuard<'_, TestBackendState>, ApiError> {
        trace!("TestBackend::{name}");
        let mut state = self.lock();
        state.calls += 1;
        match state.fail_next.take() {
            Some(e) => Err(e),
            None => Ok(state),
        }
    }
}

#[async_trait::async_trait]
impl Backend for TestBackend {
    async fn save_bulk(&self, transactions: &[Transaction]) -> Result<(), ApiError> {
        let mut state = self.begin("save_bulk")?;
        let next_id = state.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        for (ix, t) in transactions.iter().enumerate() {
            let record = SearchRecord {
                id: next_id + ix as i64,
                use_date: t.date.clone(),
                cash_side: t.r#type.to_string(),
                asset_type: Some(t.asset.clone()).filter(|s| !s.is_empty()),
                category_name: t.category.clone(),
                cash_amount: Decimal::from_str(&t.amount).unwrap_or_default(),
                cash_cont: Some(t.content.clone()),
                memo: Some(t.memo.clone()),
                photo_url: None,
            };
            state.records.push(record);
        }
        state.bulk_saves.push(transactions.to_vec());
        Ok(())
    }

    async fn save_single(&self, form: &SingleEntryForm) -> Result<(), ApiError> {
        let mut state = self.begin("save_single")?;
        state.single_saves.push(form.clone());
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchRecord>, ApiError> {
        let state = self.begin("search")?;
        let category_name = query.category_id().and_then(|id| {
            state
                .income_categories
                .iter()
                .chain(state.expense_categories.iter())
                .find(|c| c.id.to_string() == id)
                .map(|c| c.name.clone())
        });
        let mut found: Vec<SearchRecord> = state
            .records
            .iter()
            .filter(|r| query.matches(r, category_name.as_deref()))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.use_date.cmp(&a.use_date));
        Ok(found)
    }

    async fn categories(&self, ty: TransactionType) -> Result<Vec<CategoryEntry>, ApiError> {
        let state = self.begin("categories")?;
        Ok(match ty {
            TransactionType::Income => state.income_categories.clone(),
            TransactionType::Expense => state.expense_categories.clone(),
        })
    }

    async fn delete(&self, ids: &[String]) -> Result<(), ApiError> {
        let mut state = self.begin("delete")?;
        state.records.retain(|r| !ids.contains(&r.id.to_string()));
        Ok(())
    }

    async fn check_account_number(&self, acc_num: &str) -> Result<bool, ApiError> {
        let state = self.begin("check_account_number")?;
        Ok(state.taken_account_numbers.iter().any(|n| n == acc_num))
    }

    async fn export(&self, year: i32, month: u32) -> Result<Vec<u8>, ApiError> {
        let state = self.begin("export")?;
        let prefix = format!("{year:04}-{month:02}-");
        let mut out = String::from("date\ttype\tcategory\tamount\tmemo\n");
        for r in state.records.iter().filter(|r| r.use_date.starts_with(&prefix)) {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                r.use_date,
                r.cash_side,
                r.category_name,
                r.cash_amount,
                r.memo.as_deref().unwrap_or_default()
            ));
        }
        Ok(out.into_bytes())
    }
}

/// Provides the seed data from this module.
fn default_state() -> TestBackendState {
    let records = serde_json::from_str::<SearchResponse>(RECORD_DATA)
        .map(|r| r.transactions)
        .unwrap_or_default();
    let income = serde_json::from_str::<CategoriesResponse>(INCOME_CATEGORY_DATA)
        .map(|r| r.categories)
        .unwrap_or_default();
    let expense = serde_json::from_str::<CategoriesResponse>(EXPENSE_CATEGORY_DATA)
        .map(|r| r.categories)
        .unwrap_or_default();
    TestBackendState {
        records,
        income_categories: income,
        expense_categories: expense,
        taken_account_numbers: vec![String::from("110-234-567890")],
        ..TestBackendState::default()
    }
}

/// Seed transaction data.
const RECORD_DATA: &str = r##"{"transactions": [
  {"id": 1, "use_date": "2025-10-01", "cash_side": "income", "asset_type": "bank", "category_name": "Salary", "cash_amount": 3200000, "cash_cont": "October pay", "memo": null, "photo_url": null},
  {"id": 2, "use_date": "2025-10-02", "cash_side": "expense", "asset_type": "card", "category_name": "Food", "cash_amount": 12500, "cash_cont": "Lunch", "memo": "with team", "photo_url": null},
  {"id": 3, "use_date": "2025-10-05", "cash_side": "expense", "asset_type": "cash", "category_name": "Transport", "cash_amount": 1450, "cash_cont": "Bus", "memo": null, "photo_url": null},
  {"id": 4, "use_date": "2025-10-11", "cash_side": "expense", "asset_type": "card", "category_name": "Mart/Convenience store", "cash_amount": 48300, "cash_cont": "Groceries", "memo": null, "photo_url": null},
  {"id": 5, "use_date": "2025-10-15", "cash_side": "income", "asset_type": "bank", "category_name": "Interest", "cash_amount": 2310, "cash_cont": "Savings interest", "memo": null, "photo_url": null},
  {"id": 6, "use_date": "2025-09-28", "cash_side": "expense", "asset_type": "bank", "category_name": "Housing/Telecom", "cash_amount": 65000, "cash_cont": "Phone bill", "memo": null, "photo_url": null}
]}"##;

/// Seed income category data.
const INCOME_CATEGORY_DATA: &str = r##"{"categories": [
  {"id": 1, "name": "Salary"},
  {"id": 2, "name": "Bonus"},
  {"id": 3, "name": "Interest"}
]}"##;

/// Seed expense category data.
const EXPENSE_CATEGORY_DATA: &str = r##"{"categories": [
  {"id": 10, "name": "Food"},
  {"id": 11, "name": "Transport"},
  {"id": 12, "name": "Mart/Convenience store"},
  {"id": 13, "name": "Housing/Telecom"}
]}"##;
