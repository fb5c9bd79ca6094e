//! Request and response bodies of the backend's JSON endpoints.

use crate::model::Transaction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct BulkSaveRequest<'a> {
    pub(super) transactions: &'a [Transaction],
}

#[derive(Debug, Serialize)]
pub(super) struct DeleteRequest<'a> {
    pub(super) ids: &'a [String],
}

/// `{"success": true}` or `{"success": false, "error": "..."}`.
#[derive(Debug, Deserialize)]
pub(super) struct SuccessResponse {
    pub(super) success: bool,
    #[serde(default)]
    pub(super) error: Option<String>,
}

/// The body of a failed response, which may or may not carry an `error` field.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub(super) error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub(super) struct SearchResponse {
    pub(super) transactions: Vec<SearchRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
pub(super) struct CategoriesResponse {
    pub(super) categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AccountNumberResponse {
    pub(super) is_taken: bool,
}

/// One transaction as returned by the search endpoint.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: i64,
    /// `YYYY-MM-DD`.
    pub use_date: String,
    pub cash_side: String,
    #[serde(default)]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub category_name: String,
    pub cash_amount: Decimal,
    #[serde(default)]
    pub cash_cont: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// A category as returned by the categories endpoint.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: i64,
    pub name: String,
}

/// The form fields posted by the single-entry panel.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SingleEntryForm {
    pub cash_side: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    pub content: String,
    pub memo: String,
    pub asset_type: String,
}
