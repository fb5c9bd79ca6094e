//! Access to the ledger backend.
//!
//! `Backend` is the seam between the client-side models and the server. `HttpBackend` talks to
//! the real JSON endpoints over HTTP; `TestBackend` keeps everything in memory so that the whole
//! program can run without a server.

mod http;
mod test_backend;
mod types;

use crate::error::ApiError;
use crate::model::{Transaction, TransactionType};
use crate::search::SearchQuery;
use crate::{Config, Result};
use std::fmt::{Display, Formatter};
use tracing::debug;

pub use http::HttpBackend;
pub use test_backend::{TestBackend, TestBackendState};
pub use types::{CategoryEntry, SearchRecord, SingleEntryForm};

/// The environment variable that switches the program to the in-memory backend.
pub const TEST_MODE_ENV: &str = "LEDGER_GRID_IN_TEST_MODE";

/// Requests the client layer makes of the ledger backend.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Submits a batch of grid rows in one request.
    async fn save_bulk(&self, transactions: &[Transaction]) -> std::result::Result<(), ApiError>;

    /// Submits the single-entry panel.
    async fn save_single(&self, form: &SingleEntryForm) -> std::result::Result<(), ApiError>;

    /// Lists transactions matching `query`.
    async fn search(&self, query: &SearchQuery)
        -> std::result::Result<Vec<SearchRecord>, ApiError>;

    /// Lists the categories defined for `ty`.
    async fn categories(
        &self,
        ty: TransactionType,
    ) -> std::result::Result<Vec<CategoryEntry>, ApiError>;

    /// Deletes the transactions with the given ids.
    async fn delete(&self, ids: &[String]) -> std::result::Result<(), ApiError>;

    /// Asks whether an account number is already registered.
    async fn check_account_number(&self, acc_num: &str) -> std::result::Result<bool, ApiError>;

    /// Downloads the spreadsheet export of one month.
    async fn export(&self, year: i32, month: u32) -> std::result::Result<Vec<u8>, ApiError>;
}

/// Which `Backend` implementation to use.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Http,
    Test,
}

impl Mode {
    /// Returns `Mode::Test` when `LEDGER_GRID_IN_TEST_MODE` is set and non-empty, otherwise
    /// `Mode::Http`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(val) if !val.is_empty() => Mode::Test,
            _ => Mode::Http,
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Http => f.write_str("http"),
            Mode::Test => f.write_str("test"),
        }
    }
}

/// Creates the backend for `mode`.
pub fn backend(config: &Config, mode: Mode) -> Result<Box<dyn Backend>> {
    debug!("Using the {mode} backend");
    Ok(match mode {
        Mode::Http => Box::new(HttpBackend::new(config)?),
        Mode::Test => Box::new(TestBackend::default()),
    })
}
