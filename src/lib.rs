//! Client layer of a household ledger: a spreadsheet-like bulk-entry grid, a single-entry panel,
//! the monthly record list, month navigation, search filters, account-form checks and a typed
//! client for the ledger server.

pub mod account;
pub mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod grid;
pub mod model;
pub mod nav;
pub mod panel;
pub mod records;
pub mod search;
pub mod surface;
mod utils;


pub use api::Mode;
pub use config::{CategorySource, Config, Endpoint, Endpoints};
pub use error::{ApiError, Error, Result, SaveError, ValidationError};
