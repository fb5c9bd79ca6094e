//! The single-entry side panel: one transaction at a time, submitted as a form.

use crate::api::{Backend, SingleEntryForm};
use crate::error::ApiError;
use crate::model::{format_decimal_amount, Categories, TransactionType};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use tracing::{debug, info};

const DATE_PLACEHOLDER: &str = "Select date";

/// The type buttons at the top of the panel. Transfers have no categories.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Income,
    Expense,
    Transfer,
}

serde_plain::derive_display_from_serialize!(EntryType);
serde_plain::derive_fromstr_from_deserialize!(EntryType);

impl EntryType {
    fn transaction_type(self) -> Option<TransactionType> {
        match self {
            EntryType::Income => Some(TransactionType::Income),
            EntryType::Expense => Some(TransactionType::Expense),
            EntryType::Transfer => None,
        }
    }
}

/// Why the panel refused to submit.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PanelError {
    MissingType,
    MissingAmountOrDate,
    Api(ApiError),
}

impl Display for PanelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::MissingType => write!(f, "Choose income or expense."),
            PanelError::MissingAmountOrDate => write!(f, "Enter an amount and a date."),
            PanelError::Api(e) => write!(f, "Error while saving: {e}"),
        }
    }
}

impl StdError for PanelError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            PanelError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// State of the single-entry panel.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SingleEntry {
    categories: Categories,
    entry_type: Option<EntryType>,
    category_options: Vec<String>,
    category: String,
    date: String,
    asset: String,
    amount: String,
    content: String,
    memo: String,
    favorite: bool,
    open: bool,
}

impl SingleEntry {
    pub fn new(categories: Categories) -> Self {
        Self {
            categories,
            ..Self::default()
        }
    }

    pub fn entry_type(&self) -> Option<EntryType> {
        self.entry_type
    }

    /// The category choices for the selected type. Empty until a type is picked, and for
    /// transfers.
    pub fn category_options(&self) -> &[String] {
        &self.category_options
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// The text shown on the date picker.
    pub fn date_label(&self) -> &str {
        if self.date.is_empty() {
            DATE_PLACEHOLDER
        } else {
            &self.date
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Selects a type button. The category list is rebuilt and the category is cleared.
    pub fn select_type(&mut self, entry_type: EntryType) {
        self.category_options = match entry_type.transaction_type() {
            Some(ty) => self.categories.for_type(Some(ty)).to_vec(),
            None => Vec::new(),
        };
        self.category.clear();
        self.entry_type = Some(entry_type);
    }

    /// Picks a category. Returns false if it is not offered for the current type.
    pub fn set_category(&mut self, category: &str) -> bool {
        if !category.is_empty() && !self.category_options.iter().any(|c| c == category) {
            return false;
        }
        self.category = category.to_string();
        true
    }

    /// Formats typed text as an amount with at most two decimal places.
    pub fn input_amount(&mut self, raw: &str) {
        self.amount = format_decimal_amount(raw);
    }

    /// Sets the date from the picker. An empty value leaves the current date in place.
    pub fn set_date(&mut self, value: &str) {
        if !value.is_empty() {
            self.date = value.to_string();
        }
    }

    pub fn set_asset(&mut self, asset: &str) {
        self.asset = asset.to_string();
    }

    pub fn input_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    pub fn input_memo(&mut self, memo: &str) {
        self.memo = memo.to_string();
    }

    /// The clear button next to the content field is shown only when there is something to clear.
    pub fn content_clear_visible(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn clear_content(&mut self) {
        self.content.clear();
    }

    pub fn toggle_favorite(&mut self) -> bool {
        self.favorite = !self.favorite;
        self.favorite
    }

    /// Opens or closes the panel. Closing discards everything entered.
    pub fn toggle_open(&mut self) -> bool {
        if self.open {
            self.close();
        } else {
            self.open = true;
        }
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
        self.reset();
    }

    /// Clears every input. The favorite flag and open state are kept.
    pub fn reset(&mut self) {
        self.entry_type = None;
        self.category_options.clear();
        self.category.clear();
        self.date.clear();
        self.asset.clear();
        self.amount.clear();
        self.content.clear();
        self.memo.clear();
    }

    pub fn validate(&self) -> Result<(), PanelError> {
        if self.entry_type.is_none() {
            return Err(PanelError::MissingType);
        }
        if self.amount.is_empty() || self.date.is_empty() {
            return Err(PanelError::MissingAmountOrDate);
        }
        Ok(())
    }

    /// The form fields as they are posted.
    pub fn form(&self) -> SingleEntryForm {
        SingleEntryForm {
            cash_side: self
                .entry_type
                .map(|t| t.to_string())
                .unwrap_or_default(),
            amount: self.amount.clone(),
            date: self.date.clone(),
            category: self.category.clone(),
            content: self.content.clone(),
            memo: self.memo.clone(),
            asset_type: self.asset.clone(),
        }
    }

    /// Validates and posts the panel. On success the panel closes.
    pub async fn submit(&mut self, backend: &dyn Backend) -> Result<(), PanelError> {
        self.validate()?;
        let form = self.form();
        debug!("Submitting {form:?}");
        backend.save_single(&form).await.map_err(PanelError::Api)?;
        info!("Saved a single {} entry", form.cash_side);
        self.close();
        Ok(())
    }
}
