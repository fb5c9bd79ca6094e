use crate::model::amount::strip_separators;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a transaction adds to or takes from the ledger.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    /// Parses a type cell value. Anything other than a known type, including the empty string,
    /// means "no type".
    pub fn from_cell(value: &str) -> Option<TransactionType> {
        value.trim().parse().ok()
    }

    pub fn tone(self) -> Tone {
        match self {
            TransactionType::Income => Tone::Blue,
            TransactionType::Expense => Tone::Red,
        }
    }
}

/// The color a type control is drawn in.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Neutral,
    Blue,
    Red,
}

impl Tone {
    pub fn for_type(ty: Option<TransactionType>) -> Tone {
        ty.map(TransactionType::tone).unwrap_or_default()
    }
}

/// The options offered by the asset column.
pub const ASSETS: [&str; 3] = ["cash", "bank", "card"];

/// One row of the bulk-entry grid, ready to be sent to the backend. It is built fresh from the
/// grid on every save and dropped once the request finishes.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub r#type: TransactionType,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub asset: String,
    pub category: String,
    /// Digits only, no separators.
    pub amount: String,
    pub content: String,
    pub memo: String,
}

impl Transaction {
    /// Creates a transaction, stripping any thousands separators from `amount`.
    pub fn new(
        r#type: TransactionType,
        date: impl Into<String>,
        amount: impl AsRef<str>,
    ) -> Self {
        Self {
            r#type,
            date: date.into(),
            asset: String::new(),
            category: String::new(),
            amount: strip_separators(amount.as_ref()),
            content: String::new(),
            memo: String::new(),
        }
    }
}

/// True when `s` is a real calendar date written exactly as `YYYY-MM-DD`.
pub fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    let shape_ok = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(ix, c)| ix == 4 || ix == 7 || c.is_ascii_digit());
    shape_ok && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
