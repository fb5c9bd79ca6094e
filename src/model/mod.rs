//! Types that represent the core data model, such as `Transaction` and `Column`.
mod amount;
mod category;
mod column;
mod row_col;
mod transaction;

pub use amount::{digits_only, format_amount, format_decimal_amount, strip_separators, SEPARATOR};
pub use category::Categories;
pub use column::Column;
pub use row_col::{CellRange, RowCol};
pub use transaction::{is_iso_date, Tone, Transaction, TransactionType, ASSETS};
