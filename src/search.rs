//! Filters for the transaction search endpoint.

use crate::api::SearchRecord;
use crate::model::TransactionType;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The filters accepted by the search endpoint. Only the fields that are set are sent.
///
/// When both `start_date` and `end_date` are set the range wins over `year`/`month`, matching the
/// server.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    year: Option<i32>,
    /// 1-indexed.
    month: Option<u32>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    r#type: Option<TransactionType>,
    /// A category id.
    category: Option<String>,
    amount: Option<u64>,
}

impl SearchQuery {
    pub fn year_month(mut self, year: i32, month: u32) -> Self {
        self.year = Some(year);
        self.month = Some(month);
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn transaction_type(mut self, ty: TransactionType) -> Self {
        self.r#type = Some(ty);
        self
    }

    pub fn category(mut self, id: impl Into<String>) -> Self {
        self.category = Some(id.into());
        self
    }

    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// The query string parameters, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        if let Some(month) = self.month {
            pairs.push(("month", month.to_string()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.format(DATE_FORMAT).to_string()));
        }
        if let Some(ty) = self.r#type {
            pairs.push(("type", ty.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(amount) = self.amount {
            pairs.push(("amount", amount.to_string()));
        }
        pairs
    }

    /// Applies the filters to one record the way the server does. `category_name` is the name of
    /// the category whose id was requested, if it is known.
    pub fn matches(&self, record: &SearchRecord, category_name: Option<&str>) -> bool {
        let date = NaiveDate::parse_from_str(&record.use_date, DATE_FORMAT).ok();
        let in_period = match (self.start_date, self.end_date, self.year, self.month) {
            (Some(start), Some(end), _, _) => date.is_some_and(|d| start <= d && d <= end),
            (_, _, Some(year), Some(month)) => {
                record.use_date.starts_with(&format!("{year:04}-{month:02}-"))
            }
            _ => true,
        };
        let type_ok = self
            .r#type
            .map_or(true, |ty| record.cash_side == ty.to_string());
        let category_ok = match (&self.category, category_name) {
            (None, _) => true,
            (Some(_), Some(name)) => record.category_name == name,
            (Some(_), None) => false,
        };
        let amount_ok = self
            .amount
            .map_or(true, |amount| record.cash_amount == Decimal::from(amount));
        in_period && type_ok && category_ok && amount_ok
    }
}
