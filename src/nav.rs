//! Month navigation for the ledger home page.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use url::Url;

/// The month being viewed. `month` is 1-indexed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Returns `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Reads `year` and `month` from a URL query string such as `year=2025&month=03`. If either is
    /// missing or unparseable the cursor falls back to the month of `today`. An out-of-range
    /// month rolls over into the neighbouring years.
    pub fn from_query(query: &str, today: NaiveDate) -> Self {
        let query = query.trim_start_matches('?');
        let mut year = None;
        let mut month = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "year" => year = value.trim().parse::<i32>().ok(),
                "month" => month = value.trim().parse::<i64>().ok(),
                _ => {}
            }
        }
        match (year, month) {
            (Some(year), Some(month)) => Self {
                year,
                month: 1,
            }
            .shift(month - 1),
            _ => Self::containing(today),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Moves by `offset` whole months, crossing year boundaries as needed.
    pub fn shift(self, offset: i64) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + offset;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) + 1;
        Self {
            year: i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX }),
            month: month as u32,
        }
    }

    /// The heading text, e.g. `2025.03.`
    pub fn display(&self) -> String {
        format!("{}.{:02}.", self.year, self.month)
    }

    /// The query string of the deep link, e.g. `year=2025&month=03`.
    pub fn query(&self) -> String {
        format!("year={}&month={:02}", self.year, self.month)
    }

    /// The deep link to this month below `base`.
    pub fn href(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(Some(&self.query()));
        url
    }
}

impl Display for MonthCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}
