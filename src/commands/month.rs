use crate::args::MonthArgs;
use crate::commands::Out;
use crate::config::Endpoint;
use crate::nav::MonthCursor;
use crate::{Config, Result};
use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub heading: String,
    pub href: String,
}

/// Shows the heading and deep link of a month, `offset` months away from the one given (or from
/// the month containing `today`).
pub fn month(config: &Config, args: &MonthArgs, today: NaiveDate) -> Result<Out<MonthSummary>> {
    let start = match args.year().zip(args.month()) {
        Some((year, month)) => {
            MonthCursor::new(year, month).with_context(|| format!("There is no month {month}"))?
        }
        None => MonthCursor::containing(today),
    };
    let cursor = start.shift(args.offset());
    let href = cursor.href(&config.endpoint_url(Endpoint::Home)?);
    let summary = MonthSummary {
        year: cursor.year(),
        month: cursor.month(),
        heading: cursor.display(),
        href: href.to_string(),
    };
    Ok(Out::new(
        format!("{} {}", summary.heading, summary.href),
        summary,
    ))
}
