use crate::api::Backend;
use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::nav::MonthCursor;
use crate::records::RecordList;
use crate::search::SearchQuery;
use crate::Result;
use anyhow::{bail, Context};
use tracing::debug;

/// Deletes transactions from one month's list. Every id must be in that month; otherwise nothing
/// is deleted.
pub async fn delete(backend: &dyn Backend, args: &DeleteArgs) -> Result<Out<Vec<i64>>> {
    let month = match args.year_month() {
        Some((year, month)) => MonthCursor::new(year, month)
            .with_context(|| format!("There is no month {month}"))?,
        None => MonthCursor::containing(chrono::Local::now().date_naive()),
    };
    let query = SearchQuery::default().year_month(month.year(), month.month());
    let records = backend
        .search(&query)
        .await
        .context("Unable to load the transaction list")?;

    let mut list = RecordList::from(records);
    for id in args.ids() {
        if !list.set_checked(*id, true) {
            bail!("There is no transaction with id {id} in {month}");
        }
    }
    if let Some(bar) = list.alert_bar() {
        debug!("{bar}");
    }
    let removed = list.delete_selected(backend).await?;
    Ok(Out::new(
        format!("Deleted {removed} transactions"),
        args.ids().to_vec(),
    ))
}
