use crate::api::{Backend, SearchRecord};
use crate::args::{CategoriesArgs, SearchArgs};
use crate::commands::Out;
use crate::config::CategorySource;
use crate::search::SearchQuery;
use crate::{Config, Result};
use anyhow::Context;
use std::fmt::Write;

/// Lists the transactions matching the filters in `args`.
pub async fn search(backend: &dyn Backend, args: &SearchArgs) -> Result<Out<Vec<SearchRecord>>> {
    let query = query(args);
    let records = backend
        .search(&query)
        .await
        .context("Unable to search transactions")?;

    let mut message = format!("Found {} transactions", records.len());
    for r in &records {
        let _ = write!(
            message,
            "\n{}\t{}\t{}\t{}\t{}\t{}",
            r.id,
            r.use_date,
            r.cash_side,
            r.category_name,
            r.cash_amount,
            r.cash_cont.as_deref().unwrap_or_default()
        );
    }
    Ok(Out::new(message, records))
}

fn query(args: &SearchArgs) -> SearchQuery {
    let mut query = SearchQuery::default();
    if let (Some(year), Some(month)) = (args.year(), args.month()) {
        query = query.year_month(year, month);
    }
    if let Some((start, end)) = args.date_range() {
        query = query.date_range(start, end);
    }
    if let Some(ty) = args.transaction_type() {
        query = query.transaction_type(ty);
    }
    if let Some(category) = args.category() {
        query = query.category(category);
    }
    if let Some(amount) = args.amount() {
        query = query.amount(amount);
    }
    query
}

/// Lists the categories for a transaction type, from the server when asked for or configured,
/// otherwise from `config.json`.
pub async fn categories(
    config: &Config,
    backend: &dyn Backend,
    args: &CategoriesArgs,
) -> Result<Out<Vec<String>>> {
    let ty = args.transaction_type();
    let names: Vec<String> =
        if args.remote() || config.category_source() == CategorySource::Remote {
            backend
                .categories(ty)
                .await
                .with_context(|| format!("Unable to fetch the {ty} categories"))?
                .into_iter()
                .map(|c| c.name)
                .collect()
        } else {
            config.categories().for_type(Some(ty)).to_vec()
        };
    Ok(Out::new(
        format!("{} {ty} categories:\n{}", names.len(), names.join("\n")),
        names,
    ))
}
