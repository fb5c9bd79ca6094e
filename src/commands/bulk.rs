use crate::api::Backend;
use crate::args::BulkArgs;
use crate::commands::Out;
use crate::config::CategorySource;
use crate::error::ValidationError;
use crate::grid::GridEditor;
use crate::model::{digits_only, Categories, Column, Transaction, TransactionType};
use crate::surface::{CellSurface, LogNotifier, MemoryGrid};
use crate::{utils, Config, Result};
use tracing::{debug, warn};

/// Reads tab-separated rows into a fresh bulk-entry grid and saves them in one request.
///
/// The grid is reset to `default_row_count` rows, or to one row per line of the file when there
/// are more lines than that, and the file is pasted at the first cell. Blank lines become blank
/// rows and are not submitted. With `dry_run` the rows are validated but not sent.
pub async fn bulk(
    config: &Config,
    backend: &dyn Backend,
    args: &BulkArgs,
) -> Result<Out<Vec<Transaction>>> {
    let text = utils::read(args.file()).await?;
    let line_count = text.lines().count();

    let categories = match config.category_source() {
        CategorySource::Fixed => config.categories().clone(),
        CategorySource::Remote => remote_categories(config, backend).await,
    };
    let mut editor = GridEditor::new(MemoryGrid::default(), categories, config.fill_mode());
    editor.reset_grid(config.default_row_count().max(line_count));
    let written = editor.paste_block(&text, 0, 0);
    editor.blur();
    debug!("Wrote {written} cells from {}", args.file().display());
    check_written(&editor, &text)?;

    let transactions = editor.collect_transactions()?;
    if args.dry_run() {
        return Ok(Out::new(
            format!("{} rows are valid and ready to save", transactions.len()),
            transactions,
        ));
    }

    let mut notifier = LogNotifier;
    let saved = editor.save(backend, &mut notifier).await?;
    Ok(Out::new(format!("Saved {saved} transactions"), transactions))
}

/// Fails on the first non-empty value of `text` that the grid did not take, such as a category
/// or asset the select cell does not offer. Values past the last editable column are ignored.
fn check_written<S: CellSurface>(
    editor: &GridEditor<S>,
    text: &str,
) -> std::result::Result<(), ValidationError> {
    for (row, line) in text.lines().enumerate() {
        for (ix, value) in line.split('\t').enumerate() {
            let Some(col) = Column::from_index(ix).filter(|c| c.is_editable()) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            let held = editor.value(row, col).unwrap_or_default();
            let taken = match col {
                Column::Type => {
                    TransactionType::from_cell(value) == TransactionType::from_cell(&held)
                }
                Column::Amount => digits_only(value) == digits_only(&held),
                _ => value == held,
            };
            if !taken {
                return Err(ValidationError::new(
                    row,
                    col,
                    format!("'{value}' is not a valid {}", col.label().to_lowercase()),
                ));
            }
        }
    }
    Ok(())
}

/// Fetches both category lists, keeping the configured list for a type whose request fails.
async fn remote_categories(config: &Config, backend: &dyn Backend) -> Categories {
    let income = fetch_categories(config, backend, TransactionType::Income).await;
    let expense = fetch_categories(config, backend, TransactionType::Expense).await;
    Categories::new(income, expense)
}

async fn fetch_categories(
    config: &Config,
    backend: &dyn Backend,
    ty: TransactionType,
) -> Vec<String> {
    match backend.categories(ty).await {
        Ok(entries) => entries.into_iter().map(|c| c.name).collect(),
        Err(e) => {
            warn!("Unable to fetch {ty} categories, using the configured list: {e}");
            config.categories().for_type(Some(ty)).to_vec()
        }
    }
}
