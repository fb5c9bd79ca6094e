use crate::api::{Backend, SingleEntryForm};
use crate::args::EntryArgs;
use crate::commands::Out;
use crate::panel::SingleEntry;
use crate::{Config, Result};
use anyhow::bail;

/// Fills in the single-entry panel from `args` and submits it.
pub async fn entry(
    config: &Config,
    backend: &dyn Backend,
    args: &EntryArgs,
) -> Result<Out<SingleEntryForm>> {
    let mut panel = SingleEntry::new(config.categories().clone());
    panel.toggle_open();
    if let Some(entry_type) = args.entry_type() {
        panel.select_type(entry_type);
    }
    if let Some(category) = args.category() {
        if !panel.set_category(category) {
            bail!(
                "'{category}' is not one of the categories offered for {}",
                panel
                    .entry_type()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| String::from("an entry without a type"))
            );
        }
    }
    if let Some(amount) = args.amount() {
        panel.input_amount(amount);
    }
    if let Some(date) = args.date() {
        panel.set_date(date);
    }
    if let Some(asset) = args.asset() {
        panel.set_asset(asset);
    }
    if let Some(content) = args.content() {
        panel.input_content(content);
    }
    if let Some(memo) = args.memo() {
        panel.input_memo(memo);
    }

    let form = panel.form();
    panel.submit(backend).await?;
    Ok(Out::new(
        format!("Saved the {} entry of {}", form.cash_side, form.amount),
        form,
    ))
}
