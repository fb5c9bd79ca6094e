use crate::api::Backend;
use crate::args::ExportArgs;
use crate::commands::Out;
use crate::nav::MonthCursor;
use crate::{utils, Result};
use anyhow::Context;
use std::path::PathBuf;

/// Downloads one month's spreadsheet export and writes it to `args.out()`.
pub async fn export(backend: &dyn Backend, args: &ExportArgs) -> Result<Out<PathBuf>> {
    let month = MonthCursor::new(args.year(), args.month())
        .with_context(|| format!("There is no month {}", args.month()))?;
    let bytes = backend
        .export(month.year(), month.month())
        .await
        .with_context(|| format!("Unable to export {month}"))?;
    utils::write(args.out(), &bytes).await?;
    Ok(Out::new(
        format!(
            "Wrote {} bytes for {month} to {}",
            bytes.len(),
            args.out().display()
        ),
        args.out().to_path_buf(),
    ))
}
