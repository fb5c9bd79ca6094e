use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the ledger home directory and an initial `config.json`.
///
/// # Arguments
/// - `ledger_home` - The directory that will hold the configuration, e.g. `$HOME/ledger`
/// - `base_url` - The ledger server, e.g. `https://ledger.example.com`
/// - `csrf_token` - Sent as `X-CSRFToken` with requests that change data.
///
/// # Errors
/// - Returns an error if `base_url` is not a URL or if any file operations fail.
pub async fn init(ledger_home: &Path, base_url: &str, csrf_token: Option<&str>) -> Result<Out<()>> {
    let config = Config::create(ledger_home, base_url, csrf_token)
        .await
        .context("Unable to create the ledger home directory and config")?;
    Ok(format!(
        "Successfully created the ledger config at {}",
        config.config_path().display()
    )
    .into())
}
