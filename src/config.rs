//! Configuration file handling.
//!
//! The configuration file is stored at `$LEDGER_HOME/config.json` and holds the ledger server's
//! address, the CSRF token sent with modifying requests, the endpoint paths and the grid settings.

use crate::grid::FillMode;
use crate::model::Categories;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use url::Url;

const APP_NAME: &str = "ledger-grid";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DEFAULT_ROW_COUNT: usize = 10;

/// The server endpoints the client talks to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    SaveBulk,
    SaveSingle,
    Search,
    Categories,
    Delete,
    CheckAccountNumber,
    Export,
    /// The monthly ledger page, used for month navigation links.
    Home,
}

serde_plain::derive_display_from_serialize!(Endpoint);
serde_plain::derive_fromstr_from_deserialize!(Endpoint);

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::SaveBulk,
        Endpoint::SaveSingle,
        Endpoint::Search,
        Endpoint::Categories,
        Endpoint::Delete,
        Endpoint::CheckAccountNumber,
        Endpoint::Export,
        Endpoint::Home,
    ];
}

/// Where the grid gets its category lists from.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    /// The `categories` lists in the config file.
    #[default]
    Fixed,
    /// The server's categories endpoint.
    Remote,
}

serde_plain::derive_display_from_serialize!(CategorySource);
serde_plain::derive_fromstr_from_deserialize!(CategorySource);

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$LEDGER_HOME` and from there it loads `$LEDGER_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    base_url: Url,
}

impl Config {
    /// Creates the home directory and an initial `config.json` pointing at `base_url`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the ledger home, e.g. `$HOME/ledger`
    /// - `base_url` - The ledger server, e.g. `https://ledger.example.com`
    /// - `csrf_token` - Sent as `X-CSRFToken` with every modifying request, if given.
    ///
    /// # Errors
    /// - Returns an error if `base_url` cannot be parsed or if any file operations fail.
    pub async fn create(
        dir: impl Into<PathBuf>,
        base_url: &str,
        csrf_token: Option<&str>,
    ) -> Result<Self> {
        let base = parse_base_url(base_url)?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the ledger home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;
        let config_path = root.join(CONFIG_JSON);

        let config_file = ConfigFile {
            base_url: base_url.to_string(),
            csrf_token: csrf_token.map(str::to_string),
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
            base_url: base,
        })
    }

    /// This will
    /// - validate that `ledger_home` exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    pub async fn load(ledger_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = ledger_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Ledger home is missing")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let base_url = parse_base_url(&config_file.base_url)?;

        Ok(Self {
            root,
            config_path,
            config_file,
            base_url,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.config_file.csrf_token.as_deref()
    }

    pub fn default_row_count(&self) -> usize {
        self.config_file.default_row_count
    }

    pub fn fill_mode(&self) -> FillMode {
        self.config_file.fill_mode
    }

    pub fn category_source(&self) -> CategorySource {
        self.config_file.category_source
    }

    pub fn categories(&self) -> &Categories {
        &self.config_file.categories
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.config_file.endpoints
    }

    /// The absolute URL of `endpoint`, resolved against `base_url`.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        let path = self.config_file.endpoints.get(endpoint);
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid path '{path}' for the {endpoint} endpoint"))
    }
}

/// Parses the server address. A trailing slash is added so that endpoint paths resolve below it.
fn parse_base_url(s: &str) -> Result<Url> {
    let with_slash = if s.ends_with('/') {
        s.to_string()
    } else {
        format!("{s}/")
    };
    let url = Url::parse(&with_slash).with_context(|| format!("Invalid base_url '{s}'"))?;
    if url.cannot_be_a_base() {
        bail!("The base_url '{s}' cannot be used as a base URL")
    }
    Ok(url)
}

/// The path of each endpoint, relative to `base_url`.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Endpoints {
    pub save_bulk: String,
    pub save_single: String,
    pub search: String,
    pub categories: String,
    pub delete: String,
    pub check_account_number: String,
    pub export: String,
    pub home: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            save_bulk: "account_book/save_bulk_transactions/".into(),
            save_single: "account_book/save_transaction/".into(),
            search: "account_book/search_transactions/".into(),
            categories: "account_book/get_categories/".into(),
            delete: "account_book/delete_transactions/".into(),
            check_account_number: "manacc/check-acc-num/".into(),
            export: "account_book/export/".into(),
            home: "account_book/".into(),
        }
    }
}

impl Endpoints {
    pub fn get(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::SaveBulk => &self.save_bulk,
            Endpoint::SaveSingle => &self.save_single,
            Endpoint::Search => &self.search,
            Endpoint::Categories => &self.categories,
            Endpoint::Delete => &self.delete,
            Endpoint::CheckAccountNumber => &self.check_account_number,
            Endpoint::Export => &self.export,
            Endpoint::Home => &self.home,
        }
    }
}

impl Display for Endpoints {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, endpoint) in Endpoint::ALL.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{endpoint}: {}", self.get(*endpoint))?;
        }
        Ok(())
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "ledger-grid",
///   "config_version": 1,
///   "base_url": "https://ledger.example.com",
///   "csrf_token": "4Tq0r8pKxW",
///   "default_row_count": 10,
///   "fill_mode": "rectangle",
///   "category_source": "fixed"
/// }
/// ```
///
/// `endpoints` and `categories` may be given too; anything left out takes its default.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "ledger-grid"
    app_name: String,

    config_version: u8,

    /// The ledger server, e.g. https://ledger.example.com
    base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    csrf_token: Option<String>,

    #[serde(default)]
    endpoints: Endpoints,

    /// Number of blank rows the grid starts with
    #[serde(default = "default_row_count")]
    default_row_count: usize,

    #[serde(default)]
    fill_mode: FillMode,

    #[serde(default)]
    category_source: CategorySource,

    #[serde(default)]
    categories: Categories,
}

fn default_row_count() -> usize {
    DEFAULT_ROW_COUNT
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            base_url: String::new(),
            csrf_token: None,
            endpoints: Endpoints::default(),
            default_row_count: DEFAULT_ROW_COUNT,
            fill_mode: FillMode::default(),
            category_source: CategorySource::default(),
            categories: Categories::default(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
