//! These structs provide the CLI interface for the ledger CLI.

use crate::model::TransactionType;
use crate::panel::EntryType;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// ledger: bulk entry and lookup of household ledger transactions.
///
/// The `bulk` subcommand reads tab-separated rows, the way they come out of a spreadsheet, into
/// the bulk-entry grid, validates them and saves them in one request. The other subcommands
/// search, export and delete transactions, add a single entry, and check account numbers.
///
/// Set LEDGER_GRID_IN_TEST_MODE to any non-empty value to run against an in-memory server.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the ledger home directory and its config.json.
    ///
    /// This is the first command you should run. By default the home directory is $HOME/ledger;
    /// pass --ledger-home to put it somewhere else.
    Init(InitArgs),
    /// Paste tab-separated rows into the bulk-entry grid and save them.
    Bulk(BulkArgs),
    /// Save one transaction through the single-entry panel.
    Entry(EntryArgs),
    /// List transactions matching the given filters.
    Search(SearchArgs),
    /// List the categories for a transaction type.
    Categories(CategoriesArgs),
    /// Delete transactions by id.
    Delete(DeleteArgs),
    /// Download the spreadsheet export of one month.
    Export(ExportArgs),
    /// Show the heading and deep link of a month.
    Month(MonthArgs),
    /// Check whether an account number is already registered.
    CheckAccount(CheckAccountArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the ledger configuration is held. Defaults to ~/ledger
    #[arg(long, env = "LEDGER_HOME", default_value_t = default_ledger_home())]
    ledger_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, ledger_home: PathBuf) -> Self {
        Self {
            log_level,
            ledger_home: ledger_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn ledger_home(&self) -> &DisplayPath {
        &self.ledger_home
    }
}

/// Args for the `ledger init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The address of the ledger server, e.g. https://ledger.example.com
    #[arg(long)]
    base_url: String,

    /// The CSRF token to send with requests that change data.
    #[arg(long, env = "LEDGER_CSRF_TOKEN")]
    csrf_token: Option<String>,
}

impl InitArgs {
    pub fn new(base_url: impl Into<String>, csrf_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            csrf_token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }
}

/// Args for the `ledger bulk` command.
#[derive(Debug, Parser, Clone)]
pub struct BulkArgs {
    /// A file of tab-separated rows in column order: type, date, asset, category, amount,
    /// content, memo.
    file: PathBuf,

    /// Validate and show the rows without saving them.
    #[arg(long)]
    dry_run: bool,
}

impl BulkArgs {
    pub fn new(file: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            file: file.into(),
            dry_run,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Args for the `ledger entry` command.
#[derive(Debug, Parser, Clone)]
pub struct EntryArgs {
    /// income, expense or transfer
    #[arg(long = "type")]
    entry_type: Option<EntryType>,

    /// The amount, up to two decimal places.
    #[arg(long)]
    amount: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    asset: Option<String>,

    #[arg(long)]
    content: Option<String>,

    #[arg(long)]
    memo: Option<String>,
}

impl EntryArgs {
    pub fn new(entry_type: Option<EntryType>, amount: Option<String>, date: Option<String>) -> Self {
        Self {
            entry_type,
            amount,
            date,
            category: None,
            asset: None,
            content: None,
            memo: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn entry_type(&self) -> Option<EntryType> {
        self.entry_type
    }

    pub fn amount(&self) -> Option<&str> {
        self.amount.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn asset(&self) -> Option<&str> {
        self.asset.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }
}

/// Args for the `ledger search` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct SearchArgs {
    #[arg(long)]
    year: Option<i32>,

    /// 1 to 12
    #[arg(long)]
    month: Option<u32>,

    /// YYYY-MM-DD. Used together with --end-date, and takes priority over --year and --month.
    #[arg(long, requires = "end_date")]
    start_date: Option<NaiveDate>,

    #[arg(long, requires = "start_date")]
    end_date: Option<NaiveDate>,

    /// income or expense
    #[arg(long = "type")]
    transaction_type: Option<TransactionType>,

    /// A category id.
    #[arg(long)]
    category: Option<String>,

    /// An exact amount.
    #[arg(long)]
    amount: Option<u64>,
}

impl SearchArgs {
    pub fn year_month(year: i32, month: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            ..Self::default()
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start_date.zip(self.end_date)
    }

    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn amount(&self) -> Option<u64> {
        self.amount
    }
}

/// Args for the `ledger categories` command.
#[derive(Debug, Parser, Clone)]
pub struct CategoriesArgs {
    /// income or expense
    transaction_type: TransactionType,

    /// Ask the server instead of reading config.json.
    #[arg(long)]
    remote: bool,
}

impl CategoriesArgs {
    pub fn new(transaction_type: TransactionType, remote: bool) -> Self {
        Self {
            transaction_type,
            remote,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn remote(&self) -> bool {
        self.remote
    }
}

/// Args for the `ledger delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ids of the transactions to delete.
    #[arg(required = true)]
    ids: Vec<i64>,

    /// Search this month for the ids. Defaults to the current month.
    #[arg(long, requires = "month")]
    year: Option<i32>,

    #[arg(long, requires = "year")]
    month: Option<u32>,
}

impl DeleteArgs {
    pub fn new(ids: Vec<i64>, year: Option<i32>, month: Option<u32>) -> Self {
        Self { ids, year, month }
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn year_month(&self) -> Option<(i32, u32)> {
        self.year.zip(self.month)
    }
}

/// Args for the `ledger export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    #[arg(long)]
    year: i32,

    /// 1 to 12
    #[arg(long)]
    month: u32,

    /// Where to write the file.
    #[arg(long)]
    out: PathBuf,
}

impl ExportArgs {
    pub fn new(year: i32, month: u32, out: impl Into<PathBuf>) -> Self {
        Self {
            year,
            month,
            out: out.into(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn out(&self) -> &Path {
        &self.out
    }
}

/// Args for the `ledger month` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct MonthArgs {
    /// Defaults to the current month.
    #[arg(long, requires = "month")]
    year: Option<i32>,

    #[arg(long, requires = "year")]
    month: Option<u32>,

    /// Months to move forward (or back, when negative).
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,
}

impl MonthArgs {
    pub fn new(year: Option<i32>, month: Option<u32>, offset: i64) -> Self {
        Self {
            year,
            month,
            offset,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

/// Args for the `ledger check-account` command.
#[derive(Debug, Parser, Clone)]
pub struct CheckAccountArgs {
    acc_num: String,
}

impl CheckAccountArgs {
    pub fn new(acc_num: impl Into<String>) -> Self {
        Self {
            acc_num: acc_num.into(),
        }
    }

    pub fn acc_num(&self) -> &str {
        &self.acc_num
    }
}

fn default_ledger_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("ledger"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --ledger-home or LEDGER_HOME instead of relying on the default \
                ledger home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("ledger")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bulk() {
        let args = Args::try_parse_from([
            "ledger",
            "--ledger-home",
            "/tmp/ledger",
            "bulk",
            "rows.tsv",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(args.common().ledger_home().path(), Path::new("/tmp/ledger"));
        match args.command() {
            Command::Bulk(bulk) => {
                assert_eq!(bulk.file(), Path::new("rows.tsv"));
                assert!(bulk.dry_run());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_search_filters() {
        let args = Args::try_parse_from([
            "ledger",
            "search",
            "--start-date",
            "2025-10-01",
            "--end-date",
            "2025-10-31",
            "--type",
            "expense",
        ])
        .unwrap();
        let Command::Search(search) = args.command() else {
            panic!("expected search");
        };
        assert_eq!(
            search.date_range().map(|(s, _)| s.to_string()),
            Some(String::from("2025-10-01"))
        );
        assert_eq!(search.transaction_type(), Some(TransactionType::Expense));
    }

    #[test]
    fn test_start_date_requires_end_date() {
        let result = Args::try_parse_from(["ledger", "search", "--start-date", "2025-10-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_month_negative_offset() {
        let args = Args::try_parse_from(["ledger", "month", "--offset", "-3"]).unwrap();
        let Command::Month(month) = args.command() else {
            panic!("expected month");
        };
        assert_eq!(month.offset(), -3);
        assert_eq!(month.year(), None);
    }

    #[test]
    fn test_log_level() {
        let args =
            Args::try_parse_from(["ledger", "--log-level", "debug", "check-account", "1"]).unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
    }
}
