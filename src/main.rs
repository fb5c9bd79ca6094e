use clap::Parser;
use ledger_grid::args::{Args, Command};
use ledger_grid::{api, commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().ledger_home().path();

    // This allows for running the program without a ledger server. When LEDGER_GRID_IN_TEST_MODE
    // is set and non-zero in length, then the mode will be Mode::Test, otherwise Mode::Http.
    let mode = Mode::from_env();

    if let Command::Init(init_args) = args.command() {
        commands::init(home, init_args.base_url(), init_args.csrf_token())
            .await?
            .print();
        return Ok(());
    }

    let config = Config::load(home).await?;
    let backend = api::backend(&config, mode)?;
    let backend = backend.as_ref();

    let _: () = match args.command() {
        Command::Init(_) => {}
        Command::Bulk(bulk_args) => commands::bulk(&config, backend, bulk_args).await?.print(),
        Command::Entry(entry_args) => commands::entry(&config, backend, entry_args)
            .await?
            .print(),
        Command::Search(search_args) => commands::search(backend, search_args).await?.print(),
        Command::Categories(categories_args) => {
            commands::categories(&config, backend, categories_args)
                .await?
                .print()
        }
        Command::Delete(delete_args) => commands::delete(backend, delete_args).await?.print(),
        Command::Export(export_args) => commands::export(backend, export_args).await?.print(),
        Command::Month(month_args) => {
            let today = chrono::Local::now().date_naive();
            commands::month(&config, month_args, today)?.print()
        }
        Command::CheckAccount(check_args) => {
            commands::check_account(backend, check_args.acc_num())
                .await?
                .print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "ledger_grid={},{}={}",
                level,
                env!("CARGO_CRATE_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
